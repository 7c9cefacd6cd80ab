//! Optional host debug link.
//!
//! The host sends a single request byte; on `SENSOR_DUMP_REQUEST` the
//! table answers with player one's latest sensor magnitude as lowercase
//! hex followed by a newline. Polling never blocks the game loop.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::engine::constants::SIGNAL_INDICATOR_LEVEL;

/// Request byte asking for a sensor dump
pub const SENSOR_DUMP_REQUEST: u8 = 1;

/// State of the on-board status LED (green = high, red = low)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalLevel {
    High,
    Low,
}

impl SignalLevel {
    pub fn from_magnitude(magnitude: u16) -> Self {
        if magnitude > SIGNAL_INDICATOR_LEVEL {
            SignalLevel::High
        } else {
            SignalLevel::Low
        }
    }
}

pub trait Telemetry {
    /// Next pending request byte, if the host sent one
    fn poll_request(&mut self) -> Option<u8>;

    fn send_line(&mut self, line: &str);

    fn indicate_signal(&mut self, _level: SignalLevel) {}
}

pub fn format_sensor_dump(magnitude: u16) -> String {
    format!("{:x}", magnitude)
}

/// In-memory link: queue requests in, collect replies out.
///
/// Clones share the same buffers, so a host can keep a handle while the
/// controller owns another.
#[derive(Debug, Default, Clone)]
pub struct BufferedTelemetry {
    inner: Rc<RefCell<LinkBuffers>>,
}

#[derive(Debug, Default)]
struct LinkBuffers {
    requests: VecDeque<u8>,
    sent: Vec<String>,
    signal: Option<SignalLevel>,
}

impl BufferedTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_request(&self, byte: u8) {
        self.inner.borrow_mut().requests.push_back(byte);
    }

    pub fn pending_requests(&self) -> usize {
        self.inner.borrow().requests.len()
    }

    pub fn sent_lines(&self) -> Vec<String> {
        self.inner.borrow().sent.clone()
    }

    pub fn last_signal(&self) -> Option<SignalLevel> {
        self.inner.borrow().signal
    }
}

impl Telemetry for BufferedTelemetry {
    fn poll_request(&mut self) -> Option<u8> {
        self.inner.borrow_mut().requests.pop_front()
    }

    fn send_line(&mut self, line: &str) {
        self.inner.borrow_mut().sent.push(line.to_string());
    }

    fn indicate_signal(&mut self, level: SignalLevel) {
        self.inner.borrow_mut().signal = Some(level);
    }
}
