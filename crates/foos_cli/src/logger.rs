//! Minimal stderr backend for the `log` facade.

use log::{Level, LevelFilter, Log, Metadata, Record};

struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let tag = match record.level() {
            Level::Error => "ERROR",
            Level::Warn => "WARN ",
            Level::Info => "INFO ",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        };
        eprintln!("[{}] {}: {}", tag, record.target(), record.args());
    }

    fn flush(&self) {}
}

/// `-v` count to level: 0 = warn, 1 = info, 2 = debug, 3+ = trace
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn init(verbosity: u8) -> anyhow::Result<()> {
    let level = level_for(verbosity);
    log::set_boxed_logger(Box::new(StderrLogger { level }))
        .map_err(|err| anyhow::anyhow!("Failed to install logger: {}", err))?;
    log::set_max_level(level);
    Ok(())
}
