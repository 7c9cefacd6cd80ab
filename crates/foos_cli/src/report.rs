//! Run summary printed by `simulate` and `random`.

use serde::{Deserialize, Serialize};

use foos_core::{MatchOutcome, PlayerSide, ScorerConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// RFC 3339
    pub generated_at: String,
    pub engine_version: String,
    pub source: String,
    pub config: ScorerConfig,
    pub matches: Vec<MatchOutcome>,
    /// Active cycles left unfinished when the input ran out
    pub unfinished_cycles: u64,
    pub telemetry: Vec<String>,
    /// Host requests still queued when the run stopped
    pub unanswered_requests: usize,
}

impl RunReport {
    pub fn new(source: String, config: ScorerConfig) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            engine_version: foos_core::VERSION.to_string(),
            source,
            config,
            matches: Vec::new(),
            unfinished_cycles: 0,
            telemetry: Vec::new(),
            unanswered_requests: 0,
        }
    }

    pub fn wins(&self, side: PlayerSide) -> usize {
        self.matches.iter().filter(|m| m.winner == Some(side)).count()
    }

    pub fn print_summary(&self) {
        println!("\n✅ {} match(es) from {}", self.matches.len(), self.source);
        for (i, outcome) in self.matches.iter().enumerate() {
            let result = match outcome.winner {
                Some(side) => format!("{} wins", side),
                None if outcome.ended_by_reset => "reset, no winner".to_string(),
                None => "no winner".to_string(),
            };
            println!(
                "   Match {}: {}-{} ({}) in {} cycles, {} goals",
                i + 1,
                outcome.final_scores[0],
                outcome.final_scores[1],
                result,
                outcome.cycles,
                outcome.goals.len()
            );
        }
        println!(
            "   Wins: P1 {} / P2 {}",
            self.wins(PlayerSide::One),
            self.wins(PlayerSide::Two)
        );
        if self.unfinished_cycles > 0 {
            println!("   Input ran out {} cycles into an unfinished match", self.unfinished_cycles);
        }
        for line in &self.telemetry {
            println!("   📡 {}", line);
        }
        if self.unanswered_requests > 0 {
            println!("   📡 {} request(s) never answered", self.unanswered_requests);
        }
    }
}
