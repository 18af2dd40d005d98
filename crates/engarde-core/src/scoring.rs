//! Round scoring.

use crate::config::Config;

/// What happened in a completed round.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RoundOutcome {
    /// Correct target, with the reaction time in milliseconds.
    Hit { reaction_ms: u32 },
    /// Another target was pressed first.
    Miss { reaction_ms: u32 },
}

impl RoundOutcome {
    pub fn score(&self, config: &Config) -> i32 {
        match *self {
            RoundOutcome::Hit { reaction_ms } => hit_score(reaction_ms, config),
            RoundOutcome::Miss { .. } => -config.wrong_button_penalty,
        }
    }

    /// Fast enough hit for the celebration cue.
    pub fn is_celebrated(&self, config: &Config) -> bool {
        matches!(self, RoundOutcome::Hit { .. }) && self.score(config) > config.celebrate_above
    }
}

/// One point per millisecond under the cutoff, never negative.
pub fn hit_score(reaction_ms: u32, config: &Config) -> i32 {
    i32::try_from(config.score_cutoff_ms.saturating_sub(reaction_ms)).unwrap_or(i32::MAX)
}
