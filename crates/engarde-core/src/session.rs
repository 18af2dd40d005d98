//! Score bookkeeping for one power-on session.

use crate::config::Config;
use crate::scoring::RoundOutcome;

/// Counters for the game in progress.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GameStats {
    pub hits: u8,
    pub misses: u8,
    pub false_starts: u16,
    /// Fastest correct reaction this game.
    pub best_reaction_ms: Option<u32>,
}

/// Rounds, running score and the volatile high score.
#[derive(Debug, Clone)]
pub struct Session {
    total_rounds: u8,
    current_round: u8,
    total_score: i32,
    high_score: i32,
    stats: GameStats,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            total_rounds: config.clamp_rounds(config.default_rounds),
            current_round: 1,
            total_score: 0,
            high_score: 0,
            stats: GameStats::default(),
        }
    }

    pub fn total_rounds(&self) -> u8 {
        self.total_rounds
    }

    pub fn current_round(&self) -> u8 {
        self.current_round
    }

    pub fn total_score(&self) -> i32 {
        self.total_score
    }

    pub fn high_score(&self) -> i32 {
        self.high_score
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Steps the round count by `delta`, clamped to the configured range.
    /// Returns whether it changed.
    pub fn adjust_rounds(&mut self, delta: i8, config: &Config) -> bool {
        let next = (self.total_rounds as i16 + delta as i16)
            .clamp(config.min_rounds as i16, config.max_rounds as i16) as u8;
        let changed = next != self.total_rounds;
        self.total_rounds = next;
        changed
    }

    /// Resets round and score. Round count and high score survive.
    pub fn start_new_game(&mut self) {
        self.current_round = 1;
        self.total_score = 0;
        self.stats = GameStats::default();
    }

    pub fn apply_false_start(&mut self, config: &Config) {
        self.total_score = self.total_score.saturating_sub(config.false_start_penalty);
        self.stats.false_starts = self.stats.false_starts.saturating_add(1);
    }

    /// Adds the round's score to the total and returns it.
    pub fn record_round(&mut self, outcome: RoundOutcome, config: &Config) -> i32 {
        let score = outcome.score(config);
        self.total_score = self.total_score.saturating_add(score);
        match outcome {
            RoundOutcome::Hit { reaction_ms } => {
                self.stats.hits = self.stats.hits.saturating_add(1);
                self.stats.best_reaction_ms = Some(match self.stats.best_reaction_ms {
                    Some(best) => best.min(reaction_ms),
                    None => reaction_ms,
                });
            }
            RoundOutcome::Miss { .. } => {
                self.stats.misses = self.stats.misses.saturating_add(1);
            }
        }
        score
    }

    /// Moves to the next round. Returns false when the last round is done,
    /// in which case the round number is left unchanged.
    pub fn advance_round(&mut self) -> bool {
        if self.current_round < self.total_rounds {
            self.current_round += 1;
            true
        } else {
            false
        }
    }

    /// Closes the game. Returns true when the total beat the high score.
    pub fn finalize(&mut self) -> bool {
        if self.total_score > self.high_score {
            self.high_score = self.total_score;
            true
        } else {
            false
        }
    }
}
