//! Game tuning values.

/// Thresholds, timings and penalties. Everything the game compares
/// against lives here rather than inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // --- Joystick ---
    /// Axis readings below this count as low deflection.
    pub axis_low: u16,
    /// Axis readings above this count as high deflection.
    pub axis_high: u16,
    /// Minimum gap between accepted menu navigation actions.
    pub nav_debounce_ms: u64,

    // --- En garde ---
    pub delay_min_ms: u32,
    pub delay_max_ms: u32,
    /// Poll period of the "all targets released" gate.
    pub gate_poll_ms: u32,
    /// Poll period inside the random delay window.
    pub wait_poll_ms: u32,

    // --- Scoring ---
    /// Reactions at or beyond this score zero.
    pub score_cutoff_ms: u32,
    pub false_start_penalty: i32,
    pub wrong_button_penalty: i32,
    /// Hit scores above this get the celebration sound.
    pub celebrate_above: i32,

    // --- Rounds ---
    pub default_rounds: u8,
    pub min_rounds: u8,
    pub max_rounds: u8,

    // --- Pauses ---
    /// Pause after menu actions and confirmations so a held button does
    /// not immediately retrigger.
    pub settle_ms: u32,
    pub penalty_pause_ms: u32,
    pub cancel_pause_ms: u32,
    pub result_pause_ms: u32,
    pub splash_ms: u32,
}

impl Config {
    pub const DEFAULT: Config = Config {
        axis_low: 100,
        axis_high: 900,
        nav_debounce_ms: 200,

        delay_min_ms: 800,
        delay_max_ms: 3000,
        gate_poll_ms: 10,
        wait_poll_ms: 2,

        score_cutoff_ms: 1000,
        false_start_penalty: 500,
        wrong_button_penalty: 200,
        celebrate_above: 800,

        default_rounds: 10,
        min_rounds: 1,
        max_rounds: 99,

        settle_ms: 300,
        penalty_pause_ms: 1500,
        cancel_pause_ms: 1500,
        result_pause_ms: 1500,
        splash_ms: 1500,
    };

    pub fn clamp_rounds(&self, rounds: u8) -> u8 {
        rounds.clamp(self.min_rounds, self.max_rounds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}
