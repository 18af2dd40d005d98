//! Speaker cues as (frequency Hz, duration ms).

pub type Tone = (u16, u16);

// --- Menu ---
pub const NAV: Tone = (1000, 30);
pub const ROUNDS_UP: Tone = (1400, 30);
pub const ROUNDS_DOWN: Tone = (700, 30);
pub const CONFIRM: [Tone; 2] = [(1500, 80), (2000, 120)];

// --- Round ---
pub const GO: Tone = (2500, 150);
pub const HIT: Tone = (1800, 120);
pub const CELEBRATE: [Tone; 2] = [(2000, 90), (3000, 150)];
pub const ERROR: Tone = (200, 400);
pub const CANCEL: Tone = (150, 900);

// --- End of game ---
/// C5 E5 G5 C6
pub const FANFARE: [Tone; 4] = [(523, 150), (659, 150), (784, 150), (1047, 400)];
pub const CLOSING: Tone = (330, 600);

// --- Boot ---
pub const BOOT: [Tone; 3] = [(880, 80), (1175, 80), (1760, 160)];

/// Silence between notes of a sequence.
pub const NOTE_GAP_MS: u32 = 30;
