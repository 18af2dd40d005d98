//! Peripheral seams between the game and the board.

/// Display columns.
pub const COLS: u8 = 16;
/// Display rows.
pub const ROWS: u8 = 2;

/// Custom glyphs preloaded into the display at boot.
/// The discriminant is the glyph slot index.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Glyph {
    Sword = 0,
    Trophy = 1,
    Arrow = 2,
    Clock = 3,
}

impl Glyph {
    pub const ALL: [Glyph; 4] = [Glyph::Sword, Glyph::Trophy, Glyph::Arrow, Glyph::Clock];

    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// One of the three button/LED pairs.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Target {
    Left,
    Center,
    Right,
}

impl Target {
    /// Scan order. When several targets read pressed in the same sample
    /// the first one in this list wins.
    pub const ALL: [Target; 3] = [Target::Left, Target::Center, Target::Right];

    pub const fn index(self) -> usize {
        match self {
            Target::Left => 0,
            Target::Center => 1,
            Target::Right => 2,
        }
    }

    pub const fn from_index(index: u32) -> Option<Target> {
        match index {
            0 => Some(Target::Left),
            1 => Some(Target::Center),
            2 => Some(Target::Right),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Target::Left => "LEFT",
            Target::Center => "CENTER",
            Target::Right => "RIGHT",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Joystick push.
    Select,
    Target(Target),
}

impl Button {
    pub const ALL: [Button; 4] = [
        Button::Select,
        Button::Target(Target::Left),
        Button::Target(Target::Center),
        Button::Target(Target::Right),
    ];

    pub const fn index(self) -> usize {
        match self {
            Button::Select => 0,
            Button::Target(t) => 1 + t.index(),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Addressable 16x2 character surface.
pub trait Display {
    fn clear(&mut self);
    fn set_cursor(&mut self, col: u8, row: u8);
    fn print(&mut self, text: &str);
    fn draw_glyph(&mut self, glyph: Glyph);
}

/// Raw input sampling. "Pressed" hides the pull-up polarity.
pub trait Inputs {
    /// Axis position on a 0..=1023 scale, about 512 at rest.
    fn read_axis(&mut self, axis: Axis) -> u16;
    fn is_pressed(&mut self, button: Button) -> bool;
}

/// Target LEDs and speaker.
pub trait Outputs {
    fn set_led(&mut self, target: Target, on: bool);

    /// Starts a tone and returns immediately.
    fn play_tone(&mut self, freq_hz: u16, duration_ms: u16);

    fn all_leds_off(&mut self) {
        for target in Target::ALL {
            self.set_led(target, false);
        }
    }
}

/// Monotonic millisecond clock.
pub trait Clock {
    fn now_ms(&self) -> u64;
    async fn sleep_ms(&mut self, ms: u32);
}

/// Uniform integer draws, injectable so tests can fix delays and targets.
pub trait RandomSource {
    /// Uniform value in `lo..=hi`.
    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32;
}
