//! Menu rows, joystick classification and input edge tracking.

use crate::config::Config;
use crate::hw::{Axis, Button, Inputs};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuOption {
    Start,
    Rounds,
    HighScore,
}

impl MenuOption {
    pub const ALL: [MenuOption; 3] = [MenuOption::Start, MenuOption::Rounds, MenuOption::HighScore];

    pub const fn index(self) -> usize {
        match self {
            MenuOption::Start => 0,
            MenuOption::Rounds => 1,
            MenuOption::HighScore => 2,
        }
    }

    pub fn up(self) -> Option<MenuOption> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn down(self) -> Option<MenuOption> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// First option shown on the two-row display. Only the last option
    /// needs the list scrolled down by one.
    pub fn scroll_offset(self) -> usize {
        if self.index() == Self::ALL.len() - 1 { 1 } else { 0 }
    }
}

/// Joystick axis position bucket.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Deflection {
    Low,
    Neutral,
    High,
}

impl Deflection {
    pub fn classify(raw: u16, config: &Config) -> Self {
        if raw < config.axis_low {
            Deflection::Low
        } else if raw > config.axis_high {
            Deflection::High
        } else {
            Deflection::Neutral
        }
    }
}

/// Rate limit for navigation driven by a held joystick.
#[derive(Debug, Default, Clone, Copy)]
pub struct NavDebounce {
    last_accepted_ms: Option<u64>,
}

impl NavDebounce {
    pub fn ready(&self, now_ms: u64, config: &Config) -> bool {
        match self.last_accepted_ms {
            Some(last) => now_ms.saturating_sub(last) >= config.nav_debounce_ms,
            None => true,
        }
    }

    pub fn accept(&mut self, now_ms: u64) {
        self.last_accepted_ms = Some(now_ms);
    }
}

/// One sample of every input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub horizontal: Deflection,
    pub vertical: Deflection,
    pressed: [bool; 4],
    just_pressed: [bool; 4],
}

impl Snapshot {
    pub fn pressed(&self, button: Button) -> bool {
        self.pressed[button.index()]
    }

    /// Pressed now and released in the previous sample.
    pub fn just_pressed(&self, button: Button) -> bool {
        self.just_pressed[button.index()]
    }
}

/// Samples inputs and remembers button levels between samples.
#[derive(Debug, Default, Clone)]
pub struct InputTracker {
    prev: [bool; 4],
}

impl InputTracker {
    pub fn sample<I: Inputs>(&mut self, inputs: &mut I, config: &Config) -> Snapshot {
        let mut pressed = [false; 4];
        let mut just_pressed = [false; 4];
        for button in Button::ALL {
            let i = button.index();
            pressed[i] = inputs.is_pressed(button);
            just_pressed[i] = pressed[i] && !self.prev[i];
        }
        self.prev = pressed;

        Snapshot {
            horizontal: Deflection::classify(inputs.read_axis(Axis::Horizontal), config),
            vertical: Deflection::classify(inputs.read_axis(Axis::Vertical), config),
            pressed,
            just_pressed,
        }
    }
}
