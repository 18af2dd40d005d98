//! En Garde - a reaction-time training game
//!
//! Board: 16x2 character display, analog joystick with a select button,
//! three target buttons each paired with an LED, piezo speaker.
//!
//! The crate is hardware independent. Peripherals are reached through the
//! traits in [`hw`]; the firmware crate implements them for the Pico and
//! the tests implement them with a simulated clock.

#![cfg_attr(not(test), no_std)]
#![allow(async_fn_in_trait)]

pub mod config;
pub mod game;
pub mod grid;
pub mod hw;
pub mod menu;
pub mod rng;
pub mod scoring;
pub mod screen;
pub mod session;
pub mod tones;

pub use config::Config;
pub use game::{GameController, State};
pub use grid::TextGrid;
pub use hw::{Axis, Button, Clock, Display, Glyph, Inputs, Outputs, RandomSource, Target};
pub use menu::MenuOption;
pub use rng::Xorshift32;
pub use scoring::RoundOutcome;
pub use session::{GameStats, Session};
