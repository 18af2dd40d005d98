//! Game I/O traits implemented on Pico peripherals.

use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::gpio::{Input, Level, Output};
use embassy_time::{Instant, Timer};
use engarde::{Axis, Button, Clock, Inputs, Outputs, Target};

use crate::buzzer::TONES;

/// Joystick at rest on the 10-bit scale.
const AXIS_CENTER: u16 = 512;

/// Joystick, select and target buttons (all active-low, pull-up).
pub struct PicoInputs {
    pub adc: Adc<'static, adc::Blocking>,
    pub x_axis: Channel<'static>,
    pub y_axis: Channel<'static>,
    pub select: Input<'static>,
    pub targets: [Input<'static>; 3],
}

impl Inputs for PicoInputs {
    fn read_axis(&mut self, axis: Axis) -> u16 {
        let channel = match axis {
            Axis::Horizontal => &mut self.x_axis,
            Axis::Vertical => &mut self.y_axis,
        };
        match self.adc.blocking_read(channel) {
            // 12-bit ADC scaled to the 10-bit range the thresholds use
            Ok(raw) => raw >> 2,
            Err(_) => AXIS_CENTER,
        }
    }

    fn is_pressed(&mut self, button: Button) -> bool {
        match button {
            Button::Select => self.select.is_low(),
            Button::Target(t) => self.targets[t.index()].is_low(),
        }
    }
}

/// Target LEDs plus the tone queue feeding the buzzer task.
pub struct PicoOutputs {
    pub leds: [Output<'static>; 3],
}

impl Outputs for PicoOutputs {
    fn set_led(&mut self, target: Target, on: bool) {
        self.leds[target.index()].set_level(if on { Level::High } else { Level::Low });
    }

    fn play_tone(&mut self, freq_hz: u16, duration_ms: u16) {
        if TONES.try_send((freq_hz, duration_ms)).is_err() {
            log::warn!("Tone queue full, dropped {} Hz", freq_hz);
        }
    }
}

pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }

    async fn sleep_ms(&mut self, ms: u32) {
        Timer::after_millis(ms as u64).await;
    }
}

/// Seed from the low bits of repeated temperature sensor reads.
pub fn noise_seed(adc: &mut Adc<'static, adc::Blocking>, sensor: &mut Channel<'static>) -> u32 {
    let mut seed = Instant::now().as_ticks() as u32;
    for _ in 0..32 {
        let bit = adc.blocking_read(sensor).map(|v| v as u32 & 1).unwrap_or(0);
        seed = seed.rotate_left(1) ^ bit;
    }
    seed
}
