//! Piezo driven by a PWM slice from its own task.

use embassy_futures::select::{Either, select};
use embassy_rp::pwm::{self, Pwm};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::Timer;

/// 125 MHz / 64
const PWM_TICK_HZ: u32 = 1_953_125;
const PWM_DIVIDER: u8 = 64;

/// (frequency Hz, duration ms)
pub type ToneRequest = (u16, u16);

/// Pending tones. A new tone cuts the one playing, like `tone()` on a pin.
pub static TONES: Channel<CriticalSectionRawMutex, ToneRequest, 8> = Channel::new();

fn top_for(freq_hz: u16) -> u16 {
    let freq = (freq_hz as u32).max(PWM_TICK_HZ / u16::MAX as u32 + 1);
    (PWM_TICK_HZ / freq - 1) as u16
}

#[embassy_executor::task]
pub async fn buzzer_task(mut pwm: Pwm<'static>) {
    let mut config = pwm::Config::default();
    config.divider = PWM_DIVIDER.into();

    let mut next = None;
    loop {
        let (freq, duration) = match next.take() {
            Some(tone) => tone,
            None => TONES.receive().await,
        };

        config.top = top_for(freq);
        config.compare_b = config.top / 2;
        pwm.set_config(&config);

        if let Either::Second(tone) =
            select(Timer::after_millis(duration as u64), TONES.receive()).await
        {
            next = Some(tone);
            continue;
        }

        config.compare_b = 0;
        pwm.set_config(&config);
    }
}
