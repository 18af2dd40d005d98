//! Raspberry Pi Pico - "En Garde!" reaction trainer
//!
//! Pico Display Pack shows a 16x2 character screen.
//! Joystick: X (GP26), Y (GP27), push (GP22)
//! Targets (button / LED): left GP2 / GP10, center GP3 / GP11, right GP4 / GP21
//! Piezo: GP5 (PWM slice 2, channel B)
//! LED (GP25): ON while a game is running

#![no_std]
#![no_main]

mod board;
mod buzzer;
mod lcd;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::USB;
use embassy_rp::pwm::{self, Pwm};
use embassy_rp::spi::{self, Spi};
use embassy_rp::usb::{Driver, InterruptHandler as UsbInterruptHandler};
use embassy_time::{Delay, Duration, Instant, Timer};
use embedded_hal_bus::spi::ExclusiveDevice;
use engarde::{Config, GameController, State, Xorshift32};
use mipidsi::Builder;
use mipidsi::models::ST7789;
use mipidsi::options::{ColorInversion, Orientation, Rotation};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use board::{EmbassyClock, PicoInputs, PicoOutputs};
use lcd::Lcd;

/// Game loop period. Reaction times are measured at this resolution.
const TICK_MS: u64 = 1;

// --- Embassy bindings ---
bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => UsbInterruptHandler<USB>;
});

#[embassy_executor::task]
async fn logger_task(driver: Driver<'static, USB>) {
    embassy_usb_logger::run!(1024, log::LevelFilter::Info, driver);
}

// --- Main ---
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    // USB serial logger
    let usb_driver = Driver::new(p.USB, Irqs);
    unwrap!(spawner.spawn(logger_task(usb_driver)));
    Timer::after(Duration::from_secs(2)).await;
    log::info!("=== En Garde! ===");

    // Onboard LED (GP25 on Pico)
    let mut status_led = Output::new(p.PIN_25, Level::Low);

    // ST7789 display (Pico Display Pack)
    let _bl = Output::new(p.PIN_20, Level::High);
    let mut spi_config = spi::Config::default();
    spi_config.frequency = 62_500_000;
    let spi_bus = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let cs_display = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let spi_device = ExclusiveDevice::new_no_delay(spi_bus, cs_display).unwrap();
    static DISPLAY_BUF: StaticCell<[u8; 1024]> = StaticCell::new();
    let display_buf = DISPLAY_BUF.init([0u8; 1024]);
    let di = mipidsi::interface::SpiInterface::new(spi_device, dc, display_buf);
    let panel = Builder::new(ST7789, di)
        .display_size(135, 240)
        .display_offset(52, 40)
        .invert_colors(ColorInversion::Inverted)
        .orientation(Orientation::new().rotate(Rotation::Deg90))
        .init(&mut Delay)
        .unwrap();
    let mut lcd = Lcd::new(panel);
    lcd.draw_frame().unwrap();
    log::info!("Display ready!");

    // Piezo
    let buzzer = Pwm::new_output_b(p.PWM_SLICE2, p.PIN_5, pwm::Config::default());
    unwrap!(spawner.spawn(buzzer::buzzer_task(buzzer)));

    // Joystick and targets (active-low, pull-up)
    let mut adc = Adc::new_blocking(p.ADC, adc::Config::default());
    let mut temp_sensor = Channel::new_temp_sensor(p.ADC_TEMP_SENSOR);
    let seed = board::noise_seed(&mut adc, &mut temp_sensor);
    info!("RNG seed {=u32:x}", seed);

    let inputs = PicoInputs {
        adc,
        x_axis: Channel::new_pin(p.PIN_26, Pull::None),
        y_axis: Channel::new_pin(p.PIN_27, Pull::None),
        select: Input::new(p.PIN_22, Pull::Up),
        targets: [
            Input::new(p.PIN_2, Pull::Up),
            Input::new(p.PIN_3, Pull::Up),
            Input::new(p.PIN_4, Pull::Up),
        ],
    };
    let outputs = PicoOutputs {
        leds: [
            Output::new(p.PIN_10, Level::Low),
            Output::new(p.PIN_11, Level::Low),
            Output::new(p.PIN_21, Level::Low),
        ],
    };

    let mut game = GameController::new(
        lcd,
        inputs,
        outputs,
        EmbassyClock,
        Xorshift32::new(seed),
        Config::DEFAULT,
    );
    game.boot().await;

    log::info!("Entering game loop");

    let mut prev_state = State::Menu;
    loop {
        let tick_start = Instant::now();

        game.tick().await;

        let state = game.state();
        if state != prev_state {
            debug!("{} -> {}", prev_state, state);
            let in_game = matches!(state, State::Prepare | State::Await | State::Result);
            status_led.set_level(if in_game { Level::High } else { Level::Low });
            prev_state = state;
        }

        Timer::at(tick_start + Duration::from_millis(TICK_MS)).await;
    }
}
