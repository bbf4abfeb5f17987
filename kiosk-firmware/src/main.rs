//! Eye-Test Kiosk Controller Firmware
//!
//! Main firmware binary for the RP2040 kiosk board. A single thread of
//! control greets the user, scans the keypad, and for every key press
//! updates the LCD and tells the companion device what to run.
//!
//! There is no executor and no interrupt handler: every wait is a
//! busy-wait on a pin or peripheral flag.

#![no_std]
#![no_main]

use defmt::*;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::uart::UartTx;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use kiosk_core::config::{parse_config, KioskConfig};
use kiosk_core::Kiosk;
use kiosk_drivers::display::DisplayTiming;
use kiosk_drivers::{Hd44780, MatrixKeypad, SerialTransmitter};
use kiosk_hal::gpio::PinBus;
use kiosk_hal::uart::UartConfig;
use kiosk_hal::wait::Forever;
use kiosk_hal_rp2040::{rp_uart_config, GpioInput, GpioOutput, IoSerial, KIOSK_PINS};

/// Embedded configuration (compiled into firmware)
/// Edit kiosk.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../kiosk.toml");

#[cortex_m_rt::entry]
fn main() -> ! {
    info!("Kiosk firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    match KIOSK_PINS.validate() {
        Ok(uart) => debug!("Pin map ok, companion link on {}", uart),
        Err(e) => warn!("Pin map check failed: {}", e),
    }

    // Keypad: rows idle high, columns pulled up (GP2-GP5, GP6-GP8)
    let rows = [
        GpioOutput::new(Output::new(p.PIN_2, Level::High)),
        GpioOutput::new(Output::new(p.PIN_3, Level::High)),
        GpioOutput::new(Output::new(p.PIN_4, Level::High)),
        GpioOutput::new(Output::new(p.PIN_5, Level::High)),
    ];
    let cols = [
        GpioInput::new(Input::new(p.PIN_6, Pull::Up)),
        GpioInput::new(Input::new(p.PIN_7, Pull::Up)),
        GpioInput::new(Input::new(p.PIN_8, Pull::Up)),
    ];
    let keypad = MatrixKeypad::new(rows, cols, Forever);

    // LCD: D0-D7 on GP10-GP17, RS on GP18, E on GP19
    let bus = PinBus::new([
        GpioOutput::new(Output::new(p.PIN_10, Level::Low)),
        GpioOutput::new(Output::new(p.PIN_11, Level::Low)),
        GpioOutput::new(Output::new(p.PIN_12, Level::Low)),
        GpioOutput::new(Output::new(p.PIN_13, Level::Low)),
        GpioOutput::new(Output::new(p.PIN_14, Level::Low)),
        GpioOutput::new(Output::new(p.PIN_15, Level::Low)),
        GpioOutput::new(Output::new(p.PIN_16, Level::Low)),
        GpioOutput::new(Output::new(p.PIN_17, Level::Low)),
    ]);
    let rs = GpioOutput::new(Output::new(p.PIN_18, Level::Low));
    let en = GpioOutput::new(Output::new(p.PIN_19, Level::Low));
    let display = Hd44780::new(bus, rs, en, Delay, DisplayTiming::from(&config.display));

    // Companion link: UART0 TX on GP0
    let line = UartConfig::new(config.serial.baudrate, config.serial.crystal_hz);
    let tx = UartTx::new_blocking(p.UART0, p.PIN_0, rp_uart_config(&line));
    let link = SerialTransmitter::new(IoSerial::new(tx), Forever, line);
    info!("Serial link at {} baud", line.baudrate);

    let mut kiosk = Kiosk::new(display, keypad, link, &config);

    if let Err(e) = kiosk.boot() {
        error!("Boot failed: {}", e);
        park();
    }
    info!("Welcome screen shown, polling keypad");

    loop {
        match kiosk.step() {
            Ok((key, action)) => {
                if action.command.launches_test() {
                    info!("Key {} -> {} (test launched)", key.label(), action.command);
                } else {
                    info!("Key {} -> {}", key.label(), action.command);
                }
            }
            Err(e) => {
                error!("Kiosk stopped: {}", e);
                park();
            }
        }
    }
}

/// Parse the embedded kiosk.toml, falling back to built-in defaults
fn load_config() -> KioskConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Using embedded kiosk.toml");
            config
        }
        Err(e) => {
            error!("kiosk.toml rejected: {}, using defaults", e);
            KioskConfig::default()
        }
    }
}

/// Stop doing anything; the debug probe still sees the logs
fn park() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}
