//! RP2040 bindings for the kiosk controller
//!
//! This crate connects RP2040 peripherals to the `kiosk-hal` traits:
//! - GPIO adapters over `embedded-hal` 1.0 pins
//! - A polled serial port over a blocking `embedded-io` writer
//! - The board pin map and its allocation check

#![no_std]

pub mod board;
pub mod gpio;
pub mod uart;

pub use board::{BoardPins, KIOSK_PINS};
pub use gpio::{GpioInput, GpioOutput};
pub use uart::{rp_uart_config, IoSerial};
