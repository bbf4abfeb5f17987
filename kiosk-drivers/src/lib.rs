//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the peripheral traits
//! defined in kiosk-core, written against the kiosk-hal pin and register
//! traits:
//!
//! - HD44780 character display on an 8-bit parallel bus
//! - 4x3 matrix keypad with hold-to-release debounce
//! - Transmit-only serial link

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod display;
pub mod keypad;
pub mod serial;

pub use display::Hd44780;
pub use keypad::MatrixKeypad;
pub use serial::{SerialTransmitter, TransmitError};
