//! Kiosk Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the kiosk drivers are
//! written against. Chip-specific crates (RP2040 today) implement them, and
//! host tests implement them with mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  kiosk-firmware / kiosk-core            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  kiosk-drivers (HD44780, keypad, UART)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  kiosk-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ kiosk-hal-    │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::OutputBus`] - Digital I/O
//! - [`uart::SerialPort`] - Transmit register model of a UART
//! - [`wait::WaitPolicy`] - Busy-wait on a hardware flag

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod uart;
pub mod wait;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputBus, OutputPin};
pub use uart::{SerialPort, UartConfig, UartError};
pub use wait::{Bounded, Forever, WaitPolicy, WaitTimeout};
