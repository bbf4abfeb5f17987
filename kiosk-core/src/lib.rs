//! Board-agnostic core logic for the eye-test kiosk
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Key codes and the 4x3 keypad layout
//! - The key-to-action dispatch table
//! - Peripheral traits (display, keypad, command link)
//! - The main-loop state machine and the [`Kiosk`] runner
//! - Configuration types and the embedded config parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod dispatch;
pub mod keypad;
pub mod kiosk;
pub mod state;
pub mod traits;

pub use dispatch::{Action, DisplayLine, LCD_COLS, LCD_ROWS};
pub use keypad::{KeyCode, KEYMAP, KEYPAD_COLS, KEYPAD_ROWS};
pub use kiosk::{Kiosk, KioskError};
pub use kiosk_protocol::Command;
