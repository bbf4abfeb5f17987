//! Kiosk Serial Command Protocol
//!
//! This crate defines the transmit-only serial protocol from the kiosk to
//! the companion device that runs the visual tests. The protocol is plain
//! ASCII, one command per newline-terminated line, with no framing,
//! acknowledgement or retry.
//!
//! # Vocabulary
//!
//! ```text
//! CMD:CATARACT      launch the cataract test
//! CMD:GLARE         launch the glare test
//! CMD:LOWCONTRAST   launch the low-contrast test
//! CMD:MENU          menu key pressed
//! CMD:RESTART       exit / restart key pressed
//! DBG:<digit>       unassigned digit key pressed
//! ```
//!
//! The kiosk only encodes. [`LineParser`] and [`Command::parse`] are the
//! companion side of the same vocabulary.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod line;

pub use command::{Command, Line, LINE_TERMINATOR, MAX_LINE_LEN};
pub use line::{LineError, LineParser};
