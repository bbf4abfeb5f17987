//! Peripheral traits
//!
//! These traits define the interface between the main loop and the
//! hardware-specific drivers in `kiosk-drivers`.

pub mod display;
pub mod keypad;
pub mod link;

pub use display::{CharacterDisplay, DisplayExt, DisplayRow};
pub use keypad::KeyScanner;
pub use link::CommandLink;
