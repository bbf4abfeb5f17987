//! Key-to-action dispatch table
//!
//! Each key maps to a fixed action: two lines of display feedback and one
//! command line for the companion device. The table is a pure function so
//! it can be tested without any hardware; the [`Kiosk`](crate::Kiosk)
//! runner applies the action to the peripherals.

use core::fmt::Write;

use heapless::String;
use kiosk_protocol::Command;

use crate::keypad::KeyCode;

/// Display width in characters
pub const LCD_COLS: usize = 16;

/// Number of display lines
pub const LCD_ROWS: usize = 2;

/// One line of display text
pub type DisplayLine = String<LCD_COLS>;

const LOADING: &str = "Loading...";

/// Feedback and command for one key press
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Action {
    /// Text for display line 1 and line 2
    pub lines: [DisplayLine; LCD_ROWS],
    /// Command sent to the companion device
    pub command: Command,
}

impl Action {
    /// Look up the action for a key
    pub fn for_key(key: KeyCode) -> Self {
        match key {
            KeyCode::One => Self::new("CATARACT TEST", LOADING, Command::Cataract),
            KeyCode::Two => Self::new("GLARE TEST", LOADING, Command::Glare),
            KeyCode::Three => Self::new("LOW CONTRAST", LOADING, Command::LowContrast),
            KeyCode::Star => Self::new("MENU SELECTED", "Press 1, 2, or 3", Command::Menu),
            KeyCode::Pound => Self::new("EXIT/RESTART", "KIOSK WELCOMES", Command::Restart),
            other => Self::debug(other),
        }
    }

    /// Line 1 text
    pub fn first_line(&self) -> &str {
        &self.lines[0]
    }

    /// Line 2 text
    pub fn second_line(&self) -> &str {
        &self.lines[1]
    }

    fn new(first: &str, second: &str, command: Command) -> Self {
        Self {
            lines: [display_line(first), display_line(second)],
            command,
        }
    }

    /// Unassigned keys echo the key and report it for debugging
    fn debug(key: KeyCode) -> Self {
        let label = key.label();
        let mut first = DisplayLine::new();
        let _ = write!(first, "Input: {}", label);

        Self {
            lines: [first, display_line("Error/Debug key.")],
            command: Command::Debug(key.as_u8()),
        }
    }
}

/// Build a display line, truncated to the display width
pub fn display_line(text: &str) -> DisplayLine {
    let mut line = DisplayLine::new();
    for ch in text.chars().take(LCD_COLS) {
        if line.push(ch).is_err() {
            break;
        }
    }
    line
}
