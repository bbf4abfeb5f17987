//! Command lines sent from the kiosk to the companion device

use core::fmt::{self, Write};

use heapless::String;

/// Maximum line length in bytes, terminator included
pub const MAX_LINE_LEN: usize = 32;

/// Every line ends with a single newline
pub const LINE_TERMINATOR: char = '\n';

/// One encoded wire line
pub type Line = String<MAX_LINE_LEN>;

const CMD_PREFIX: &str = "CMD:";
const DBG_PREFIX: &str = "DBG:";

/// A command emitted over the serial link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Launch the cataract (standard acuity) test
    Cataract,
    /// Launch the glare test
    Glare,
    /// Launch the low-contrast test
    LowContrast,
    /// Menu key pressed
    Menu,
    /// Exit/restart key pressed
    Restart,
    /// Unassigned digit key pressed (0-9)
    Debug(u8),
}

impl Command {
    /// Create a debug command for a single decimal digit
    pub fn debug(digit: u8) -> Option<Self> {
        (digit <= 9).then_some(Command::Debug(digit))
    }

    /// Encode as a complete wire line, newline included
    pub fn to_line(&self) -> Line {
        let mut line = Line::new();
        // Longest line is "CMD:LOWCONTRAST\n", well under MAX_LINE_LEN
        let _ = write!(line, "{}{}", self, LINE_TERMINATOR);
        line
    }

    /// Parse one received line
    ///
    /// Surrounding whitespace (including the terminator) is ignored.
    /// Returns `None` for anything outside the vocabulary.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();

        if let Some(name) = line.strip_prefix(CMD_PREFIX) {
            return match name {
                "CATARACT" => Some(Command::Cataract),
                "GLARE" => Some(Command::Glare),
                "LOWCONTRAST" => Some(Command::LowContrast),
                "MENU" => Some(Command::Menu),
                "RESTART" => Some(Command::Restart),
                _ => None,
            };
        }

        let digit = line.strip_prefix(DBG_PREFIX)?;
        match digit.as_bytes() {
            [d @ b'0'..=b'9'] => Some(Command::Debug(d - b'0')),
            _ => None,
        }
    }

    /// Returns true if the companion should start a visual test
    pub fn launches_test(&self) -> bool {
        matches!(self, Self::Cataract | Self::Glare | Self::LowContrast)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Cataract => write!(f, "{}CATARACT", CMD_PREFIX),
            Command::Glare => write!(f, "{}GLARE", CMD_PREFIX),
            Command::LowContrast => write!(f, "{}LOWCONTRAST", CMD_PREFIX),
            Command::Menu => write!(f, "{}MENU", CMD_PREFIX),
            Command::Restart => write!(f, "{}RESTART", CMD_PREFIX),
            Command::Debug(digit) => write!(f, "{}{}", DBG_PREFIX, digit),
        }
    }
}
