//! Configuration types

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dispatch::{display_line, DisplayLine, LCD_ROWS};

/// Default welcome text, line 1
pub const DEFAULT_WELCOME_FIRST: &str = "KIOSK WELCOMES";

/// Default welcome text, line 2
pub const DEFAULT_WELCOME_SECOND: &str = "TEST YOUR EYE";

/// Complete kiosk configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KioskConfig {
    /// Character display settings
    pub display: DisplayConfig,
    /// Serial link settings
    pub serial: SerialConfig,
}

/// Character display settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Greeting shown after boot (line 1, line 2)
    pub welcome: [DisplayLine; LCD_ROWS],
    /// Settle time held between strobe edges, in microseconds
    pub settle_us: u32,
    /// Delay before the first instruction after power-on, in microseconds
    pub power_on_delay_us: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            welcome: [
                display_line(DEFAULT_WELCOME_FIRST),
                display_line(DEFAULT_WELCOME_SECOND),
            ],
            settle_us: 1_000,
            power_on_delay_us: 1_000,
        }
    }
}

/// Serial link settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SerialConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Crystal frequency feeding the baud-rate generator, in Hz
    pub crystal_hz: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baudrate: 9_600,
            crystal_hz: 11_059_200,
        }
    }
}
