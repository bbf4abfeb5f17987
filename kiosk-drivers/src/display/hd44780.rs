//! HD44780 character LCD driver
//!
//! Drives a 2x16 HD44780-compatible display over an 8-bit parallel bus
//! with a register-select line and an enable strobe. The read/write line
//! is tied to ground: the busy flag is never read, so every transfer is
//! followed by a fixed settle delay instead.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use kiosk_core::config::DisplayConfig;
use kiosk_core::traits::{CharacterDisplay, DisplayRow};
use kiosk_hal::gpio::{OutputBus, OutputPin};

/// HD44780 instructions
#[allow(dead_code)]
pub mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const RETURN_HOME: u8 = 0x02;

    pub const ENTRY_MODE: u8 = 0x04;
    pub const ENTRY_INCREMENT: u8 = 0x02;

    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const DISPLAY_ON: u8 = 0x04;
    pub const CURSOR_ON: u8 = 0x02;
    pub const BLINK_ON: u8 = 0x01;

    pub const FUNCTION_SET: u8 = 0x20;
    pub const EIGHT_BIT_BUS: u8 = 0x10;
    pub const TWO_LINES: u8 = 0x08;

    pub const SET_DDRAM_ADDR: u8 = 0x80;
    /// DDRAM address of the first cell of line 2
    pub const LINE2_ADDR: u8 = 0x40;
}

/// Power-on instruction sequence
///
/// 8-bit bus, 2 lines, 5x7 font; display on with cursor and blink off;
/// clear; increment without shift; cursor to line 1.
pub const INIT_SEQUENCE: [u8; 5] = [
    cmd::FUNCTION_SET | cmd::EIGHT_BIT_BUS | cmd::TWO_LINES,
    cmd::DISPLAY_CONTROL | cmd::DISPLAY_ON,
    cmd::CLEAR,
    cmd::ENTRY_MODE | cmd::ENTRY_INCREMENT,
    cmd::SET_DDRAM_ADDR,
];

/// Delays used by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayTiming {
    /// Enable pulse width, long enough for the slowest instruction
    pub settle_us: u32,
    /// Wait before the first instruction after power-on
    pub power_on_delay_us: u32,
}

impl Default for DisplayTiming {
    fn default() -> Self {
        Self {
            settle_us: 1000,
            power_on_delay_us: 1000,
        }
    }
}

impl From<&DisplayConfig> for DisplayTiming {
    fn from(config: &DisplayConfig) -> Self {
        Self {
            settle_us: config.settle_us,
            power_on_delay_us: config.power_on_delay_us,
        }
    }
}

/// Register selected by the RS line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Register {
    Instruction,
    Data,
}

/// HD44780 driver over an 8-bit bus
pub struct Hd44780<B, RS, EN, D> {
    bus: B,
    rs: RS,
    en: EN,
    delay: D,
    timing: DisplayTiming,
}

impl<B, RS, EN, D> Hd44780<B, RS, EN, D>
where
    B: OutputBus,
    RS: OutputPin,
    EN: OutputPin,
    D: DelayNs,
{
    /// Create a driver and park the enable line low
    pub fn new(bus: B, rs: RS, mut en: EN, delay: D, timing: DisplayTiming) -> Self {
        en.set_low();
        Self {
            bus,
            rs,
            en,
            delay,
            timing,
        }
    }

    /// Send one byte to the instruction register
    pub fn send_instruction(&mut self, instruction: u8) {
        self.write(Register::Instruction, instruction);
    }

    /// Send one byte to the data register (a character at the cursor)
    pub fn send_data(&mut self, data: u8) {
        self.write(Register::Data, data);
    }

    /// Release the bus, control lines and delay
    pub fn release(self) -> (B, RS, EN, D) {
        (self.bus, self.rs, self.en, self.delay)
    }

    /// Present a byte and strobe it in; the display latches on the falling edge
    fn write(&mut self, register: Register, byte: u8) {
        self.bus.write(byte);
        self.rs.set_state(register == Register::Data);
        self.en.set_high();
        self.delay.delay_us(self.timing.settle_us);
        self.en.set_low();
    }
}

impl<B, RS, EN, D> CharacterDisplay for Hd44780<B, RS, EN, D>
where
    B: OutputBus,
    RS: OutputPin,
    EN: OutputPin,
    D: DelayNs,
{
    type Error = Infallible;

    fn initialize(&mut self) -> Result<(), Infallible> {
        self.delay.delay_us(self.timing.power_on_delay_us);
        for instruction in INIT_SEQUENCE {
            self.send_instruction(instruction);
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Infallible> {
        self.send_instruction(cmd::CLEAR);
        Ok(())
    }

    fn set_cursor(&mut self, row: DisplayRow) -> Result<(), Infallible> {
        let addr = match row {
            DisplayRow::First => 0x00,
            DisplayRow::Second => cmd::LINE2_ADDR,
        };
        self.send_instruction(cmd::SET_DDRAM_ADDR | addr);
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), Infallible> {
        for byte in text.bytes() {
            self.send_data(byte);
        }
        Ok(())
    }
}
