//! UART serial transmit abstractions
//!
//! The kiosk only ever transmits. The trait models the transmit side of a
//! classic microcontroller UART: a one-byte transmit buffer, a
//! "transmission complete" flag that software must clear, and a baud-rate
//! generator driven by an 8-bit auto-reload timer.

/// Errors from UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartError {
    /// The baud rate cannot be produced by an 8-bit reload at this clock
    UnsupportedBaud,
    /// The closest achievable rate deviates more than 2% from the request
    BaudErrorTooLarge,
}

/// UART transmit register model
pub trait SerialPort {
    /// Program the baud-rate timer with `reload`, start it, and put the
    /// controller into 8-bit transmit mode per `config`
    fn configure(&mut self, config: &UartConfig, reload: u8);

    /// Load a byte into the transmit buffer, starting transmission
    fn load(&mut self, byte: u8);

    /// Check the transmission-complete flag
    fn tx_complete(&mut self) -> bool;

    /// Clear the transmission-complete flag for the next byte
    fn clear_tx_complete(&mut self);
}

/// Maximum tolerated baud-rate error in parts per thousand
pub const MAX_BAUD_ERROR_PERMILLE: u32 = 20;

/// Timer clocks per serial bit in auto-reload mode (12 clocks per machine
/// cycle, 32 timer overflows per bit with SMOD = 0)
const CLOCKS_PER_RELOAD_STEP: u64 = 12 * 32;

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Crystal frequency feeding the baud-rate timer in Hz
    pub clock_hz: u32,
    /// Number of data bits (always 8 for the kiosk)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 9600,
            clock_hz: 11_059_200,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl UartConfig {
    /// Config for `baudrate` at the given timer clock, 8N1
    pub fn new(baudrate: u32, clock_hz: u32) -> Self {
        Self {
            baudrate,
            clock_hz,
            ..Self::default()
        }
    }

    /// Compute the 8-bit auto-reload value for the baud-rate timer
    ///
    /// `baud = clock / (384 * (256 - reload))`
    pub fn timer_reload(&self) -> Result<u8, UartError> {
        if self.baudrate == 0 {
            return Err(UartError::UnsupportedBaud);
        }

        let step = CLOCKS_PER_RELOAD_STEP * self.baudrate as u64;
        // Round to the nearest divisor
        let divisor = (self.clock_hz as u64 + step / 2) / step;
        if divisor == 0 || divisor > 256 {
            return Err(UartError::UnsupportedBaud);
        }

        let actual = self.clock_hz as u64 / (CLOCKS_PER_RELOAD_STEP * divisor);
        let error_permille = actual.abs_diff(self.baudrate as u64) * 1000 / self.baudrate as u64;
        if error_permille > MAX_BAUD_ERROR_PERMILLE as u64 {
            return Err(UartError::BaudErrorTooLarge);
        }

        Ok((256 - divisor) as u8)
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Eight,
    Nine,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}
