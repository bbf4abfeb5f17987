//! Polled serial port on an RP2040 UART
//!
//! The RP2040 UART has a FIFO and a fractional baud generator rather than
//! the single transmit register and reload timer `kiosk_hal::SerialPort`
//! models. The adapter maps the model onto a blocking `embedded-io`
//! writer: loading a byte writes it, and "transmission complete" is a
//! successful flush. Baud rate is fixed when the peripheral is created,
//! from the same [`UartConfig`].

use embassy_rp::uart;
use embedded_io::Write;
use kiosk_hal::uart::{DataBits, Parity, SerialPort, StopBits, UartConfig};

/// UART peripheral identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartId {
    Uart0,
    Uart1,
}

/// Determine which UART can transmit on a given GPIO
pub fn tx_pin_uart(gpio: u8) -> Option<UartId> {
    match gpio {
        0 | 12 | 16 | 28 => Some(UartId::Uart0),
        4 | 8 | 20 | 24 => Some(UartId::Uart1),
        _ => None,
    }
}

/// Translate the kiosk line settings into an RP2040 UART config
pub fn rp_uart_config(config: &UartConfig) -> uart::Config {
    let mut rp = uart::Config::default();
    rp.baudrate = config.baudrate;
    rp.data_bits = match config.data_bits {
        // The RP2040 has no 9-bit mode; the ninth bit is dropped
        DataBits::Eight | DataBits::Nine => uart::DataBits::DataBits8,
    };
    rp.parity = match config.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    rp.stop_bits = match config.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    rp
}

/// [`SerialPort`] over a blocking writer
///
/// A failed write leaves the complete flag down for good, so the
/// transmitter's wait never finishes: a broken link hangs like an absent
/// receiver would.
pub struct IoSerial<T> {
    tx: T,
    pending: bool,
    complete: bool,
    failed: bool,
}

impl<T: Write> IoSerial<T> {
    /// Wrap a writer that is already configured for the line settings
    pub fn new(tx: T) -> Self {
        Self {
            tx,
            pending: false,
            complete: false,
            failed: false,
        }
    }

    /// Returns true once a write or flush has failed
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    /// Unwrap the writer
    pub fn into_inner(self) -> T {
        self.tx
    }
}

impl<T: Write> SerialPort for IoSerial<T> {
    fn configure(&mut self, _config: &UartConfig, _reload: u8) {
        // Baud divisors are programmed when the UART is created
    }

    fn load(&mut self, byte: u8) {
        if self.failed {
            return;
        }
        match self.tx.write_all(&[byte]) {
            Ok(()) => self.pending = true,
            Err(_) => self.failed = true,
        }
    }

    fn tx_complete(&mut self) -> bool {
        if self.pending && !self.failed {
            match self.tx.flush() {
                Ok(()) => self.complete = true,
                Err(_) => self.failed = true,
            }
            self.pending = false;
        }
        self.complete
    }

    fn clear_tx_complete(&mut self) {
        self.complete = false;
    }
}
