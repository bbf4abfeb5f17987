//! Kiosk board pin map
//!
//! ```text
//! GP0        UART0 TX  -> companion device
//! GP2..GP5   keypad rows 1-4 (outputs, idle high)
//! GP6..GP8   keypad columns 1-3 (inputs, pull-up)
//! GP10..GP17 LCD D0..D7
//! GP18       LCD RS
//! GP19       LCD E
//! ```
//!
//! The firmware takes the peripherals by name; this table records the
//! same wiring by number so it can be checked and logged.

use crate::gpio::{GpioAllocator, PinError};
use crate::uart::{tx_pin_uart, UartId};

/// GPIO assignment of every kiosk signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardPins {
    pub uart_tx: u8,
    pub rows: [u8; 4],
    pub cols: [u8; 3],
    pub lcd_data: [u8; 8],
    pub lcd_rs: u8,
    pub lcd_en: u8,
}

/// Wiring of the kiosk controller board
pub const KIOSK_PINS: BoardPins = BoardPins {
    uart_tx: 0,
    rows: [2, 3, 4, 5],
    cols: [6, 7, 8],
    lcd_data: [10, 11, 12, 13, 14, 15, 16, 17],
    lcd_rs: 18,
    lcd_en: 19,
};

/// Problem found in a pin map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardError {
    /// Two signals share a GPIO, or a GPIO does not exist
    Pin(PinError),
    /// The TX pin is not a UART transmit function
    NotUartTx,
}

impl BoardPins {
    /// Check that every signal has its own GPIO and the TX pin can
    /// transmit; returns the UART the TX pin belongs to
    pub fn validate(&self) -> Result<UartId, BoardError> {
        let mut alloc = GpioAllocator::new();
        alloc.allocate(self.uart_tx).map_err(BoardError::Pin)?;
        alloc.allocate_all(&self.rows).map_err(BoardError::Pin)?;
        alloc.allocate_all(&self.cols).map_err(BoardError::Pin)?;
        alloc.allocate_all(&self.lcd_data).map_err(BoardError::Pin)?;
        alloc.allocate(self.lcd_rs).map_err(BoardError::Pin)?;
        alloc.allocate(self.lcd_en).map_err(BoardError::Pin)?;

        tx_pin_uart(self.uart_tx).ok_or(BoardError::NotUartTx)
    }
}
