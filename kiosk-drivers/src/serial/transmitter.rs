//! Polled serial transmitter
//!
//! One byte at a time: load the transmit buffer, spin on the
//! transmission-complete flag, clear it. No buffering, no interrupts, no
//! flow control. With the production wait policy a receiver that never
//! lets the byte out stalls the caller.

use kiosk_core::traits::CommandLink;
use kiosk_core::Command;
use kiosk_hal::uart::{SerialPort, UartConfig, UartError};
use kiosk_hal::wait::WaitPolicy;

/// Transmit error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransmitError<E> {
    /// Baud rate cannot be generated
    Baud(UartError),
    /// Transmission-complete flag never set
    Wait(E),
}

/// Transmit-only serial link over a [`SerialPort`]
pub struct SerialTransmitter<P, W> {
    port: P,
    wait: W,
    config: UartConfig,
}

impl<P, W> SerialTransmitter<P, W>
where
    P: SerialPort,
    W: WaitPolicy,
{
    /// Create a transmitter; the port is not touched until [`initialize`]
    ///
    /// [`initialize`]: CommandLink::initialize
    pub fn new(port: P, wait: W, config: UartConfig) -> Self {
        Self { port, wait, config }
    }

    /// Underlying port
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Program the baud-rate timer and enable the transmitter
    pub fn configure(&mut self) -> Result<(), TransmitError<W::Error>> {
        let reload = self.config.timer_reload().map_err(TransmitError::Baud)?;
        self.port.configure(&self.config, reload);
        Ok(())
    }

    /// Send one byte and wait until it has left the shift register
    pub fn send_byte(&mut self, byte: u8) -> Result<(), TransmitError<W::Error>> {
        self.port.load(byte);
        let port = &mut self.port;
        self.wait
            .wait_until(|| port.tx_complete())
            .map_err(TransmitError::Wait)?;
        self.port.clear_tx_complete();
        Ok(())
    }

    /// Send every byte of `text`
    pub fn send_str(&mut self, text: &str) -> Result<(), TransmitError<W::Error>> {
        text.bytes().try_for_each(|byte| self.send_byte(byte))
    }

    /// Release the port and wait policy
    pub fn release(self) -> (P, W) {
        (self.port, self.wait)
    }
}

impl<P, W> CommandLink for SerialTransmitter<P, W>
where
    P: SerialPort,
    W: WaitPolicy,
{
    type Error = TransmitError<W::Error>;

    fn initialize(&mut self) -> Result<(), Self::Error> {
        self.configure()
    }

    fn send_command(&mut self, command: &Command) -> Result<(), Self::Error> {
        self.send_str(&command.to_line())
    }
}
