//! Command link trait

use kiosk_protocol::Command;

/// Outbound serial link to the companion device
pub trait CommandLink {
    /// Error from the link
    type Error;

    /// Configure and start the link
    fn initialize(&mut self) -> Result<(), Self::Error>;

    /// Send one command as a newline-terminated line
    fn send_command(&mut self, command: &Command) -> Result<(), Self::Error>;
}
