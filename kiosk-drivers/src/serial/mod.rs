//! Serial links

pub mod transmitter;

pub use transmitter::{SerialTransmitter, TransmitError};
