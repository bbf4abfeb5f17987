//! GPIO adapters and allocation
//!
//! Wraps `embedded-hal` 1.0 pins whose operations cannot fail (the RP2040
//! `Output`/`Input` types) so they implement the `kiosk-hal` pin traits,
//! and tracks which GPIOs the board map has claimed.

use core::convert::Infallible;

use heapless::FnvIndexSet;
use kiosk_hal::gpio::{InputPin, OutputPin};

/// Maximum number of GPIO pins on RP2040
pub const GPIO_COUNT: usize = 30;

/// Output pin adapter
pub struct GpioOutput<P>(P);

impl<P> GpioOutput<P>
where
    P: embedded_hal::digital::OutputPin<Error = Infallible>,
{
    /// Wrap an output pin
    pub fn new(pin: P) -> Self {
        Self(pin)
    }

    /// Unwrap the pin
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P> OutputPin for GpioOutput<P>
where
    P: embedded_hal::digital::OutputPin<Error = Infallible>,
{
    fn set_high(&mut self) {
        self.0.set_high().unwrap_or_else(|e| match e {});
    }

    fn set_low(&mut self) {
        self.0.set_low().unwrap_or_else(|e| match e {});
    }
}

/// Input pin adapter
pub struct GpioInput<P>(P);

impl<P> GpioInput<P>
where
    P: embedded_hal::digital::InputPin<Error = Infallible>,
{
    /// Wrap an input pin
    pub fn new(pin: P) -> Self {
        Self(pin)
    }

    /// Unwrap the pin
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P> InputPin for GpioInput<P>
where
    P: embedded_hal::digital::InputPin<Error = Infallible>,
{
    fn is_high(&mut self) -> bool {
        self.0.is_high().unwrap_or_else(|e| match e {})
    }
}

/// Error when claiming a GPIO
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already claimed
    AlreadyTaken,
}

/// GPIO allocator to track pin usage
pub struct GpioAllocator {
    /// Set of allocated GPIO pins
    allocated: FnvIndexSet<u8, 32>,
}

impl Default for GpioAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioAllocator {
    /// Create an empty allocator
    pub fn new() -> Self {
        Self {
            allocated: FnvIndexSet::new(),
        }
    }

    /// Claim a GPIO pin
    pub fn allocate(&mut self, pin: u8) -> Result<(), PinError> {
        if pin as usize >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        if self.allocated.contains(&pin) {
            return Err(PinError::AlreadyTaken);
        }
        self.allocated
            .insert(pin)
            .map_err(|_| PinError::InvalidPin)?;
        Ok(())
    }

    /// Claim every pin in `pins`
    pub fn allocate_all(&mut self, pins: &[u8]) -> Result<(), PinError> {
        pins.iter().try_for_each(|&pin| self.allocate(pin))
    }

    /// Check if a pin is allocated
    pub fn is_allocated(&self, pin: u8) -> bool {
        self.allocated.contains(&pin)
    }

    /// Number of allocated pins
    pub fn allocated_count(&self) -> usize {
        self.allocated.len()
    }
}
