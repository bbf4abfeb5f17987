//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins, plus an 8-bit
//! parallel output bus, that can be implemented by chip-specific HALs.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

/// Digital input pin
///
/// Reading takes `&mut self` so adapters over `embedded-hal` 1.0 pins
/// need no interior mutability.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&mut self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}

/// 8-bit parallel output bus
///
/// Places a whole byte on the bus at once. Bit 0 maps to line D0.
pub trait OutputBus {
    /// Drive the bus lines to `byte`
    fn write(&mut self, byte: u8);
}

/// Output bus made of eight individual pins
///
/// `pins[0]` carries bit 0 (D0), `pins[7]` carries bit 7 (D7).
pub struct PinBus<P> {
    pins: [P; 8],
}

impl<P: OutputPin> PinBus<P> {
    /// Create a bus from eight pins ordered D0..D7
    pub fn new(pins: [P; 8]) -> Self {
        Self { pins }
    }

    /// Release the pins
    pub fn into_pins(self) -> [P; 8] {
        self.pins
    }
}

impl<P: OutputPin> OutputBus for PinBus<P> {
    fn write(&mut self, byte: u8) {
        for (bit, pin) in self.pins.iter_mut().enumerate() {
            pin.set_state(byte & (1 << bit) != 0);
        }
    }
}
