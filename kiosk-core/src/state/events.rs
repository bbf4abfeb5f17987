//! Events that trigger state transitions

use crate::keypad::KeyCode;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KioskEvent {
    // Boot events
    /// Display and serial link initialized
    DriversReady,
    /// Welcome text written to the display
    GreetingShown,

    // Polling events
    /// A scan found no key down
    NoKey,
    /// A scan returned a pressed-and-released key
    KeyPressed(KeyCode),

    // Dispatch events
    /// The key's action has been shown and sent
    Dispatched,
}

impl KioskEvent {
    /// Check if this event comes from the keypad scanner
    pub fn is_scan_event(&self) -> bool {
        matches!(self, KioskEvent::NoKey | KioskEvent::KeyPressed(_))
    }

    /// Check if this event is part of the boot sequence
    pub fn is_boot_event(&self) -> bool {
        matches!(self, KioskEvent::DriversReady | KioskEvent::GreetingShown)
    }
}
