//! State machine definition
//!
//! All display and serial output is a function of the current state and
//! an event.

use super::events::KioskEvent;
use crate::keypad::KeyCode;

/// Kiosk states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KioskState {
    /// Power-on, drivers not yet initialized
    #[default]
    Init,
    /// Drivers ready, greeting not yet shown
    Welcome,
    /// Scanning the keypad
    Poll,
    /// Showing and sending the action for a key
    Dispatch(KeyCode),
}

impl KioskState {
    /// Check if the keypad is being scanned in this state
    pub fn accepts_keys(&self) -> bool {
        matches!(self, KioskState::Poll)
    }

    /// Check if boot has finished
    pub fn is_running(&self) -> bool {
        matches!(self, KioskState::Poll | KioskState::Dispatch(_))
    }

    /// Key being dispatched, if any
    pub fn pending_key(&self) -> Option<KeyCode> {
        match self {
            KioskState::Dispatch(key) => Some(*key),
            _ => None,
        }
    }

    /// Process an event and return the next state
    ///
    /// Events that do not apply to the current state leave it unchanged.
    pub fn transition(self, event: KioskEvent) -> Self {
        use KioskEvent::*;
        use KioskState::*;

        match (self, event) {
            (Init, DriversReady) => Welcome,
            (Welcome, GreetingShown) => Poll,

            (Poll, NoKey) => Poll,
            (Poll, KeyPressed(key)) => Dispatch(key),

            (Dispatch(_), Dispatched) => Poll,

            (state, _) => state,
        }
    }
}
