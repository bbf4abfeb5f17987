//! Keypad scanner trait

use crate::keypad::KeyCode;

/// Source of debounced key presses
pub trait KeyScanner {
    /// Error from the scanner (for example a bounded release wait expiring)
    type Error;

    /// Scan the keypad once
    ///
    /// Returns `Ok(Some(key))` for a key that has been pressed and
    /// released, or `Ok(None)` if no key is down. A pressed key is reported
    /// at most once per call, and only after it is released.
    fn scan(&mut self) -> Result<Option<KeyCode>, Self::Error>;
}
