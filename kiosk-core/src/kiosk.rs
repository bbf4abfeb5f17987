//! Main polling loop
//!
//! [`Kiosk`] owns the three peripherals and drives them through the
//! [`KioskState`] machine: initialize, greet, then scan and dispatch
//! forever. Every wait inside the peripherals is a busy-wait; the loop
//! itself never sleeps.

use core::convert::Infallible;

use crate::config::KioskConfig;
use crate::dispatch::{Action, DisplayLine, LCD_ROWS};
use crate::keypad::KeyCode;
use crate::state::{KioskEvent, KioskState};
use crate::traits::{CharacterDisplay, CommandLink, DisplayExt, KeyScanner};

/// Error from one of the kiosk peripherals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KioskError<D, K, L> {
    /// Display driver failed
    Display(D),
    /// Keypad scanner failed
    Keypad(K),
    /// Command link failed
    Link(L),
}

/// Result alias for kiosk operations over a given peripheral set
pub type KioskResult<T, D, K, L> = Result<
    T,
    KioskError<
        <D as CharacterDisplay>::Error,
        <K as KeyScanner>::Error,
        <L as CommandLink>::Error,
    >,
>;

/// The kiosk main loop
pub struct Kiosk<D, K, L> {
    display: D,
    keypad: K,
    link: L,
    welcome: [DisplayLine; LCD_ROWS],
    state: KioskState,
}

impl<D, K, L> Kiosk<D, K, L>
where
    D: CharacterDisplay,
    K: KeyScanner,
    L: CommandLink,
{
    /// Create a kiosk from its peripherals
    ///
    /// Nothing touches the hardware until [`Kiosk::boot`].
    pub fn new(display: D, keypad: K, link: L, config: &KioskConfig) -> Self {
        Self {
            display,
            keypad,
            link,
            welcome: config.display.welcome.clone(),
            state: KioskState::Init,
        }
    }

    /// Current state
    pub fn state(&self) -> KioskState {
        self.state
    }

    /// Initialize the display and the serial link, then show the greeting
    pub fn boot(&mut self) -> KioskResult<(), D, K, L> {
        self.display.initialize().map_err(KioskError::Display)?;
        self.link.initialize().map_err(KioskError::Link)?;
        self.state = self.state.transition(KioskEvent::DriversReady);

        // Init leaves the cursor at the start of line 1
        let [first, second] = &self.welcome;
        self.display
            .write_lines(first, second)
            .map_err(KioskError::Display)?;
        self.state = self.state.transition(KioskEvent::GreetingShown);

        Ok(())
    }

    /// Scan the keypad once
    pub fn poll(&mut self) -> KioskResult<Option<KeyCode>, D, K, L> {
        let key = self.keypad.scan().map_err(KioskError::Keypad)?;
        let event = match key {
            Some(key) => KioskEvent::KeyPressed(key),
            None => KioskEvent::NoKey,
        };
        self.state = self.state.transition(event);
        Ok(key)
    }

    /// Scan until a key is pressed and released
    ///
    /// There is no timeout: with nobody at the keypad this spins forever.
    pub fn wait_for_key(&mut self) -> KioskResult<KeyCode, D, K, L> {
        loop {
            if let Some(key) = self.poll()? {
                return Ok(key);
            }
        }
    }

    /// Show and send the action for `key`
    ///
    /// The display is updated before the command goes out. Returns the
    /// action that was applied.
    pub fn dispatch(&mut self, key: KeyCode) -> KioskResult<Action, D, K, L> {
        let action = Action::for_key(key);

        self.display
            .show(action.first_line(), action.second_line())
            .map_err(KioskError::Display)?;
        self.link
            .send_command(&action.command)
            .map_err(KioskError::Link)?;

        self.state = self.state.transition(KioskEvent::Dispatched);
        Ok(action)
    }

    /// Wait for one key press and dispatch it
    pub fn step(&mut self) -> KioskResult<(KeyCode, Action), D, K, L> {
        let key = self.wait_for_key()?;
        let action = self.dispatch(key)?;
        Ok((key, action))
    }

    /// Boot, then poll and dispatch forever
    ///
    /// Only returns if a peripheral reports an error.
    pub fn run(&mut self) -> KioskResult<Infallible, D, K, L> {
        self.boot()?;
        loop {
            self.step()?;
        }
    }

    /// Display driver
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Keypad scanner
    pub fn keypad(&self) -> &K {
        &self.keypad
    }

    /// Command link
    pub fn link(&self) -> &L {
        &self.link
    }

    /// Consume the kiosk and return its peripherals
    pub fn into_parts(self) -> (D, K, L) {
        (self.display, self.keypad, self.link)
    }
}
