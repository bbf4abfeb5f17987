//! Busy-wait policies
//!
//! Every blocking point in the kiosk (key release, transmit complete) is a
//! spin on a hardware flag. The spin itself is injected so that firmware can
//! wait forever while tests bound the number of polls.

use core::convert::Infallible;

/// Returned by a bounded wait that gave up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WaitTimeout;

/// Strategy for spinning on a readiness predicate
pub trait WaitPolicy {
    /// Error produced when the policy gives up
    type Error;

    /// Poll `ready` until it returns true
    fn wait_until<F>(&mut self, ready: F) -> Result<(), Self::Error>
    where
        F: FnMut() -> bool;
}

/// Spin until the flag is set, however long that takes
///
/// This is the production policy. A flag that never sets hangs the caller,
/// which is the intended failure mode of the kiosk.
#[derive(Debug, Clone, Copy, Default)]
pub struct Forever;

impl WaitPolicy for Forever {
    type Error = Infallible;

    fn wait_until<F>(&mut self, mut ready: F) -> Result<(), Infallible>
    where
        F: FnMut() -> bool,
    {
        while !ready() {
            core::hint::spin_loop();
        }
        Ok(())
    }
}

/// Spin at most `max_polls` times before giving up
#[derive(Debug, Clone, Copy)]
pub struct Bounded {
    max_polls: u32,
}

impl Bounded {
    /// Create a policy that polls the predicate at most `max_polls` times
    pub const fn new(max_polls: u32) -> Self {
        Self { max_polls }
    }

    /// Poll budget per wait
    pub fn max_polls(&self) -> u32 {
        self.max_polls
    }
}

impl Default for Bounded {
    fn default() -> Self {
        Self::new(10_000)
    }
}

impl WaitPolicy for Bounded {
    type Error = WaitTimeout;

    fn wait_until<F>(&mut self, mut ready: F) -> Result<(), WaitTimeout>
    where
        F: FnMut() -> bool,
    {
        for _ in 0..self.max_polls {
            if ready() {
                return Ok(());
            }
            core::hint::spin_loop();
        }
        Err(WaitTimeout)
    }
}
