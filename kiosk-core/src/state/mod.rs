//! Main-loop state machine
//!
//! Defines the runtime behavior of the kiosk. The state machine is
//! explicit, finite, and deterministic; it has no terminal state.

pub mod events;
pub mod machine;

pub use events::KioskEvent;
pub use machine::KioskState;
