//! Configuration
//!
//! Board-agnostic configuration types and the parser for the embedded
//! `kiosk.toml`.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError};
pub use types::*;
