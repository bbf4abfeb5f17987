//! Simple TOML parser for kiosk configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `kiosk.toml`. It does NOT support full TOML and needs no
//! allocator.
//!
//! Supported features:
//! - `[display]` and `[serial]` section headers
//! - Key = value pairs (string, integer with optional `_` separators)
//! - Comments (# ...), full-line or trailing
//!
//! NOT supported:
//! - Escapes inside strings, literal ('...') strings
//! - Hex, octal and binary integers
//! - Arrays, inline tables, floats, booleans, datetimes
//!
//! `kiosk-firmware/build.rs` runs this parser over `kiosk.toml`, so a
//! file using any of these fails the build rather than the boot.
//!
//! Keys that are absent keep their default value.

use crate::dispatch::{DisplayLine, LCD_COLS};

use super::types::KioskConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in its section
    UnknownKey,
    /// Line is not `key = value`
    InvalidLine,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Display text longer than the display width
    TextTooLong,
    /// Display text with characters the display cannot show
    NonAsciiText,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    Serial,
}

/// Parse TOML configuration into KioskConfig
pub fn parse_config(input: &str) -> Result<KioskConfig, ParseError> {
    let mut config = KioskConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

/// Parse a section header like "[display]"
fn parse_section_header(line: &str) -> Result<Section, ParseError> {
    let header = strip_comment(line)
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or(ParseError::InvalidSection)?;

    match header.trim() {
        "display" => Ok(Section::Display),
        "serial" => Ok(Section::Serial),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Split `key = value`, both trimmed
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut KioskConfig,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Display, "welcome_line1") => {
            config.display.welcome[0] = parse_display_text(value)?;
        }
        (Section::Display, "welcome_line2") => {
            config.display.welcome[1] = parse_display_text(value)?;
        }
        (Section::Display, "settle_us") => {
            // The display needs a non-zero enable pulse to latch
            let us = parse_u32(value)?;
            if us == 0 {
                return Err(ParseError::InvalidValue);
            }
            config.display.settle_us = us;
        }
        (Section::Display, "power_on_delay_us") => {
            config.display.power_on_delay_us = parse_u32(value)?;
        }
        (Section::Serial, "baudrate") => {
            let baud = parse_u32(value)?;
            if baud == 0 {
                return Err(ParseError::InvalidValue);
            }
            config.serial.baudrate = baud;
        }
        (Section::Serial, "crystal_hz") => {
            let hz = parse_u32(value)?;
            if hz == 0 {
                return Err(ParseError::InvalidValue);
            }
            config.serial.crystal_hz = hz;
        }
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

/// Drop a trailing `# comment` from a non-string value
fn strip_comment(value: &str) -> &str {
    match value.find('#') {
        Some(idx) => value[..idx].trim(),
        None => value.trim(),
    }
}

/// Parse a double-quoted string, allowing a trailing comment
fn parse_string(value: &str) -> Result<&str, ParseError> {
    let rest = value.strip_prefix('"').ok_or(ParseError::InvalidValue)?;
    let end = rest.find('"').ok_or(ParseError::InvalidValue)?;

    let trailing = rest[end + 1..].trim();
    if !trailing.is_empty() && !trailing.starts_with('#') {
        return Err(ParseError::InvalidValue);
    }

    Ok(&rest[..end])
}

fn parse_display_text(value: &str) -> Result<DisplayLine, ParseError> {
    let text = parse_string(value)?;
    if !text.bytes().all(|b| (0x20..0x7F).contains(&b)) {
        return Err(ParseError::NonAsciiText);
    }
    if text.len() > LCD_COLS {
        return Err(ParseError::TextTooLong);
    }

    let mut line = DisplayLine::new();
    line.push_str(text).map_err(|_| ParseError::TextTooLong)?;
    Ok(line)
}

/// Parse an unsigned integer, allowing `_` digit separators
fn parse_u32(value: &str) -> Result<u32, ParseError> {
    let digits = strip_comment(value);
    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') {
        return Err(ParseError::InvalidValue);
    }

    let mut result: u32 = 0;
    for ch in digits.chars() {
        if ch == '_' {
            continue;
        }
        let digit = ch.to_digit(10).ok_or(ParseError::InvalidValue)?;
        result = result
            .checked_mul(10)
            .and_then(|r| r.checked_add(digit))
            .ok_or(ParseError::InvalidValue)?;
    }
    Ok(result)
}
