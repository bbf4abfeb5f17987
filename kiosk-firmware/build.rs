//! Build script for kiosk-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates kiosk.toml at compile time, then runs the firmware's own
//!   config parser over it

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Display width in characters
const LCD_COLS: usize = 16;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate kiosk.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=kiosk.toml");

    let config_path = Path::new("kiosk.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: kiosk.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds kiosk.toml at build time.                   ║\n\
            ║  Please create one in the kiosk-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read kiosk.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in kiosk.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_display(&config, &mut errors);
    validate_serial(&config, &mut errors);

    // Valid TOML can still use forms the boot parser lacks (hex integers,
    // escaped or literal strings)
    if errors.is_empty() {
        if let Err(e) = kiosk_core::config::parse_config(&config_content) {
            errors.push(format!("firmware config parser rejects the file: {:?}", e));
        }
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid kiosk configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=kiosk.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only the sections the firmware parser understands are allowed
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        return;
    };
    for (name, value) in table {
        match (name.as_str(), value) {
            ("display" | "serial", toml::Value::Table(_)) => {}
            ("display" | "serial", _) => errors.push(format!("[{}] must be a table", name)),
            _ => errors.push(format!("unknown section or key '{}'", name)),
        }
    }
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(display) = config.get("display").and_then(|d| d.as_table()) else {
        return;
    };

    for (key, value) in display {
        match key.as_str() {
            "welcome_line1" | "welcome_line2" => match value.as_str() {
                Some(text) => {
                    if !text.bytes().all(|b| (0x20..0x7F).contains(&b)) {
                        errors.push(format!("[display] {} must be printable ASCII", key));
                    }
                    if text.len() > LCD_COLS {
                        errors.push(format!(
                            "[display] {} longer than {} characters",
                            key, LCD_COLS
                        ));
                    }
                }
                None => errors.push(format!("[display] {} must be a string", key)),
            },
            "settle_us" => match value.as_integer() {
                Some(us) if (1..=u32::MAX as i64).contains(&us) => {}
                _ => errors.push(format!("[display] {} must be 1-{}", key, u32::MAX)),
            },
            "power_on_delay_us" => match value.as_integer() {
                Some(us) if (0..=u32::MAX as i64).contains(&us) => {}
                _ => errors.push(format!("[display] {} must be 0-{}", key, u32::MAX)),
            },
            _ => errors.push(format!("[display] unknown key '{}'", key)),
        }
    }
}

fn validate_serial(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(serial) = config.get("serial").and_then(|s| s.as_table()) else {
        return;
    };

    for (key, value) in serial {
        match key.as_str() {
            "baudrate" | "crystal_hz" => match value.as_integer() {
                Some(v) if (1..=u32::MAX as i64).contains(&v) => {}
                _ => errors.push(format!("[serial] {} must be 1-{}", key, u32::MAX)),
            },
            _ => errors.push(format!("[serial] unknown key '{}'", key)),
        }
    }

    let baud = serial
        .get("baudrate")
        .and_then(|v| v.as_integer())
        .unwrap_or(9600);
    let crystal = serial
        .get("crystal_hz")
        .and_then(|v| v.as_integer())
        .unwrap_or(11_059_200);
    if baud > 0 && crystal > 0 && !baud_reachable(baud as u64, crystal as u64) {
        errors.push(format!(
            "[serial] {} baud is not within 2% at {} Hz",
            baud, crystal
        ));
    }
}

/// Same generator math the firmware runs at boot: 8-bit auto-reload timer,
/// 384 crystal clocks per reload step
fn baud_reachable(baud: u64, crystal: u64) -> bool {
    let step = 384 * baud;
    let divisor = (crystal + step / 2) / step;
    if divisor == 0 || divisor > 256 {
        return false;
    }
    let actual = crystal / (384 * divisor);
    actual.abs_diff(baud) * 1000 / baud <= 20
}
