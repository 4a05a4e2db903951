//! Build script for tlcscan-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Checks the scan strategy features
//! - Validates board.toml and generates the board binding

use std::collections::HashSet;
use std::env;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tlcscan_core::config::{ConfigError, ScanConfig};

/// GPIOs available on the RP2040
const GPIO_COUNT: i64 = 30;

/// Row-select lines on the board
const ROW_LINES: usize = 8;

/// Bits shifted per row; a busy-loop row period must cover them
const ROW_BITS: i64 = 192;

/// Fixed-function pins used by the interrupt-driven scan
const SPI0_SCLK_PIN: i64 = 18;
const SPI0_SIN_PIN: i64 = 19;
const PWM_GSCLK_PIN: i64 = 20;

/// Control pins in the order they appear in the generated config
const CONTROL_PINS: [&str; 5] = ["sin", "sclk", "xlat", "blank", "gsclk"];

fn main() {
    setup_linker();
    let irq_scan = check_strategy();
    validate_board(irq_scan);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // cortex-m-rt and defmt linker scripts
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Returns true for the interrupt-driven strategy
///
/// An invalid feature combination is reported by `compile_error!` in the
/// firmware itself; here it only selects which pin rules apply.
fn check_strategy() -> bool {
    env::var_os("CARGO_FEATURE_IRQ_SCAN").is_some()
        && env::var_os("CARGO_FEATURE_BUSY_SCAN").is_none()
}

/// Validate board.toml and write board_config.rs
fn validate_board(irq_scan: bool) {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a board.toml pin binding.                 ║\n\
            ║  Please create one in the tlcscan-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
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
                ║  ERROR: Invalid TOML syntax in board.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    validate_required_sections(&config);

    let name = board_name(&config);
    let pins = validate_pins(&config, irq_scan);
    let scan = validate_scan(&config);
    let serial_frequency = validate_serial(&config);
    if irq_scan {
        validate_row_shift(&scan, serial_frequency);
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let generated = generate(&name, &pins, &scan, serial_frequency);
    fs::write(out_dir.join("board_config.rs"), generated).unwrap();

    println!("cargo:warning=board.toml validated successfully ({})", name);
}

/// Parsed pin binding
struct Pins {
    control: Vec<(i64, bool)>,
    status_led: Option<(i64, bool)>,
    rows: Vec<(i64, bool)>,
}

/// Parsed scan timing
struct Scan {
    row_count: i64,
    start_row: i64,
    pwm_top: i64,
    row_period_us: i64,
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

/// Abort the build with a list of problems
fn report(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Validate that required sections exist
fn validate_required_sections(config: &toml::Value) {
    let mut errors = Vec::new();

    for section in ["board", "pins", "scan"] {
        match config.get(section) {
            Some(toml::Value::Table(_)) => {}
            Some(_) => errors.push(format!("[{}] must be a table", section)),
            None => errors.push(format!("Missing [{}] section", section)),
        }
    }

    report("Missing required sections in board.toml", &errors);
}

fn board_name(config: &toml::Value) -> String {
    match config.get("board").and_then(|b| b.get("name")) {
        Some(toml::Value::String(name)) if !name.is_empty() => name.clone(),
        _ => {
            report(
                "Invalid board configuration",
                &["[board] missing 'name'".to_string()],
            );
            unreachable!()
        }
    }
}

/// Parse a pin given either as a number or as `{ pin = N, inverted = B }`
fn parse_pin(value: &toml::Value, what: &str, errors: &mut Vec<String>) -> Option<(i64, bool)> {
    let (pin, inverted) = match value {
        toml::Value::Integer(pin) => (*pin, false),
        toml::Value::Table(t) => {
            let pin = match t.get("pin") {
                Some(toml::Value::Integer(pin)) => *pin,
                _ => {
                    errors.push(format!("{} missing 'pin'", what));
                    return None;
                }
            };
            let inverted = match t.get("inverted") {
                None => false,
                Some(toml::Value::Boolean(b)) => *b,
                Some(_) => {
                    errors.push(format!("{} 'inverted' must be a boolean", what));
                    return None;
                }
            };
            (pin, inverted)
        }
        _ => {
            errors.push(format!("{} must be a pin number or table", what));
            return None;
        }
    };

    if !(0..GPIO_COUNT).contains(&pin) {
        errors.push(format!("{} = {} is not a GPIO (0-{})", what, pin, GPIO_COUNT - 1));
        return None;
    }
    Some((pin, inverted))
}

/// Validate the [pins] section
fn validate_pins(config: &toml::Value, irq_scan: bool) -> Pins {
    let pins = config.get("pins").and_then(|p| p.as_table());
    let mut errors = Vec::new();
    let mut control = Vec::new();

    for name in CONTROL_PINS {
        match pins.and_then(|p| p.get(name)) {
            Some(value) => {
                if let Some(pin) = parse_pin(value, &format!("pins.{}", name), &mut errors) {
                    control.push(pin);
                }
            }
            None => errors.push(format!("[pins] missing '{}'", name)),
        }
    }

    let status_led = pins
        .and_then(|p| p.get("status_led"))
        .and_then(|value| parse_pin(value, "pins.status_led", &mut errors));

    let mut rows = Vec::new();
    match pins.and_then(|p| p.get("rows")) {
        Some(toml::Value::Array(values)) => {
            if values.len() != ROW_LINES {
                errors.push(format!("pins.rows must list {} pins", ROW_LINES));
            }
            for (i, value) in values.iter().enumerate() {
                if let Some(pin) = parse_pin(value, &format!("pins.rows[{}]", i), &mut errors) {
                    rows.push(pin);
                }
            }
        }
        Some(_) => errors.push("pins.rows must be an array".to_string()),
        None => errors.push("[pins] missing 'rows'".to_string()),
    }

    // Every line needs its own GPIO
    let mut seen = HashSet::new();
    for (pin, _) in control.iter().chain(status_led.iter()).chain(rows.iter()) {
        if !seen.insert(*pin) {
            errors.push(format!("GPIO {} is assigned more than once", pin));
        }
    }

    if irq_scan && control.len() == CONTROL_PINS.len() {
        let fixed = [
            ("sin", control[0], SPI0_SIN_PIN),
            ("sclk", control[1], SPI0_SCLK_PIN),
            ("gsclk", control[4], PWM_GSCLK_PIN),
        ];
        for (name, (pin, inverted), required) in fixed {
            if pin != required {
                errors.push(format!("irq-scan needs pins.{} = {}", name, required));
            }
            if inverted {
                errors.push(format!("irq-scan cannot invert pins.{}", name));
            }
        }
    }

    report("Invalid pin configuration", &errors);

    Pins {
        control,
        status_led,
        rows,
    }
}

/// Validate the [scan] section
fn validate_scan(config: &toml::Value) -> Scan {
    let scan = config.get("scan").and_then(|s| s.as_table());
    let mut errors = Vec::new();

    let mut field = |name: &str| match scan.and_then(|s| s.get(name)) {
        Some(toml::Value::Integer(v)) => *v,
        Some(_) => {
            errors.push(format!("scan.{} must be an integer", name));
            0
        }
        None => {
            errors.push(format!("[scan] missing '{}'", name));
            0
        }
    };

    let parsed = Scan {
        row_count: field("row_count"),
        start_row: field("start_row"),
        pwm_top: field("pwm_top"),
        row_period_us: field("row_period_us"),
    };

    if !(1..=ROW_LINES as i64).contains(&parsed.row_count) {
        errors.push(format!("scan.row_count must be 1-{}", ROW_LINES));
    }
    if parsed.start_row < 0 || parsed.start_row >= parsed.row_count {
        errors.push("scan.start_row must be below scan.row_count".to_string());
    }
    if parsed.pwm_top + 1 < ROW_BITS || parsed.pwm_top > i64::from(u16::MAX) {
        errors.push(format!("scan.pwm_top must be {}-65535", ROW_BITS - 1));
    }
    if parsed.row_period_us <= 0 || parsed.row_period_us > i64::from(u32::MAX) {
        errors.push("scan.row_period_us must be positive".to_string());
    }

    report("Invalid scan configuration", &errors);

    parsed
}

/// Validate the optional [serial] section, returning the shift clock in Hz
fn validate_serial(config: &toml::Value) -> i64 {
    const DEFAULT_FREQUENCY: i64 = 12_500_000;

    let frequency = match config.get("serial").and_then(|s| s.get("frequency")) {
        None => DEFAULT_FREQUENCY,
        Some(toml::Value::Integer(f)) => *f,
        Some(_) => {
            report(
                "Invalid serial configuration",
                &["serial.frequency must be an integer".to_string()],
            );
            unreachable!()
        }
    };

    if !(1..=62_500_000).contains(&frequency) {
        report(
            "Invalid serial configuration",
            &["serial.frequency must be 1-62500000 Hz".to_string()],
        );
    }
    frequency
}

/// Reject a shift clock too slow to move a row between row advances
///
/// Runs after the range checks, so every field fits its target type.
fn validate_row_shift(scan: &Scan, serial_frequency: i64) {
    let config = ScanConfig {
        row_count: scan.row_count as u8,
        start_row: scan.start_row as u8,
        pwm_top: scan.pwm_top as u16,
        row_period_us: scan.row_period_us as u32,
    };
    if let Err(ConfigError::RowShiftTooSlow(shift_us)) =
        config.validate_serial(serial_frequency as u32)
    {
        report(
            "Serial clock too slow for the row period",
            &[
                format!(
                    "one row takes {}us at {} Hz",
                    shift_us, serial_frequency
                ),
                format!("scan.row_period_us is {}", scan.row_period_us),
                "raise serial.frequency or scan.row_period_us".to_string(),
            ],
        );
    }
}

fn pin_expr((pin, inverted): (i64, bool)) -> String {
    if inverted {
        format!("PinConfig::inverted({})", pin)
    } else {
        format!("PinConfig::new({})", pin)
    }
}

/// Render board_config.rs
fn generate(name: &str, pins: &Pins, scan: &Scan, serial_frequency: i64) -> String {
    let mut out = String::new();
    writeln!(out, "// Generated from board.toml by build.rs").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "pub const BOARD: BoardConfig = BoardConfig {{").unwrap();
    writeln!(out, "    name: {:?},", name).unwrap();
    for (field, pin) in CONTROL_PINS.iter().zip(&pins.control) {
        writeln!(out, "    {}: {},", field, pin_expr(*pin)).unwrap();
    }
    match pins.status_led {
        Some(pin) => writeln!(out, "    status_led: Some({}),", pin_expr(pin)).unwrap(),
        None => writeln!(out, "    status_led: None,").unwrap(),
    }
    writeln!(out, "    row_select: [").unwrap();
    for pin in &pins.rows {
        writeln!(out, "        {},", pin_expr(*pin)).unwrap();
    }
    writeln!(out, "    ],").unwrap();
    writeln!(out, "}};").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "pub const SCAN: ScanConfig = ScanConfig {{").unwrap();
    writeln!(out, "    row_count: {},", scan.row_count).unwrap();
    writeln!(out, "    start_row: {},", scan.start_row).unwrap();
    writeln!(out, "    pwm_top: {},", scan.pwm_top).unwrap();
    writeln!(out, "    row_period_us: {},", scan.row_period_us).unwrap();
    writeln!(out, "}};").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "pub const SERIAL_FREQUENCY: u32 = {};", serial_frequency).unwrap();
    out
}
