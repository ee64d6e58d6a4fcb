//! JSON output helpers for CLI commands.

use serde::Serialize;

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string());
    println!("{json}");
}

/// Print a success message on stderr.
pub fn print_success(msg: &str) {
    eprintln!("✓ {msg}");
}

/// Print an error message on stderr.
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}
