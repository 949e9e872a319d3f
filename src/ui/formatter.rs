//! Formatting functions for terminal output.
//!
//! Status lines are written to stderr; only `display_candidates` writes to stdout.

use crate::boundary::BoundaryWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("\x1b[33m→\x1b[0m {}", message);
}

/// Warning line with its yellow label.
pub fn format_boundary_warning(warning: &BoundaryWarning) -> String {
    format!("\x1b[33m⚠ WARNING:\x1b[0m {}", warning)
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{}", format_boundary_warning(warning));
}

/// Candidate branch names, one per line, most specific first.
pub fn format_candidates(candidates: &[String]) -> String {
    candidates.join("\n")
}

/// Print candidate branch names to stdout.
pub fn display_candidates(candidates: &[String]) {
    println!("{}", format_candidates(candidates));
}
