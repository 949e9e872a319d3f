//! User interface module - terminal output for the command-line tool.
//!
//! Results go to stdout; diagnostics go to stderr so piped output stays clean.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_candidates, display_error, display_status,
};
