pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod matcher;
pub mod report;
pub mod ticket;
pub mod ui;

pub use error::{BranchSuggestError, Result};
