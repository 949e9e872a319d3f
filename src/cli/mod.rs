//! Command-line workflows, independent of argument parsing

pub mod orchestration;

pub use orchestration::{run_match_workflow, MatchWorkflowArgs, WorkflowResult};
