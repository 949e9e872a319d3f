//! Resolution of fix-versions to the branches that exist in a repository

pub mod branch_matcher;

pub use branch_matcher::{
    classify_priority, describe_branch, match_branches, BranchMatch, BranchMatcher, MatchResult,
};
