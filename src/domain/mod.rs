//! Domain logic - pure version and branch rules, no I/O

pub mod branch;
pub mod component;
pub mod fix_version;
pub mod version;

pub use branch::{
    generate_candidates, release_branch, BranchKind, Priority, RepoBranch, MASTER_BRANCH,
};
pub use component::{detect_components, Product};
pub use fix_version::{filter_by_repository, short_repo_name, FixVersion};
pub use version::{parse_version, ParsedVersion};
