use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::boundary::BoundaryWarning;
use crate::domain::{
    generate_candidates, BranchKind, FixVersion, ParsedVersion, Priority, RepoBranch,
    MASTER_BRANCH,
};

const NO_RELEASE_BRANCH_REASON: &str =
    "No matching release branches found. Fix will be included in future releases.";

/// A candidate branch that exists in the repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchMatch {
    #[serde(rename = "branch")]
    pub branch_name: String,
    pub reason: String,
    pub priority: Priority,
}

/// Branch suggestions for a single fix-version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "fixVersion")]
    pub fix_version_label: String,
    pub parsed: Option<ParsedVersion>,
    pub branches: Vec<BranchMatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl MatchResult {
    /// Branches other than master, in suggestion order
    pub fn release_branches(&self) -> impl Iterator<Item = &BranchMatch> {
        self.branches
            .iter()
            .filter(|b| b.branch_name != MASTER_BRANCH)
    }

    /// Branches with the given priority, in suggestion order
    pub fn with_priority(&self, priority: Priority) -> impl Iterator<Item = &BranchMatch> {
        self.branches.iter().filter(move |b| b.priority == priority)
    }
}

/// Priority of `branch` for this fix-version
pub fn classify_priority(branch: &str, fix_version: &FixVersion) -> Priority {
    BranchKind::classify(branch, fix_version.parsed.as_ref()).priority()
}

/// Explanation of why `branch` is suggested for this fix-version
pub fn describe_branch(branch: &str, fix_version: &FixVersion) -> String {
    BranchKind::classify(branch, fix_version.parsed.as_ref()).reason(&fix_version.label)
}

/// Matches fix-versions against the branches that exist in one repository
pub struct BranchMatcher {
    existing: HashSet<String>,
}

impl BranchMatcher {
    /// Create a matcher for a repository's branch list
    pub fn new(real_branches: &[RepoBranch]) -> Self {
        BranchMatcher {
            existing: real_branches.iter().map(|b| b.name.clone()).collect(),
        }
    }

    /// Resolve one fix-version to the branches it must land on.
    ///
    /// When no release branch exists (nothing matched, or only master did) the
    /// result is a single required `master` entry plus a warning.
    pub fn match_fix_version(&self, fix_version: &FixVersion) -> MatchResult {
        let parsed = fix_version.parsed.as_ref();
        let matched: Vec<String> = generate_candidates(parsed)
            .into_iter()
            .filter(|candidate| self.existing.contains(candidate))
            .collect();

        let only_master = matched.iter().all(|name| name == MASTER_BRANCH);
        if only_master {
            return MatchResult {
                fix_version_label: fix_version.label.clone(),
                parsed: fix_version.parsed.clone(),
                branches: vec![BranchMatch {
                    branch_name: MASTER_BRANCH.to_string(),
                    reason: NO_RELEASE_BRANCH_REASON.to_string(),
                    priority: Priority::Required,
                }],
                warning: Some(BoundaryWarning::NoReleaseBranches.to_string()),
            };
        }

        let branches = matched
            .into_iter()
            .map(|name| {
                let kind = BranchKind::classify(&name, parsed);
                BranchMatch {
                    reason: kind.reason(&fix_version.label),
                    priority: kind.priority(),
                    branch_name: name,
                }
            })
            .collect();

        MatchResult {
            fix_version_label: fix_version.label.clone(),
            parsed: fix_version.parsed.clone(),
            branches,
            warning: None,
        }
    }

    /// Resolve every fix-version, one result per input in input order
    pub fn match_all(&self, fix_versions: &[FixVersion]) -> Vec<MatchResult> {
        fix_versions
            .iter()
            .map(|fix_version| self.match_fix_version(fix_version))
            .collect()
    }
}

/// Match fix-versions to the branches that exist in a repository
pub fn match_branches(fix_versions: &[FixVersion], real_branches: &[RepoBranch]) -> Vec<MatchResult> {
    BranchMatcher::new(real_branches).match_all(fix_versions)
}
