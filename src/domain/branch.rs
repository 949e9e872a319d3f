use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::version::ParsedVersion;

/// Name of the main development branch every fix lands on first
pub const MASTER_BRANCH: &str = "master";

/// A branch that exists in the target repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoBranch {
    pub name: String,
}

impl RepoBranch {
    pub fn new(name: impl Into<String>) -> Self {
        RepoBranch { name: name.into() }
    }
}

/// How strongly a fix should land on a matched branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Required,
    Recommended,
    Optional,
}

impl Priority {
    /// Heading used when grouping branches in a report
    pub fn heading(&self) -> &'static str {
        match self {
            Priority::Required => "Required",
            Priority::Recommended => "Recommended",
            Priority::Optional => "Optional",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Required => write!(f, "required"),
            Priority::Recommended => write!(f, "recommended"),
            Priority::Optional => write!(f, "optional"),
        }
    }
}

/// Shape of a branch name relative to one parsed version.
///
/// Priority and reason text are both derived from this single classification
/// so they cannot disagree about what a branch is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    /// `master`
    Master,
    /// `release-{major}.{minor}.{patch}`
    ExactTriple,
    /// `release-{major}.{minor}`; `patch_release` when the version is a non-zero patch
    MinorLine {
        major: u32,
        minor: u32,
        patch_release: bool,
    },
    /// `release-{major}`
    MajorLine { major: u32 },
    /// Any other name
    Other,
}

impl BranchKind {
    /// Classify `branch` against `parsed`.
    ///
    /// A missing version, or missing minor/patch, simply rules out the shapes that
    /// need them.
    pub fn classify(branch: &str, parsed: Option<&ParsedVersion>) -> Self {
        if branch == MASTER_BRANCH {
            return BranchKind::Master;
        }

        let Some(version) = parsed else {
            return BranchKind::Other;
        };

        if let (Some(minor), Some(patch)) = (version.minor, version.patch) {
            if branch == release_branch(&[version.major, minor, patch]) {
                return BranchKind::ExactTriple;
            }
        }

        if let Some(minor) = version.minor {
            if branch == release_branch(&[version.major, minor]) {
                return BranchKind::MinorLine {
                    major: version.major,
                    minor,
                    patch_release: version.is_patch_release(),
                };
            }
        }

        if branch == release_branch(&[version.major]) {
            return BranchKind::MajorLine {
                major: version.major,
            };
        }

        BranchKind::Other
    }

    pub fn priority(&self) -> Priority {
        match self {
            BranchKind::Master | BranchKind::ExactTriple => Priority::Required,
            // a patch release cannot be cut without its minor branch
            BranchKind::MinorLine {
                patch_release: true,
                ..
            } => Priority::Required,
            BranchKind::MinorLine { .. } | BranchKind::MajorLine { .. } => Priority::Recommended,
            BranchKind::Other => Priority::Optional,
        }
    }

    /// Human-readable justification, `label` being the fix-version as written in the tracker
    pub fn reason(&self, label: &str) -> String {
        match self {
            BranchKind::Master => {
                "Main development branch - ensures fix is in all future releases".to_string()
            }
            BranchKind::ExactTriple => {
                format!("Exact version branch for {} - specific patch release", label)
            }
            BranchKind::MinorLine {
                major,
                minor,
                patch_release: true,
            } => format!(
                "Minor version branch for {}.{}.x patches - required for creating {}",
                major, minor, label
            ),
            BranchKind::MinorLine { major, minor, .. } => {
                format!("Minor version branch for {}.{}.x releases", major, minor)
            }
            BranchKind::MajorLine { major } => {
                format!("Major version branch for all {}.x releases", major)
            }
            BranchKind::Other => format!("Release branch for version {}", label),
        }
    }
}

/// Format a release branch name from version components: `[5, 8]` -> `release-5.8`
pub fn release_branch(parts: &[u32]) -> String {
    let joined: Vec<String> = parts.iter().map(|p| p.to_string()).collect();
    format!("release-{}", joined.join("."))
}

/// Candidate branch names for a version, most specific first, always ending in `master`.
///
/// # Example
/// ```
/// use branch_suggest::domain::{generate_candidates, ParsedVersion};
///
/// let v = ParsedVersion::new(5, Some(8), Some(1));
/// assert_eq!(
///     generate_candidates(Some(&v)),
///     vec!["release-5.8.1", "release-5.8", "release-5", "master"]
/// );
/// assert_eq!(generate_candidates(None), vec!["master"]);
/// ```
pub fn generate_candidates(parsed: Option<&ParsedVersion>) -> Vec<String> {
    let Some(version) = parsed else {
        return vec![MASTER_BRANCH.to_string()];
    };

    let mut candidates = Vec::new();

    if let (Some(minor), Some(patch)) = (version.minor, version.patch) {
        candidates.push(release_branch(&[version.major, minor, patch]));
    }

    if version.is_patch_release() {
        if let Some(minor) = version.minor {
            candidates.push(release_branch(&[version.major, minor]));
        }
    }

    if let Some(minor) = version.minor {
        candidates.push(release_branch(&[version.major, minor]));
    }

    candidates.push(release_branch(&[version.major]));
    candidates.push(MASTER_BRANCH.to_string());

    let mut seen = HashSet::new();
    candidates.retain(|name| seen.insert(name.clone()));
    candidates
}
