use std::fmt;

/// Non-fatal conditions met while resolving fix-versions to branches.
/// These are reported to the user but never stop the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// None of the release-branch candidates exist; only master applies
    NoReleaseBranches,
    /// Fix-version label is not a recognizable version
    UnparsableFixVersion { label: String },
    /// Fix-versions dropped because they belong to other repositories
    FixVersionsFiltered { repository: String, dropped: usize },
    /// The ticket has no fix-versions set
    NoFixVersions { ticket: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoReleaseBranches => {
                write!(f, "Expected release branches not found in repository")
            }
            BoundaryWarning::UnparsableFixVersion { label } => {
                write!(
                    f,
                    "Cannot parse fix version '{}'; only master will be suggested",
                    label
                )
            }
            BoundaryWarning::FixVersionsFiltered {
                repository,
                dropped,
            } => {
                let noun = if *dropped == 1 { "version" } else { "versions" };
                write!(
                    f,
                    "Skipped {} fix {} not applicable to '{}'",
                    dropped, noun, repository
                )
            }
            BoundaryWarning::NoFixVersions { ticket } => {
                write!(f, "No fix versions found in JIRA ticket {}", ticket)
            }
        }
    }
}
