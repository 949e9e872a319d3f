use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use super::component::detect_components;

// Removed in this order, each at most once, before the number is read.
// A later pattern only applies to what the earlier ones left behind.
static LABEL_PREFIXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)^v",
        r"(?i)^Tyk(\s+Gateway)?\s+",
        r"(?i)^TIB\s+",
        r"(?i)^(Tyk\s+)?Pump\s+",
        r"(?i)^MDCB\s+",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("label prefix patterns are valid"))
    .collect()
});

static LEADING_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)(?:\.(\d+))?(?:\.(\d+))?").expect("version pattern is valid")
});

/// Version parsed out of a fix-version label.
///
/// `minor` and `patch` are `None` when the label did not give that much precision
/// ("5" or "5.8"); absence is not the same as zero. A patch is never present
/// without a minor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedVersion {
    pub major: u32,
    #[serde(default)]
    pub minor: Option<u32>,
    #[serde(default)]
    pub patch: Option<u32>,
    /// The raw label, verbatim
    #[serde(rename = "original", default)]
    pub original_label: String,
    /// Repositories the fix applies to; empty means all of them
    #[serde(rename = "component", default)]
    pub affected_components: BTreeSet<String>,
}

impl ParsedVersion {
    /// Create a version with no label or components attached.
    ///
    /// A `patch` given without a `minor` is dropped.
    pub fn new(major: u32, minor: Option<u32>, patch: Option<u32>) -> Self {
        let patch = minor.and(patch);
        let mut version = ParsedVersion {
            major,
            minor,
            patch,
            original_label: String::new(),
            affected_components: BTreeSet::new(),
        };
        version.original_label = version.to_string();
        version
    }

    /// Parse a free-form fix-version label.
    ///
    /// Accepted shapes include "5.8.1", "v5.8", "Tyk 5.8.1", "Tyk Gateway 5",
    /// "TIB 1.7.0", "Tyk Pump 1.9.0" and "MDCB 2.0.0". Anything after the leading
    /// dotted number is ignored ("5.8.1-rc1" parses as 5.8.1).
    ///
    /// A `v` is only recognised in front of everything else: "vTyk 5.8.1" parses,
    /// "Tyk v5.8.1" does not.
    ///
    /// # Returns
    /// * `Some(ParsedVersion)` - The label starts with a number once prefixes are removed
    /// * `None` - Empty input, or no leading number
    pub fn parse(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return None;
        }

        let cleaned = LABEL_PREFIXES
            .iter()
            .fold(trimmed, |rest, re| re.find(rest).map_or(rest, |m| &rest[m.end()..]))
            .trim();

        let captures = LEADING_VERSION.captures(cleaned)?;
        let number = |idx: usize| -> Option<Option<u32>> {
            match captures.get(idx) {
                Some(m) => m.as_str().parse::<u32>().ok().map(Some),
                None => Some(None),
            }
        };

        let major = number(1)??;
        let minor = number(2)?;
        let patch = number(3)?;

        Some(ParsedVersion {
            major,
            minor,
            patch,
            original_label: label.to_string(),
            affected_components: detect_components(label),
        })
    }

    /// Whether this is a patch on an existing minor line (patch present and non-zero)
    pub fn is_patch_release(&self) -> bool {
        self.minor.is_some() && self.patch.is_some_and(|p| p > 0)
    }

    /// Whether the version applies to the given short repository name
    pub fn applies_to(&self, repo_name: &str) -> bool {
        self.affected_components.is_empty() || self.affected_components.contains(repo_name)
    }
}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)?;
        if let Some(minor) = self.minor {
            write!(f, ".{}", minor)?;
            if let Some(patch) = self.patch {
                write!(f, ".{}", patch)?;
            }
        }
        Ok(())
    }
}

/// Parse an optional label; `None` and empty labels yield `None`.
pub fn parse_version(label: Option<&str>) -> Option<ParsedVersion> {
    label.and_then(ParsedVersion::parse)
}
