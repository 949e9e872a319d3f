//! Ticket and repository references handed over by the tracker and host collaborators

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::domain::FixVersion;
use crate::error::{BranchSuggestError, Result};

static TICKET_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{2,}-\d+\b").expect("ticket key pattern is valid"));

static EXACT_TICKET_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,}-\d+$").expect("ticket key pattern is valid"));

/// First ticket key ("TT-12345") found in a PR title or branch name
pub fn extract_ticket_key(text: &str) -> Option<String> {
    TICKET_KEY.find(text).map(|m| m.as_str().to_string())
}

/// Pick the ticket key for a pull request.
///
/// The branch name wins over the title; a title that is itself a bare key is
/// used as is.
pub fn resolve_ticket_key(pr_title: &str, branch_name: Option<&str>) -> Option<String> {
    if let Some(key) = branch_name.and_then(extract_ticket_key) {
        return Some(key);
    }

    let title = pr_title.trim();
    if EXACT_TICKET_KEY.is_match(title) {
        return Some(title.to_string());
    }

    extract_ticket_key(title)
}

/// Ticket reference shown at the top of a report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl TicketMeta {
    pub fn new(ticket: impl Into<String>, summary: Option<String>) -> Self {
        TicketMeta {
            ticket: Some(ticket.into()),
            summary,
        }
    }
}

fn unknown() -> String {
    "Unknown".to_string()
}

/// Ticket document produced by the tracker collaborator.
///
/// `ticket` may be missing when only the fix-versions were forwarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketInfo {
    pub ticket: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default = "unknown")]
    pub priority: String,
    #[serde(default = "unknown")]
    pub issue_type: String,
    #[serde(default)]
    pub fix_versions: Vec<FixVersion>,
}

impl TicketInfo {
    /// Reference for the report header; empty when the document names no ticket
    pub fn meta(&self) -> TicketMeta {
        match &self.ticket {
            Some(ticket) => TicketMeta::new(ticket.clone(), self.summary.clone()),
            None => TicketMeta::default(),
        }
    }
}

/// Repository named as "owner/repo"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub owner: String,
    pub repo: String,
}

impl RepositoryRef {
    /// Parse "owner/repo"; anything but exactly one `/` is rejected.
    /// Empty segments are accepted ("/repo", "owner/").
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }
}

impl FromStr for RepositoryRef {
    type Err = BranchSuggestError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(repo), None) => Ok(RepositoryRef {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(BranchSuggestError::invalid_repository(s)),
        }
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
