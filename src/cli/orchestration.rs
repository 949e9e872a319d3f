//! Match workflow orchestration
//!
//! Decodes collaborator JSON, runs the resolution pipeline and renders the
//! report. Kept separate from main.rs so it can run without clap.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{filter_by_repository, FixVersion, RepoBranch};
use crate::matcher::{match_branches, MatchResult};
use crate::report;
use crate::ticket::{RepositoryRef, TicketInfo, TicketMeta};

/// Arguments for the match workflow
#[derive(Debug, Clone, PartialEq)]
pub struct MatchWorkflowArgs {
    /// Fix-versions as JSON: a bare array or a ticket document
    pub fix_versions_json: String,

    /// Repository branches as JSON: `[{"name": "..."}]`
    pub branches_json: String,

    /// Repository ("owner/repo") to filter fix-versions for
    pub repository: Option<String>,
}

/// Output of the match workflow, serialized for pipeline steps
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowResult {
    pub jira_ticket: TicketMeta,
    pub match_results: Vec<MatchResult>,
    pub markdown: String,

    /// Non-fatal conditions, reported on stderr rather than in the JSON document
    #[serde(skip)]
    pub warnings: Vec<BoundaryWarning>,
}

/// Fix-versions as handed over by the tracker step
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FixVersionsInput {
    // Must stay first: structs also decode from JSON arrays.
    List(Vec<FixVersion>),
    Ticket(TicketInfo),
}

impl FixVersionsInput {
    /// Decode either input shape
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Split into ticket reference and fix-versions
    pub fn into_parts(self) -> (TicketMeta, Vec<FixVersion>) {
        match self {
            FixVersionsInput::Ticket(info) => {
                let meta = info.meta();
                (meta, info.fix_versions)
            }
            FixVersionsInput::List(fix_versions) => (TicketMeta::default(), fix_versions),
        }
    }
}

/// Decode a repository branch list
pub fn parse_branches(json: &str) -> crate::Result<Vec<RepoBranch>> {
    Ok(serde_json::from_str(json)?)
}

/// Main match workflow
///
/// 1. Check the repository is "owner/repo"
/// 2. Decode fix-versions and fill in any missing parsed versions
/// 3. Decode the repository branch list
/// 4. Drop fix-versions that belong to other repositories
/// 5. Match, then render the markdown report
pub fn run_match_workflow(args: MatchWorkflowArgs, config: &Config) -> Result<WorkflowResult> {
    let repository = args
        .repository
        .as_deref()
        .or(config.defaults.repository.as_deref());
    if let Some(repository) = repository {
        RepositoryRef::parse(repository)?;
    }

    let (jira_ticket, fix_versions) = FixVersionsInput::from_json(&args.fix_versions_json)
        .context("Failed to parse fix versions JSON")?
        .into_parts();
    let branches =
        parse_branches(&args.branches_json).context("Failed to parse repository branches JSON")?;

    let mut warnings = Vec::new();

    if fix_versions.is_empty() {
        if let Some(ticket) = &jira_ticket.ticket {
            warnings.push(BoundaryWarning::NoFixVersions {
                ticket: ticket.clone(),
            });
        }
    }

    let fix_versions: Vec<FixVersion> = fix_versions
        .into_iter()
        .map(FixVersion::with_parsed)
        .collect();

    for fix_version in fix_versions.iter().filter(|fv| fv.parsed.is_none()) {
        warnings.push(BoundaryWarning::UnparsableFixVersion {
            label: fix_version.label.clone(),
        });
    }

    let before = fix_versions.len();
    let fix_versions = filter_by_repository(fix_versions, repository);
    if let Some(repository) = repository {
        let dropped = before - fix_versions.len();
        if dropped > 0 {
            warnings.push(BoundaryWarning::FixVersionsFiltered {
                repository: repository.to_string(),
                dropped,
            });
        }
    }

    tracing::debug!(
        fix_versions = fix_versions.len(),
        branches = branches.len(),
        repository = repository.unwrap_or("-"),
        "matching fix versions"
    );

    let match_results = match_branches(&fix_versions, &branches);
    for result in &match_results {
        tracing::info!(
            fix_version = %result.fix_version_label,
            branches = result.branches.len(),
            warning = result.warning.is_some(),
            "resolved fix version"
        );
    }

    let ticket = jira_ticket.ticket.is_some().then_some(&jira_ticket);
    let markdown =
        report::render_with_marker(&match_results, ticket, &config.report.comment_marker);

    Ok(WorkflowResult {
        jira_ticket,
        match_results,
        markdown,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Priority;

    fn args(fix_versions: &str, branches: &str, repository: Option<&str>) -> MatchWorkflowArgs {
        MatchWorkflowArgs {
            fix_versions_json: fix_versions.to_string(),
            branches_json: branches.to_string(),
            repository: repository.map(str::to_string),
        }
    }

    #[test]
    fn test_bare_list_input() {
        let result = run_match_workflow(
            args(
                r#"[{"name": "5.8.1"}]"#,
                r#"[{"name": "master"}, {"name": "release-5.8"}]"#,
                None,
            ),
            &Config::default(),
        )
        .unwrap();

        assert_eq!(result.jira_ticket, TicketMeta::default());
        assert_eq!(result.match_results.len(), 1);
        assert_eq!(result.match_results[0].branches[0].branch_name, "release-5.8");
        assert_eq!(result.match_results[0].branches[0].priority, Priority::Required);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_ticket_document_input() {
        let fix_versions = r#"{
            "ticket": "TT-12345",
            "summary": "Fix auth",
            "fixVersions": [
                {"name": "TIB 1.7.0", "id": "1", "released": false},
                {"name": "Tyk 5.8.1", "id": "2", "released": false}
            ]
        }"#;
        let branches = r#"[{"name": "master", "protected": true}, {"name": "release-1.7"}]"#;

        let result = run_match_workflow(
            args(fix_versions, branches, Some("TykTechnologies/tyk-identity-broker")),
            &Config::default(),
        )
        .unwrap();

        assert_eq!(result.jira_ticket.ticket.as_deref(), Some("TT-12345"));
        assert_eq!(result.match_results.len(), 1);
        assert_eq!(result.match_results[0].fix_version_label, "TIB 1.7.0");
        assert!(result.markdown.contains("Based on JIRA ticket **TT-12345**: Fix auth"));
        assert_eq!(
            result.warnings,
            vec![BoundaryWarning::FixVersionsFiltered {
                repository: "TykTechnologies/tyk-identity-broker".to_string(),
                dropped: 1,
            }]
        );
    }

    #[test]
    fn test_repository_from_config() {
        let mut config = Config::default();
        config.defaults.repository = Some("Org/tyk".to_string());

        let result = run_match_workflow(
            args(r#"[{"name": "TIB 1.7.0"}, {"name": "5.8.1"}]"#, r#"[{"name": "master"}]"#, None),
            &config,
        )
        .unwrap();

        assert_eq!(result.match_results.len(), 1);
        assert_eq!(result.match_results[0].fix_version_label, "5.8.1");
    }

    #[test]
    fn test_ticket_document_without_ticket_key() {
        let result = run_match_workflow(
            args(
                r#"{"fixVersions": [{"name": "5.8.1", "id": 10001}]}"#,
                r#"[{"name": "master"}, {"name": "release-5.8"}]"#,
                None,
            ),
            &Config::default(),
        )
        .unwrap();

        assert_eq!(result.jira_ticket, TicketMeta::default());
        assert_eq!(result.match_results[0].branches[0].branch_name, "release-5.8");
        assert!(!result.markdown.contains("Based on JIRA ticket"));
    }

    #[test]
    fn test_undecodable_parsed_falls_back_to_label() {
        let result = run_match_workflow(
            args(
                r#"[{"name": "5.8.1", "parsed": {"minor": 8}}]"#,
                r#"[{"name": "master"}, {"name": "release-5.8"}]"#,
                None,
            ),
            &Config::default(),
        )
        .unwrap();

        let parsed = result.match_results[0].parsed.as_ref().unwrap();
        assert_eq!((parsed.major, parsed.minor, parsed.patch), (5, Some(8), Some(1)));
        assert_eq!(result.match_results[0].branches[0].priority, Priority::Required);
    }

    #[test]
    fn test_repository_shape_is_checked() {
        for bad in ["owner/repo/extra", "tyk-pump"] {
            let err = run_match_workflow(
                args(r#"[{"name": "5.8.1"}]"#, r#"[{"name": "master"}]"#, Some(bad)),
                &Config::default(),
            )
            .unwrap_err();
            assert!(err.to_string().contains("owner/repo"), "got: {}", err);
        }

        let mut config = Config::default();
        config.defaults.repository = Some("tyk".to_string());
        let err = run_match_workflow(
            args(r#"[{"name": "5.8.1"}]"#, r#"[{"name": "master"}]"#, None),
            &config,
        )
        .unwrap_err();
        assert!(err.to_string().contains("'tyk'"));
    }

    #[test]
    fn test_unparseable_version_is_warned() {
        let result = run_match_workflow(
            args(r#"[{"name": "Backlog"}]"#, r#"[{"name": "master"}]"#, None),
            &Config::default(),
        )
        .unwrap();

        assert!(result.warnings.contains(&BoundaryWarning::UnparsableFixVersion {
            label: "Backlog".to_string()
        }));
        assert_eq!(result.match_results[0].branches[0].branch_name, "master");
    }

    #[test]
    fn test_empty_ticket_is_warned() {
        let result = run_match_workflow(
            args(r#"{"ticket": "TT-1", "fixVersions": []}"#, "[]", None),
            &Config::default(),
        )
        .unwrap();

        assert!(result.match_results.is_empty());
        assert_eq!(
            result.warnings,
            vec![BoundaryWarning::NoFixVersions {
                ticket: "TT-1".to_string()
            }]
        );
    }

    #[test]
    fn test_custom_marker() {
        let mut config = Config::default();
        config.report.comment_marker = "<!-- custom -->".to_string();

        let result = run_match_workflow(
            args(r#"[{"name": "5.8.1"}]"#, r#"[{"name": "master"}]"#, None),
            &config,
        )
        .unwrap();
        assert!(result.markdown.ends_with("<!-- custom -->"));
    }

    #[test]
    fn test_malformed_json() {
        let err = run_match_workflow(args("not json", "[]", None), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("fix versions JSON"));

        let err = run_match_workflow(args("[]", "{", None), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("branches JSON"));
    }

    #[test]
    fn test_serialized_document() {
        let result = run_match_workflow(
            args(r#"[{"name": "5.8.1"}]"#, r#"[{"name": "master"}]"#, None),
            &Config::default(),
        )
        .unwrap();

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["jiraTicket"], serde_json::json!({}));
        assert_eq!(json["matchResults"][0]["fixVersion"], "5.8.1");
        assert!(json["markdown"].as_str().unwrap().ends_with(report::COMMENT_MARKER));
        assert!(json.get("warnings").is_none());
    }
}
