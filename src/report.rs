//! Markdown report of branch suggestions, posted as a PR or ticket comment

use crate::domain::Priority;
use crate::matcher::MatchResult;
use crate::ticket::TicketMeta;

/// Marker identifying our comment so later runs update it instead of adding another
pub const COMMENT_MARKER: &str = "<!-- branch-suggestions -->";

const PRIORITY_ORDER: [Priority; 3] = [Priority::Required, Priority::Recommended, Priority::Optional];

/// Render match results with the default comment marker
pub fn render(results: &[MatchResult], ticket: Option<&TicketMeta>) -> String {
    render_with_marker(results, ticket, COMMENT_MARKER)
}

/// Render match results as markdown.
///
/// Layout:
/// - title and, when a ticket key is known, a ticket line
/// - one section per fix-version with its warning and non-empty priority groups
/// - workflow steps, listing each release branch once in first-seen order
/// - the comment marker as the final line
pub fn render_with_marker(
    results: &[MatchResult],
    ticket: Option<&TicketMeta>,
    marker: &str,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("## 🎯 Recommended Merge Targets".to_string());
    lines.push(String::new());

    if let Some(key) = ticket
        .and_then(|t| t.ticket.as_deref())
        .filter(|k| !k.is_empty())
    {
        let summary = ticket
            .and_then(|t| t.summary.as_deref())
            .filter(|s| !s.is_empty())
            .map(|s| format!(": {}", s))
            .unwrap_or_default();
        lines.push(format!("Based on JIRA ticket **{}**{}", key, summary));
        lines.push(String::new());
    }

    for result in results {
        lines.push(format!("### Fix Version: {}", result.fix_version_label));
        lines.push(String::new());

        if let Some(warning) = &result.warning {
            lines.push(format!("> ⚠️ **Warning:** {}", warning));
            lines.push(String::new());
        }

        for priority in PRIORITY_ORDER {
            let group: Vec<_> = result.with_priority(priority).collect();
            if group.is_empty() {
                continue;
            }
            lines.push(format!("**{}:**", priority.heading()));
            for branch in group {
                lines.push(format!("- `{}` - {}", branch.branch_name, branch.reason));
            }
            lines.push(String::new());
        }
    }

    lines.push("---".to_string());
    lines.push(String::new());
    lines.push("### 📋 Workflow".to_string());
    lines.push(String::new());
    lines.push("1. **Merge this PR to `master` first**".to_string());
    lines.push(String::new());

    let release_branches = collect_release_branches(results);
    if !release_branches.is_empty() {
        lines.push(
            "2. **Cherry-pick to release branches** by commenting on the **merged PR**:"
                .to_string(),
        );
        lines.push(String::new());
        for branch in &release_branches {
            lines.push(format!("   - `/release to {}`", branch));
        }
        lines.push(String::new());
        lines.push(
            "3. **Automated backport** - The bot will automatically create backport PRs to the specified release branches"
                .to_string(),
        );
    }

    lines.push(String::new());
    lines.push(marker.to_string());

    lines.join("\n")
}

/// Every non-master branch across all results, deduplicated in first-seen order
pub fn collect_release_branches(results: &[MatchResult]) -> Vec<&str> {
    let mut branches: Vec<&str> = Vec::new();
    for branch in results.iter().flat_map(|r| r.release_branches()) {
        if !branches.contains(&branch.branch_name.as_str()) {
            branches.push(&branch.branch_name);
        }
    }
    branches
}
