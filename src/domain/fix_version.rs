use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::version::ParsedVersion;

/// A fix-version attached to a tracker ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixVersion {
    /// Label as shown in the tracker, e.g. "Tyk 5.8.1"
    #[serde(rename = "name")]
    pub label: String,
    #[serde(rename = "id", default, deserialize_with = "tracker_id_from_json")]
    pub tracker_id: String,
    #[serde(default)]
    pub released: bool,
    /// Supplied parsed version; one that does not decode is treated as missing
    #[serde(default, deserialize_with = "parsed_or_none")]
    pub parsed: Option<ParsedVersion>,
}

// Trackers hand out ids as strings or as plain numbers.
fn tracker_id_from_json<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None => String::new(),
        Some(Value::String(id)) => id,
        Some(other) => other.to_string(),
    })
}

fn parsed_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<ParsedVersion>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

impl FixVersion {
    /// Create a fix-version and parse its label
    pub fn new(label: impl Into<String>, tracker_id: impl Into<String>, released: bool) -> Self {
        let label = label.into();
        let parsed = ParsedVersion::parse(&label);
        FixVersion {
            label,
            tracker_id: tracker_id.into(),
            released,
            parsed,
        }
    }

    /// Shorthand for an unreleased fix-version with no tracker id
    pub fn from_label(label: impl Into<String>) -> Self {
        FixVersion::new(label, "", false)
    }

    /// Parse the label if no parsed version was supplied with the input
    pub fn with_parsed(mut self) -> Self {
        if self.parsed.is_none() {
            self.parsed = ParsedVersion::parse(&self.label);
        }
        self
    }

    /// Whether this fix-version should be considered for the given short repository name.
    ///
    /// Unparsed versions carry no components and therefore apply everywhere.
    pub fn applies_to(&self, repo_name: &str) -> bool {
        self.parsed
            .as_ref()
            .map_or(true, |parsed| parsed.applies_to(repo_name))
    }
}

/// Short repository name: the segment after the last `/` of "owner/repo"
pub fn short_repo_name(repository: &str) -> &str {
    repository.rsplit('/').next().unwrap_or(repository)
}

/// Keep the fix-versions relevant to `repository`, preserving order.
///
/// With no repository there is nothing to filter against and the input is
/// returned unchanged.
pub fn filter_by_repository(
    fix_versions: Vec<FixVersion>,
    repository: Option<&str>,
) -> Vec<FixVersion> {
    let Some(repository) = repository else {
        return fix_versions;
    };

    let repo_name = short_repo_name(repository);
    fix_versions
        .into_iter()
        .filter(|fix_version| fix_version.applies_to(repo_name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(fix_versions: &[FixVersion]) -> Vec<&str> {
        fix_versions.iter().map(|fv| fv.label.as_str()).collect()
    }

    #[test]
    fn test_new_parses_label() {
        let fv = FixVersion::new("Tyk 5.8.1", "10001", true);
        assert_eq!(fv.tracker_id, "10001");
        assert!(fv.released);
        let parsed = fv.parsed.unwrap();
        assert_eq!(parsed.major, 5);
        assert_eq!(parsed.original_label, "Tyk 5.8.1");
    }

    #[test]
    fn test_unparseable_label() {
        let fv = FixVersion::from_label("Backlog");
        assert_eq!(fv.parsed, None);
        assert!(fv.applies_to("tyk"));
    }

    #[test]
    fn test_with_parsed_keeps_supplied_version() {
        let mut fv = FixVersion::from_label("5.8.1");
        fv.parsed = Some(ParsedVersion::new(6, None, None));
        assert_eq!(fv.with_parsed().parsed.unwrap().major, 6);
    }

    #[test]
    fn test_with_parsed_fills_missing_version() {
        let fv: FixVersion = serde_json::from_str(r#"{"name": "TIB 1.7.0"}"#).unwrap();
        assert_eq!(fv.parsed, None);
        let fv = fv.with_parsed();
        assert!(fv
            .parsed
            .unwrap()
            .affected_components
            .contains("tyk-identity-broker"));
    }

    #[test]
    fn test_undecodable_parsed_is_reparsed() {
        let fv: FixVersion =
            serde_json::from_str(r#"{"name": "5.8.1", "parsed": {"minor": 8}}"#).unwrap();
        assert_eq!(fv.parsed, None);

        let parsed = fv.with_parsed().parsed.unwrap();
        assert_eq!((parsed.major, parsed.minor, parsed.patch), (5, Some(8), Some(1)));

        let fv: FixVersion = serde_json::from_str(r#"{"name": "5.8.1", "parsed": "5.8.1"}"#).unwrap();
        assert_eq!(fv.parsed, None);
    }

    #[test]
    fn test_numeric_tracker_id() {
        let fv: FixVersion = serde_json::from_str(r#"{"name": "5.8.1", "id": 10001}"#).unwrap();
        assert_eq!(fv.tracker_id, "10001");

        let fv: FixVersion = serde_json::from_str(r#"{"name": "5.8.1", "id": null}"#).unwrap();
        assert_eq!(fv.tracker_id, "");
    }

    #[test]
    fn test_short_repo_name() {
        assert_eq!(short_repo_name("TykTechnologies/tyk"), "tyk");
        assert_eq!(short_repo_name("tyk-pump"), "tyk-pump");
        assert_eq!(short_repo_name("owner/"), "");
    }

    #[test]
    fn test_filter_identity_broker() {
        let fix_versions = vec![
            FixVersion::from_label("TIB 1.7.0"),
            FixVersion::from_label("Tyk 5.8.1"),
            FixVersion::from_label("1.0.0"),
        ];

        let filtered =
            filter_by_repository(fix_versions, Some("TykTechnologies/tyk-identity-broker"));
        assert_eq!(labels(&filtered), vec!["TIB 1.7.0", "1.0.0"]);
    }

    #[test]
    fn test_filter_platform() {
        let fix_versions = vec![
            FixVersion::from_label("TIB 1.7.0"),
            FixVersion::from_label("Tyk 5.8.1"),
        ];

        let filtered = filter_by_repository(fix_versions, Some("TykTechnologies/tyk"));
        assert_eq!(labels(&filtered), vec!["Tyk 5.8.1"]);
    }

    #[test]
    fn test_filter_keeps_unrestricted_versions() {
        let fix_versions = vec![FixVersion::from_label("1.0.0"), FixVersion::from_label("2.0.0")];

        let filtered = filter_by_repository(fix_versions, Some("TykTechnologies/any-repo"));
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_filter_without_repository() {
        let fix_versions = vec![
            FixVersion::from_label("TIB 1.7.0"),
            FixVersion::from_label("Tyk 5.8.1"),
        ];

        let filtered = filter_by_repository(fix_versions.clone(), None);
        assert_eq!(filtered, fix_versions);
    }
}
