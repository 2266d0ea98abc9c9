//! Configuration resolution for jira-report
//!
//! Locates the YAML config file and extracts one named JQL query from its
//! `jql_queries` mapping. Extraction runs an ordered list of strategies and
//! takes the first non-empty result, so a config that trips up the full YAML
//! parser can still be read by the simpler scanners.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Default config file path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "configs/jira-queries.yaml";

/// Bundled fallback used when the primary config is absent.
pub const TEMPLATE_CONFIG_PATH: &str = "configs/jira-queries.template.yaml";

/// An extraction strategy: config contents + query name -> JQL string.
type Strategy = fn(&str, &str) -> Option<String>;

/// Ordered by fidelity: full YAML first, then the minimal mapping parser,
/// then a plain line scan.
const STRATEGIES: [Strategy; 3] = [yaml_lookup, mapping_lookup, line_scan];

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    jql_queries: BTreeMap<String, String>,
}

/// Resolve which config file to read.
///
/// An explicit path must exist; otherwise the default path is tried, then the
/// bundled template. Returns `ConfigNotFound` when no candidate exists.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(Error::ConfigNotFound(path.to_path_buf()));
    }

    for candidate in [DEFAULT_CONFIG_PATH, TEMPLATE_CONFIG_PATH] {
        let path = Path::new(candidate);
        if path.exists() {
            return Ok(path.to_path_buf());
        }
    }

    Err(Error::ConfigNotFound(PathBuf::from(DEFAULT_CONFIG_PATH)))
}

/// Extract the JQL string for `name` from the config file at `path`.
///
/// Returns `QueryNotFound` when no strategy yields a non-empty value.
pub fn extract_query(path: &Path, name: &str) -> Result<String> {
    if !path.exists() {
        return Err(Error::ConfigNotFound(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path)?;

    extract_query_from_str(&contents, name).ok_or_else(|| Error::QueryNotFound(name.to_string()))
}

/// Run the strategy list over raw config contents, first non-empty wins.
pub fn extract_query_from_str(contents: &str, name: &str) -> Option<String> {
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(contents, name).filter(|jql| !jql.is_empty()))
}

/// Strategy 1: full YAML parse into the `jql_queries` mapping.
fn yaml_lookup(contents: &str, name: &str) -> Option<String> {
    let config: ConfigFile = serde_yaml::from_str(contents).ok()?;
    config
        .jql_queries
        .get(name)
        .map(|jql| jql.trim().to_string())
}

/// Strategy 2: minimal two-level mapping parser.
///
/// Finds the `jql_queries:` block and reads indented `key: value` scalars
/// under it. Good enough for the flat config shape even when an unrelated
/// part of the document is invalid YAML.
fn mapping_lookup(contents: &str, name: &str) -> Option<String> {
    let mut in_block = false;

    for line in contents.lines() {
        let trimmed = line.trim_end();
        if trimmed.trim_start().starts_with('#') || trimmed.trim().is_empty() {
            continue;
        }

        if !line.starts_with([' ', '\t']) {
            in_block = trimmed.trim() == "jql_queries:";
            continue;
        }

        if !in_block {
            continue;
        }

        let Some((key, value)) = trimmed.trim_start().split_once(':') else {
            continue;
        };
        if key.trim() == name {
            let value = unquote(value.trim());
            if !value.is_empty() {
                return Some(value);
            }
        }
    }

    None
}

/// Strategy 3: line-oriented scan for `<name>:` anywhere in the document,
/// taking the scalar on the same line or on the next non-blank line.
fn line_scan(contents: &str, name: &str) -> Option<String> {
    lazy_static! {
        static ref KEY_LINE: Regex = Regex::new(r"^\s*([^\s:#][^:]*):\s*(.*)$").unwrap();
    }

    let mut want_next = false;

    for line in contents.lines() {
        if want_next {
            if line.trim().is_empty() {
                continue;
            }
            let value = unquote(line.trim());
            if !value.is_empty() {
                return Some(value);
            }
            want_next = false;
        }

        if let Some(caps) = KEY_LINE.captures(line) {
            if caps[1].trim() == name {
                let value = unquote(caps[2].trim());
                if !value.is_empty() {
                    return Some(value);
                }
                want_next = true;
            }
        }
    }

    None
}

/// Strip one layer of matching single or double quotes.
fn unquote(value: &str) -> String {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return value[1..value.len() - 1].to_string();
        }
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"# Weekly report queries
jql_queries:
  weekly_completed_items: "project = PLAT AND status = Done"
  weekly_executive_epics: 'issuetype = Epic ORDER BY project'
  current_blockers: status = Blocked
"#;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_extract_query_from_file() {
        let file = write_config(SAMPLE);
        let jql = extract_query(file.path(), "weekly_completed_items").unwrap();
        assert_eq!(jql, "project = PLAT AND status = Done");
    }

    #[test]
    fn test_extract_query_missing_name() {
        let file = write_config(SAMPLE);
        let err = extract_query(file.path(), "no_such_query").unwrap_err();
        assert!(matches!(err, Error::QueryNotFound(name) if name == "no_such_query"));
    }

    #[test]
    fn test_extract_query_missing_file() {
        let err = extract_query(Path::new("/nonexistent/queries.yaml"), "any").unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
    }

    #[test]
    fn test_resolve_config_path_explicit_missing() {
        let err = resolve_config_path(Some(Path::new("/nonexistent/queries.yaml"))).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
    }

    #[test]
    fn test_resolve_config_path_explicit_present() {
        let file = write_config(SAMPLE);
        let resolved = resolve_config_path(Some(file.path())).unwrap();
        assert_eq!(resolved, file.path());
    }

    #[test]
    fn test_yaml_lookup_unquotes_both_styles() {
        assert_eq!(
            yaml_lookup(SAMPLE, "weekly_executive_epics").unwrap(),
            "issuetype = Epic ORDER BY project"
        );
        assert_eq!(
            yaml_lookup(SAMPLE, "current_blockers").unwrap(),
            "status = Blocked"
        );
    }

    #[test]
    fn test_mapping_lookup_survives_invalid_yaml_elsewhere() {
        let broken = format!("{}\nbroken: [unclosed\n", SAMPLE);
        assert_eq!(
            mapping_lookup(&broken, "weekly_completed_items").unwrap(),
            "project = PLAT AND status = Done"
        );
    }

    #[test]
    fn test_mapping_lookup_ignores_keys_outside_block() {
        let doc = "other:\n  weekly_completed_items: wrong\njql_queries:\n  weekly_completed_items: right\n";
        assert_eq!(
            mapping_lookup(doc, "weekly_completed_items").unwrap(),
            "right"
        );
    }

    #[test]
    fn test_line_scan_value_on_next_line() {
        let doc = "jql_queries:\n  weekly_completed_items:\n    \"project = PLAT\"\n";
        assert_eq!(
            line_scan(doc, "weekly_completed_items").unwrap(),
            "project = PLAT"
        );
    }

    // All strategies must agree on a well-formed config so the extracted JQL
    // does not depend on which one happens to fire first.
    #[test]
    fn test_strategies_agree_on_well_formed_config() {
        for name in ["weekly_completed_items", "weekly_executive_epics"] {
            let results: Vec<String> = STRATEGIES
                .iter()
                .map(|strategy| strategy(SAMPLE, name).unwrap())
                .collect();
            assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
        }
    }

    #[test]
    fn test_extract_query_from_str_is_idempotent() {
        let first = extract_query_from_str(SAMPLE, "weekly_completed_items");
        let second = extract_query_from_str(SAMPLE, "weekly_completed_items");
        assert_eq!(first, second);
        assert_eq!(first.unwrap(), "project = PLAT AND status = Done");
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"a b\""), "a b");
        assert_eq!(unquote("'a b'"), "a b");
        assert_eq!(unquote("a b"), "a b");
        assert_eq!(unquote("\"mismatched'"), "\"mismatched'");
    }
}
