//! Pipeline driver
//!
//! One linear pass: resolve config, extract the query, probe credentials,
//! fetch, format, write. Config failures are fatal; connectivity failures
//! downgrade the run to template mode and it still exits cleanly. Both live
//! and template runs succeed: the distinction is only visible in the
//! report's Data Source field.

use std::path::Path;

use chrono::Local;

use crate::cli::Args;
use crate::config;
use crate::credentials::Credentials;
use crate::error::Result;
use crate::jira::{JiraClient, SearchResponse};
use crate::report;
use crate::ui;
use crate::writer;

/// Auxiliary query names for the executive variant.
const MILESTONES_QUERY: &str = "upcoming_milestones";
const BLOCKERS_QUERY: &str = "current_blockers";

/// Main application entry point
pub fn run(args: Args) -> Result<()> {
    let config_path = config::resolve_config_path(args.config.as_deref())?;
    let query_name = args.query_name().to_string();
    let jql = config::extract_query(&config_path, &query_name)?;

    if args.verbose {
        ui::info(&format!("Resolved JQL '{}': {}", query_name, jql));
    }

    if args.dry_run {
        ui::info(&format!(
            "Dry run: {} provides query '{}'",
            config_path.display(),
            query_name
        ));
        return Ok(());
    }

    let client = connect();
    let primary = fetch(client.as_ref(), &query_name, &jql, args.max_results);

    // Auxiliary sets only matter when there is a live primary set; each is
    // fetched independently and degrades on its own.
    let (milestones, blockers) = if args.executive && primary.is_some() {
        (
            fetch_named(
                client.as_ref(),
                &config_path,
                MILESTONES_QUERY,
                args.max_results,
            ),
            fetch_named(
                client.as_ref(),
                &config_path,
                BLOCKERS_QUERY,
                args.max_results,
            ),
        )
    } else {
        (None, None)
    };

    if primary.is_none() {
        ui::warn("Generating report from the built-in template");
    }

    let today = Local::now().date_naive();
    let input = report::ReportInput {
        query_name: &query_name,
        executive: args.executive,
        primary: primary.as_ref(),
        milestones: milestones.as_ref(),
        blockers: blockers.as_ref(),
    };

    let markdown = report::render(today, &input);
    let path = writer::write_report(Path::new("."), today, &markdown)?;
    ui::info(&format!("Report written to {}", path.display()));

    if args.open {
        if let Err(err) = writer::open_report(&path) {
            ui::warn(&format!("Could not open report: {}", err));
        }
    }

    Ok(())
}

/// Probe credentials and build the HTTP client. Any failure here means
/// template mode, never a failed run.
fn connect() -> Option<JiraClient> {
    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(missing) => {
            ui::warn(&format!(
                "Jira credentials incomplete; missing: {}",
                missing.join(", ")
            ));
            ui::warn("Export JIRA_API_TOKEN, JIRA_EMAIL and JIRA_BASE_URL to enable live mode");
            return None;
        }
    };

    match JiraClient::new(credentials) {
        Ok(client) => Some(client),
        Err(err) => {
            ui::warn(&format!("Could not build HTTP client: {}", err));
            None
        }
    }
}

/// Execute one query; a failed or skipped fetch yields `None` and the
/// corresponding report section degrades.
fn fetch(
    client: Option<&JiraClient>,
    name: &str,
    jql: &str,
    max_results: u32,
) -> Option<SearchResponse> {
    let client = client?;

    match client.search(name, jql, max_results) {
        Ok(set) => {
            ui::info(&format!("Fetched {} issues for '{}'", set.total, name));
            Some(set)
        }
        Err(err) => {
            ui::warn(&format!("Jira query '{}' failed: {}", name, err));
            None
        }
    }
}

/// Look up an auxiliary query by name in the same config, then execute it.
fn fetch_named(
    client: Option<&JiraClient>,
    config_path: &Path,
    name: &str,
    max_results: u32,
) -> Option<SearchResponse> {
    let jql = match config::extract_query(config_path, name) {
        Ok(jql) => jql,
        Err(err) => {
            ui::warn(&format!("Skipping '{}' section: {}", name, err));
            return None;
        }
    };

    fetch(client, name, &jql, max_results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_dry_run_stops_after_validation() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"jql_queries:\n  weekly_completed_items: \"project = PLAT\"\n")
            .unwrap();

        let args = Args {
            config: Some(file.path().to_path_buf()),
            dry_run: true,
            ..Args::default()
        };

        assert!(run(args).is_ok());
    }

    #[test]
    fn test_dry_run_still_requires_valid_query() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"jql_queries:\n  other: \"project = X\"\n")
            .unwrap();

        let args = Args {
            config: Some(file.path().to_path_buf()),
            dry_run: true,
            ..Args::default()
        };

        let err = run(args).unwrap_err();
        assert!(matches!(err, Error::QueryNotFound(_)));
    }

    #[test]
    fn test_missing_explicit_config_is_fatal() {
        let args = Args {
            config: Some("/nonexistent/queries.yaml".into()),
            dry_run: true,
            ..Args::default()
        };

        let err = run(args).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
    }
}
