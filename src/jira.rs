//! Jira REST API client
//!
//! One blocking GET against `/rest/api/3/search` per query, Basic Auth with
//! email:token. Timeout is 30 seconds with zero retries: a single failed
//! attempt is final for the run and the caller falls back to template mode.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::ui;

/// Fields requested from the search endpoint.
const FIELDS: &str = "summary,status,assignee,project,priority,updated,parent,description,duedate";

const TIMEOUT: Duration = Duration::from_secs(30);

/// Response of one JQL search execution.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub total: u64,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

/// One issue returned by the search API.
#[derive(Debug, Deserialize)]
pub struct Issue {
    pub key: String,
    pub fields: IssueFields,
}

#[derive(Debug, Deserialize)]
pub struct IssueFields {
    pub summary: String,
    pub status: Status,
    pub assignee: Option<Assignee>,
    pub project: Project,
    pub priority: Option<Priority>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub parent: Option<Parent>,
    #[serde(default)]
    pub duedate: Option<String>,
    /// Either an ADF document (API v3) or a plain string; interpreted lazily.
    #[serde(default)]
    pub description: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct Status {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct Assignee {
    #[serde(rename = "displayName")]
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Priority {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct Parent {
    pub key: String,
}

impl IssueFields {
    /// Assignee display name, "Unassigned" when null.
    pub fn assignee_name(&self) -> &str {
        self.assignee
            .as_ref()
            .map(|a| a.display_name.as_str())
            .unwrap_or("Unassigned")
    }

    /// Priority name, "None" when null.
    pub fn priority_name(&self) -> &str {
        self.priority
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("None")
    }

    /// Stable grouping key for report sections: the project key, falling back
    /// to the project name when the API omits the key.
    pub fn project_key(&self) -> &str {
        self.project.key.as_deref().unwrap_or(&self.project.name)
    }
}

pub struct JiraClient {
    http: Client,
    credentials: Credentials,
}

impl JiraClient {
    pub fn new(credentials: Credentials) -> Result<Self> {
        let http = Client::builder().timeout(TIMEOUT).build()?;
        Ok(Self { http, credentials })
    }

    /// Execute one JQL search and materialize the result set.
    ///
    /// The raw response body is cached best-effort under the system temp dir,
    /// keyed by `name`; a cache write failure is only a warning.
    pub fn search(&self, name: &str, jql: &str, max_results: u32) -> Result<SearchResponse> {
        let url = format!(
            "{}/rest/api/3/search",
            self.credentials.base_url.trim_end_matches('/')
        );

        let max_results = max_results.to_string();
        let response = self
            .http
            .get(&url)
            .basic_auth(&self.credentials.email, Some(&self.credentials.token))
            .header(ACCEPT, "application/json")
            .query(&[
                ("jql", jql),
                ("maxResults", max_results.as_str()),
                ("fields", FIELDS),
            ])
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        if let Err(err) = std::fs::write(cache_path(name), &body) {
            ui::warn(&format!("Could not cache raw response: {}", err));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Temp-file location holding the raw JSON of the last fetch for `name`.
pub fn cache_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("jira-report-{}.json", name))
}
