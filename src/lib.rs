//! # jira-report
//!
//! Weekly Jira report generator: extracts a named JQL query from a YAML
//! config, optionally queries the Jira REST API, and writes a dated markdown
//! report. When credentials are missing or the fetch fails the report is
//! generated from a built-in template instead of failing the run.

pub mod app;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod description;
pub mod error;
pub mod jira;
pub mod report;
pub mod ui;
pub mod writer;

// Re-export commonly used types
pub use cli::Args;
pub use credentials::Credentials;
pub use error::{Error, Result};
pub use jira::{Issue, JiraClient, SearchResponse};
