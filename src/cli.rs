use std::path::PathBuf;

use clap::Parser;

/// Default query name for the standard (completed items) report.
pub const DEFAULT_QUERY: &str = "weekly_completed_items";

/// Default query name for the executive (epic status) report.
pub const DEFAULT_EXECUTIVE_QUERY: &str = "weekly_executive_epics";

#[derive(Parser, Debug, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Override the config file path
    #[clap(short, long, value_parser)]
    pub config: Option<PathBuf>,

    /// Named JQL query to run (default depends on the report variant)
    #[clap(short, long, value_parser)]
    pub query: Option<String>,

    /// Validate config and query extraction only; no network call, no report file
    #[clap(long, value_parser, default_value_t = false)]
    pub dry_run: bool,

    /// Print the resolved JQL query before execution
    #[clap(short, long, value_parser, default_value_t = false)]
    pub verbose: bool,

    /// Executive variant: epic timing labels plus milestone and blocker sections
    #[clap(long, value_parser, default_value_t = false)]
    pub executive: bool,

    /// Maximum number of issues to request per query
    #[clap(long, value_parser, default_value_t = 100)]
    pub max_results: u32,

    /// Open the written report in the default handler when done
    #[clap(long, value_parser, default_value_t = false)]
    pub open: bool,
}

impl Args {
    /// The query name to extract: explicit `--query` wins, otherwise the
    /// variant default.
    pub fn query_name(&self) -> &str {
        match &self.query {
            Some(name) => name,
            None if self.executive => DEFAULT_EXECUTIVE_QUERY,
            None => DEFAULT_QUERY,
        }
    }
}
