use std::process;

use clap::error::{ContextKind, ErrorKind};
use clap::Parser;

use jira_report::cli::Args;
use jira_report::error::Error;
use jira_report::{app, config, ui};

fn main() {
    let args = parse_args();

    if let Err(err) = app::run(args) {
        ui::error(&err.to_string());
        print_remediation(&err);
        process::exit(1);
    }
}

/// Parse arguments with a custom surface for unknown flags: clap's default
/// exit code is 2, but this tool reports `[ERROR] Unknown option: <flag>`
/// and exits 1.
fn parse_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{}", err);
                process::exit(0);
            }
            ErrorKind::UnknownArgument => {
                let flag = err
                    .get(ContextKind::InvalidArg)
                    .map(|value| value.to_string())
                    .unwrap_or_default();
                ui::error(&format!("Unknown option: {}", flag));
                process::exit(1);
            }
            _ => {
                ui::error(&err.to_string());
                process::exit(1);
            }
        },
    }
}

/// Every fatal error comes with actionable remediation text.
fn print_remediation(err: &Error) {
    match err {
        Error::ConfigNotFound(path) => {
            eprintln!("Create {} from the bundled template:", path.display());
            eprintln!(
                "  cp {} {}",
                config::TEMPLATE_CONFIG_PATH,
                config::DEFAULT_CONFIG_PATH
            );
        }
        Error::QueryNotFound(name) => {
            eprintln!("Add the query to the config file:");
            eprintln!("  jql_queries:");
            eprintln!("    {}: \"project = PLAT AND status = Done\"", name);
        }
        _ => {}
    }
}
