//! Console output helpers
//!
//! Fatal errors carry an `[ERROR]` prefix, degradable conditions a
//! `[WARNING]` prefix; both go to stderr. Progress lines go to stdout.

use colored::Colorize;

/// Progress line on stdout.
pub fn info(msg: &str) {
    println!("{} {}", ">".bright_green(), msg);
}

/// Degradable condition: the run continues.
pub fn warn(msg: &str) {
    eprintln!("{} {}", "[WARNING]".yellow().bold(), msg);
}

/// Fatal condition: the caller exits non-zero after remediation output.
pub fn error(msg: &str) {
    eprintln!("{} {}", "[ERROR]".red().bold(), msg);
}
