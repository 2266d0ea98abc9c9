//! Markdown report formatting
//!
//! Pure transforms from fetched issue sets into report sections. Formatting
//! never performs I/O and never fabricates numbers: when no live data was
//! fetched every quantitative claim is replaced by placeholder prose.

use chrono::NaiveDate;

use crate::description;
use crate::jira::{Issue, SearchResponse};

/// Data Source header value for a live run.
pub const LIVE_SOURCE: &str = "Live Jira Data";

/// Data Source header value for a degraded run.
pub const TEMPLATE_SOURCE: &str = "Template Data (Jira connection unavailable)";

const MARKER_COMPLETE: &str = "\u{2705}"; // ✅
const MARKER_ACTIVE: &str = "\u{1F504}"; // 🔄
const MARKER_BLOCKED: &str = "\u{1F6AB}"; // 🚫
const MARKER_PENDING: &str = "\u{23F3}"; // ⏳

/// Everything the formatter needs for one report.
///
/// A `None` issue set means that fetch failed or was skipped; the
/// corresponding section degrades rather than the report failing.
pub struct ReportInput<'a> {
    pub query_name: &'a str,
    pub executive: bool,
    pub primary: Option<&'a SearchResponse>,
    pub milestones: Option<&'a SearchResponse>,
    pub blockers: Option<&'a SearchResponse>,
}

/// Map a status name to its visual marker.
///
/// Total over all inputs: every status name maps to exactly one of the four
/// markers, with unmatched names defaulting to pending.
pub fn status_marker(status: &str) -> &'static str {
    let status = status.to_lowercase();

    if ["done", "closed", "resolved", "complete"]
        .iter()
        .any(|family| status.contains(family))
    {
        MARKER_COMPLETE
    } else if ["block", "hold", "impediment"]
        .iter()
        .any(|family| status.contains(family))
    {
        MARKER_BLOCKED
    } else if ["progress", "review", "development"]
        .iter()
        .any(|family| status.contains(family))
    {
        MARKER_ACTIVE
    } else {
        MARKER_PENDING
    }
}

/// Timing label for executive formatting, derived from status alone.
pub fn timing_label(status: &str) -> &'static str {
    let status = status.to_lowercase();

    if ["done", "closed", "resolved", "complete"]
        .iter()
        .any(|family| status.contains(family))
    {
        "Completed This Week"
    } else if ["review", "testing", "verif"]
        .iter()
        .any(|family| status.contains(family))
    {
        "Finishing This Week"
    } else {
        "In Progress"
    }
}

/// Render the full report markdown.
pub fn render(date: NaiveDate, input: &ReportInput) -> String {
    let mut out = header(date, input);

    match input.primary {
        Some(primary) => {
            out.push_str(&primary_section(primary, input.executive));
            if input.executive {
                out.push_str(&aux_section("Upcoming Milestones", input.milestones));
                out.push_str(&aux_section("Current Blockers", input.blockers));
            }
        }
        None => out.push_str(&template_sections(input.executive)),
    }

    out
}

fn header(date: NaiveDate, input: &ReportInput) -> String {
    let source = if input.primary.is_some() {
        LIVE_SOURCE
    } else {
        TEMPLATE_SOURCE
    };

    format!(
        "# Weekly Jira Report\n\n\
         **Date**: {}\n\
         **Generated by**: {}\n\
         **Query**: {}\n\
         **Data Source**: {}\n",
        date.format("%Y-%m-%d"),
        concat!("jira-report v", env!("CARGO_PKG_VERSION")),
        input.query_name,
        source,
    )
}

fn primary_section(set: &SearchResponse, executive: bool) -> String {
    let title = if executive {
        "Epic Status by Project"
    } else {
        "Completed This Week"
    };

    let mut out = format!("\n## {}\n\n", title);

    if set.total == 0 {
        out.push_str("No issues found\n");
        return out;
    }

    out.push_str(&format!("**Total: {} issues**\n", set.total));

    for (key, name, issues) in group_by_project(&set.issues) {
        if key == name {
            out.push_str(&format!("\n### {}\n\n", name));
        } else {
            out.push_str(&format!("\n### {} ({})\n\n", name, key));
        }

        for issue in issues {
            out.push_str(&issue_block(issue, executive));
        }
    }

    out
}

/// Group issues by project key, preserving first-appearance order of
/// projects and query order within each project.
fn group_by_project(issues: &[Issue]) -> Vec<(&str, &str, Vec<&Issue>)> {
    let mut groups: Vec<(&str, &str, Vec<&Issue>)> = Vec::new();

    for issue in issues {
        let key = issue.fields.project_key();
        match groups.iter_mut().find(|(k, _, _)| *k == key) {
            Some((_, _, members)) => members.push(issue),
            None => groups.push((key, &issue.fields.project.name, vec![issue])),
        }
    }

    groups
}

fn issue_block(issue: &Issue, executive: bool) -> String {
    let fields = &issue.fields;
    let marker = status_marker(&fields.status.name);

    let mut detail = format!(
        "Status: {} | Assignee: {} | Priority: {}",
        fields.status.name,
        fields.assignee_name(),
        fields.priority_name(),
    );
    if let Some(updated) = &fields.updated {
        // Date part only; the full timestamp is noise in a weekly report.
        let day: String = updated.chars().take(10).collect();
        detail.push_str(&format!(" | Updated: {}", day));
    }
    if let Some(duedate) = &fields.duedate {
        detail.push_str(&format!(" | Due: {}", duedate));
    }
    if let Some(parent) = &fields.parent {
        detail.push_str(&format!(" | Parent: {}", parent.key));
    }

    let mut out = format!(
        "- **[{}]** {} {}\n  - {}\n",
        issue.key, fields.summary, marker, detail
    );

    if executive {
        out.push_str(&format!(
            "  - Timing: {}\n  - Business value: {}\n",
            timing_label(&fields.status.name),
            description::business_value(fields.description.as_ref()),
        ));
    }

    out
}

/// Auxiliary executive section; degrades to "No data available" when the
/// fetch failed or its cached data could not be interpreted.
fn aux_section(title: &str, set: Option<&SearchResponse>) -> String {
    let mut out = format!("\n## {}\n\n", title);

    match set {
        None => out.push_str("No data available\n"),
        Some(set) if set.total == 0 => out.push_str("No issues found\n"),
        Some(set) => {
            for issue in &set.issues {
                out.push_str(&issue_block(issue, false));
            }
        }
    }

    out
}

/// Placeholder sections for template mode. Static prose only: no counts, no
/// project coverage, no velocity language derived from data that was never
/// fetched.
fn template_sections(executive: bool) -> String {
    let mut out = String::new();

    let title = if executive {
        "Epic Status by Project"
    } else {
        "Completed This Week"
    };

    out.push_str(&format!(
        "\n## {}\n\n\
         _Jira connection unavailable. This report was generated from the\n\
         built-in template; populate the sections below manually._\n\n\
         - [Add items from team standups and delivery notes]\n\
         - [Add notable launches, fixes, and reviews]\n",
        title
    ));

    if executive {
        for section in ["Upcoming Milestones", "Current Blockers"] {
            out.push_str(&format!(
                "\n## {}\n\n- [Populate manually while Jira is unavailable]\n",
                section
            ));
        }
    }

    out.push_str(
        "\n## Next Steps\n\n\
         - Export the Jira environment variables and rerun to replace this\n\
           placeholder content with live data.\n",
    );

    out
}
