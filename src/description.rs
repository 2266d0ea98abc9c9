//! Best-effort business-value snippet extraction
//!
//! Jira API v3 returns descriptions as an ADF (Atlassian Document Format)
//! tree; older instances return plain text that may carry HTML markup. Either
//! way the report only wants one short line: the first non-empty text node
//! (ADF) or the first non-empty line after tag/entity stripping (plain text),
//! truncated to 150 characters. This is a documented lossy heuristic, not a
//! rich-text renderer.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

/// Substituted when the description yields nothing usable.
pub const PLACEHOLDER: &str = "No business value summary available";

const MAX_SNIPPET_CHARS: usize = 150;

/// Extract a one-line snippet from an issue description.
pub fn business_value(description: Option<&Value>) -> String {
    let snippet = match description {
        Some(value @ Value::Object(_)) => first_adf_text(value),
        Some(Value::String(text)) => first_plain_line(text),
        _ => None,
    };

    snippet.unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Depth-first walk of an ADF tree for the first non-empty `text` node.
/// Only paragraph-style text content is interpreted.
fn first_adf_text(node: &Value) -> Option<String> {
    if let Some(text) = node.get("text").and_then(Value::as_str) {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            return Some(truncate(trimmed));
        }
    }

    node.get("content")?
        .as_array()?
        .iter()
        .find_map(first_adf_text)
}

/// First non-empty line of plain text after HTML tag and entity stripping.
fn first_plain_line(text: &str) -> Option<String> {
    let stripped = strip_html(text);

    stripped
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(truncate)
}

fn strip_html(text: &str) -> String {
    lazy_static! {
        static ref TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
    }

    TAG.replace_all(text, "")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
}

fn truncate(text: &str) -> String {
    text.chars().take(MAX_SNIPPET_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_adf_first_text_node() {
        let doc = json!({
            "type": "doc",
            "version": 1,
            "content": [
                {"type": "paragraph", "content": [
                    {"type": "text", "text": "  "},
                    {"type": "text", "text": "Cuts onboarding time in half."}
                ]},
                {"type": "paragraph", "content": [
                    {"type": "text", "text": "Second paragraph."}
                ]}
            ]
        });

        assert_eq!(
            business_value(Some(&doc)),
            "Cuts onboarding time in half."
        );
    }

    #[test]
    fn test_adf_without_text_nodes_yields_placeholder() {
        let doc = json!({
            "type": "doc",
            "version": 1,
            "content": [{"type": "rule"}]
        });

        assert_eq!(business_value(Some(&doc)), PLACEHOLDER);
    }

    #[test]
    fn test_plain_text_html_stripping() {
        let text = json!("<p>Reduces <b>support &amp; ops</b> load</p>\nMore detail");
        assert_eq!(
            business_value(Some(&text)),
            "Reduces support & ops load"
        );
    }

    #[test]
    fn test_plain_text_skips_blank_lines() {
        let text = json!("\n   \nActual first line\nSecond line");
        assert_eq!(business_value(Some(&text)), "Actual first line");
    }

    #[test]
    fn test_missing_description_yields_placeholder() {
        assert_eq!(business_value(None), PLACEHOLDER);
        assert_eq!(business_value(Some(&json!(null))), PLACEHOLDER);
    }

    #[test]
    fn test_snippet_is_truncated_to_150_chars() {
        let long = "x".repeat(400);
        let text = json!(long);
        assert_eq!(business_value(Some(&text)).chars().count(), 150);
    }
}
