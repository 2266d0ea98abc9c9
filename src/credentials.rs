//! Jira credential loading
//!
//! The three environment variables below are all required for live mode:
//! - `JIRA_API_TOKEN`: API token for the account
//! - `JIRA_EMAIL`: account email used for Basic Auth
//! - `JIRA_BASE_URL`: instance base URL (e.g., "https://company.atlassian.net")
//!
//! Missing credentials never fail the run; the report degrades to template
//! mode instead.

pub const ENV_API_TOKEN: &str = "JIRA_API_TOKEN";
pub const ENV_EMAIL: &str = "JIRA_EMAIL";
pub const ENV_BASE_URL: &str = "JIRA_BASE_URL";

/// Credentials for one Jira instance, read once at process start.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub token: String,
    pub email: String,
    pub base_url: String,
}

impl Credentials {
    /// Load credentials from the environment.
    ///
    /// On failure returns the names of the variables that are unset or empty,
    /// for the caller's warning output.
    pub fn from_env() -> Result<Self, Vec<&'static str>> {
        Self::from_parts(
            std::env::var(ENV_API_TOKEN).ok(),
            std::env::var(ENV_EMAIL).ok(),
            std::env::var(ENV_BASE_URL).ok(),
        )
    }

    /// Build credentials from already-read values; empty strings count as
    /// missing.
    pub fn from_parts(
        token: Option<String>,
        email: Option<String>,
        base_url: Option<String>,
    ) -> Result<Self, Vec<&'static str>> {
        let token = non_empty(token);
        let email = non_empty(email);
        let base_url = non_empty(base_url);

        let mut missing = Vec::new();
        if token.is_none() {
            missing.push(ENV_API_TOKEN);
        }
        if email.is_none() {
            missing.push(ENV_EMAIL);
        }
        if base_url.is_none() {
            missing.push(ENV_BASE_URL);
        }

        match (token, email, base_url) {
            (Some(token), Some(email), Some(base_url)) => Ok(Self {
                token,
                email,
                base_url,
            }),
            _ => Err(missing),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_complete() {
        let creds = Credentials::from_parts(
            Some("token123".to_string()),
            Some("alice@example.com".to_string()),
            Some("https://example.atlassian.net".to_string()),
        )
        .unwrap();

        assert_eq!(creds.email, "alice@example.com");
        assert_eq!(creds.base_url, "https://example.atlassian.net");
    }

    #[test]
    fn test_from_parts_one_missing() {
        let missing = Credentials::from_parts(
            Some("token123".to_string()),
            None,
            Some("https://example.atlassian.net".to_string()),
        )
        .unwrap_err();

        assert_eq!(missing, vec![ENV_EMAIL]);
    }

    #[test]
    fn test_from_parts_empty_counts_as_missing() {
        let missing = Credentials::from_parts(
            Some("   ".to_string()),
            Some("alice@example.com".to_string()),
            None,
        )
        .unwrap_err();

        assert_eq!(missing, vec![ENV_API_TOKEN, ENV_BASE_URL]);
    }

    #[test]
    fn test_from_parts_all_missing() {
        let missing = Credentials::from_parts(None, None, None).unwrap_err();
        assert_eq!(missing, vec![ENV_API_TOKEN, ENV_EMAIL, ENV_BASE_URL]);
    }
}
