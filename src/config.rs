/// Client configuration, baked in at build time from the environment.
///
/// `REVIEWGATE_API_BASE_URL`  backend origin (default `http://localhost:8080`)
/// `REVIEWGATE_ADMIN_EMAILS`  comma-separated addresses granted owner access
/// `REVIEWGATE_ADMIN_DOMAIN`  email domain granted owner access (default `brandbuilder.com`)
use crate::session::AdminPolicy;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_ADMIN_DOMAIN: &str = "brandbuilder.com";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub admin_policy: AdminPolicy,
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("REVIEWGATE_API_BASE_URL"),
            option_env!("REVIEWGATE_ADMIN_EMAILS"),
            option_env!("REVIEWGATE_ADMIN_DOMAIN"),
        )
    }

    pub fn from_values(
        api_base_url: Option<&str>,
        admin_emails: Option<&str>,
        admin_domain: Option<&str>,
    ) -> Self {
        let api_base_url = api_base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        let emails = admin_emails
            .unwrap_or_default()
            .split(',')
            .map(|email| email.trim().to_string())
            .filter(|email| !email.is_empty())
            .collect();

        // An explicitly empty domain disables domain matching.
        let domain = match admin_domain {
            None => Some(DEFAULT_ADMIN_DOMAIN.to_string()),
            Some(d) => Some(d.trim().trim_start_matches('@').to_string()).filter(|d| !d.is_empty()),
        };

        Self {
            api_base_url,
            admin_policy: AdminPolicy { emails, domain },
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert!(config.admin_policy.emails.is_empty());
        assert_eq!(config.admin_policy.domain.as_deref(), Some("brandbuilder.com"));
    }

    #[test]
    fn test_values_are_normalized() {
        let config = AppConfig::from_values(
            Some("https://api.reviewgate.io/ "),
            Some(" owner@example.com, ,second@example.com"),
            Some("@partners.io"),
        );
        assert_eq!(config.api_base_url, "https://api.reviewgate.io");
        assert_eq!(
            config.admin_policy.emails,
            vec!["owner@example.com".to_string(), "second@example.com".to_string()]
        );
        assert_eq!(config.admin_policy.domain.as_deref(), Some("partners.io"));

        let no_domain = AppConfig::from_values(None, None, Some(""));
        assert_eq!(no_domain.admin_policy.domain, None);
    }
}
