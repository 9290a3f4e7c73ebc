use serde::{Deserialize, Serialize};

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Transport settings for [`crate::HttpSearchClient`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchClientConfig {
    /// Base URLs tried in order. Empty means the hosted service's default
    /// host for the application (`https://{app_id}-dsn.algolia.net`).
    #[serde(default)]
    pub hosts: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for SearchClientConfig {
    fn default() -> Self {
        Self {
            hosts: Vec::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SearchClientConfig {
    pub fn with_hosts<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hosts: hosts.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Read `INSTANTSEARCH_HOSTS` (comma-separated base URLs) and
    /// `INSTANTSEARCH_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let hosts = std::env::var("INSTANTSEARCH_HOSTS")
            .unwrap_or_default()
            .split(',')
            .map(|h| h.trim().trim_end_matches('/').to_string())
            .filter(|h| !h.is_empty())
            .collect::<Vec<_>>();

        let timeout_secs = std::env::var("INSTANTSEARCH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            hosts,
            timeout_secs,
        }
    }

    /// Hosts to try for `app_id`, in order.
    pub fn resolved_hosts(&self, app_id: &str) -> Vec<String> {
        if self.hosts.is_empty() {
            vec![format!("https://{}-dsn.algolia.net", app_id.to_lowercase())]
        } else {
            self.hosts
                .iter()
                .map(|h| h.trim_end_matches('/').to_string())
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests that mutate global env vars must not run in parallel.
    static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[test]
    fn test_default_host_is_derived_from_app_id() {
        let config = SearchClientConfig::default();
        assert_eq!(
            config.resolved_hosts("LATENCY"),
            vec!["https://latency-dsn.algolia.net".to_string()]
        );
    }

    #[test]
    fn test_configured_hosts_win() {
        let config = SearchClientConfig::with_hosts(["http://localhost:7700/", "http://b:7700"]);
        assert_eq!(
            config.resolved_hosts("app"),
            vec![
                "http://localhost:7700".to_string(),
                "http://b:7700".to_string()
            ]
        );
    }

    #[test]
    fn test_deserialize_defaults_timeout() {
        let config: SearchClientConfig =
            serde_json::from_str(r#"{"hosts": ["http://localhost:7700"]}"#).unwrap();
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.hosts.len(), 1);
    }

    #[test]
    fn test_from_env_parses_hosts() {
        let _guard = ENV_MUTEX.lock().unwrap();
        std::env::set_var(
            "INSTANTSEARCH_HOSTS",
            "http://node-a:7700, http://node-b:7700/,,",
        );
        std::env::set_var("INSTANTSEARCH_TIMEOUT_SECS", "12");

        let config = SearchClientConfig::from_env();

        std::env::remove_var("INSTANTSEARCH_HOSTS");
        std::env::remove_var("INSTANTSEARCH_TIMEOUT_SECS");

        assert_eq!(config.hosts, vec!["http://node-a:7700", "http://node-b:7700"]);
        assert_eq!(config.timeout_secs, 12);
    }

    #[test]
    fn test_from_env_empty() {
        let _guard = ENV_MUTEX.lock().unwrap();
        std::env::remove_var("INSTANTSEARCH_HOSTS");
        std::env::set_var("INSTANTSEARCH_TIMEOUT_SECS", "not-a-number");

        let config = SearchClientConfig::from_env();

        std::env::remove_var("INSTANTSEARCH_TIMEOUT_SECS");

        assert!(config.hosts.is_empty());
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
