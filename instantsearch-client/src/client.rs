use std::sync::{Arc, Mutex};
use std::time::Duration;

use instantsearch::{BoxError, ClientFactory, SearchClient};
use serde_json::Value;

use crate::config::SearchClientConfig;
use crate::error::ClientError;

/// Agent every client reports before any library tags it.
pub fn base_agent() -> String {
    format!("InstantSearch Rust client ({})", env!("CARGO_PKG_VERSION"))
}

/// HTTP client for the hosted search service.
///
/// Authenticates with `X-Algolia-Application-Id` / `X-Algolia-API-Key` and
/// reports its agents through the `x-algolia-agent` query parameter.
pub struct HttpSearchClient {
    app_id: String,
    api_key: String,
    hosts: Vec<String>,
    http_client: reqwest::Client,
    agents: Mutex<Vec<String>>,
}

impl HttpSearchClient {
    pub fn new(app_id: &str, api_key: &str) -> Result<Self, ClientError> {
        Self::with_config(app_id, api_key, &SearchClientConfig::default())
    }

    pub fn with_config(
        app_id: &str,
        api_key: &str,
        config: &SearchClientConfig,
    ) -> Result<Self, ClientError> {
        if app_id.trim().is_empty() {
            return Err(ClientError::Config("app_id must not be empty".into()));
        }
        if api_key.trim().is_empty() {
            return Err(ClientError::Config("api_key must not be empty".into()));
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            app_id: app_id.to_string(),
            api_key: api_key.to_string(),
            hosts: config.resolved_hosts(app_id),
            http_client,
            agents: Mutex::new(vec![base_agent()]),
        })
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    pub fn agents(&self) -> Vec<String> {
        self.agents.lock().map(|a| a.clone()).unwrap_or_default()
    }

    /// Value sent as `x-algolia-agent`.
    pub fn agent_header(&self) -> String {
        self.agents().join("; ")
    }

    /// Run a query against `index_name`. Hosts are tried in order; a
    /// transport failure or 5xx moves on to the next one.
    pub async fn search(&self, index_name: &str, params: &Value) -> Result<Value, ClientError> {
        let path = format!("/1/indexes/{}/query", urlencoding::encode(index_name));
        let agent = self.agent_header();
        let mut last_error = String::from("no hosts configured");

        for host in &self.hosts {
            match self.post_json(host, &path, &agent, params).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_retryable() => {
                    tracing::warn!("[SEARCH {}] host {} failed, trying next: {}", index_name, host, e);
                    last_error = e.to_string();
                }
                Err(e) => return Err(e),
            }
        }

        Err(ClientError::Unreachable(last_error))
    }

    async fn post_json(
        &self,
        host: &str,
        path: &str,
        agent: &str,
        body: &Value,
    ) -> Result<Value, ClientError> {
        let url = format!("{}{}", host, path);

        let response = self
            .http_client
            .post(&url)
            .query(&[("x-algolia-agent", agent)])
            .header("X-Algolia-Application-Id", &self.app_id)
            .header("X-Algolia-API-Key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read response body".into());
            let message = serde_json::from_str::<Value>(&body_text)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
                .unwrap_or(body_text);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl SearchClient for HttpSearchClient {
    fn add_algolia_agent(&self, agent: &str) -> Result<(), BoxError> {
        let mut agents = self
            .agents
            .lock()
            .map_err(|_| ClientError::Config("agent list lock poisoned".into()))?;
        if !agents.iter().any(|a| a == agent) {
            agents.push(agent.to_string());
        }
        Ok(())
    }
}

/// Factory building an [`HttpSearchClient`] per credential pair, for use with
/// [`instantsearch::create_instant_search`].
pub fn http_client_factory(config: SearchClientConfig) -> impl ClientFactory<HttpSearchClient> {
    move |app_id: &str, api_key: &str| -> Result<Arc<HttpSearchClient>, ClientError> {
        let client = HttpSearchClient::with_config(app_id, api_key, &config)?;
        tracing::debug!(app_id = %app_id, hosts = ?client.hosts(), "created search client");
        Ok(Arc::new(client))
    }
}
