use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::props::{InstantSearchProps, RootSpec};

pub const CONFIG_FILE_NAME: &str = "instantsearch.json";

/// Credentials and defaults for mounting InstantSearch from a config file or
/// the environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstantSearchConfig {
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub index_name: String,
    #[serde(default)]
    pub root: Option<RootSpec>,
}

impl InstantSearchConfig {
    /// Load and parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str::<InstantSearchConfig>(&content)?;
        Ok(config)
    }

    /// Load from {dir}/instantsearch.json, falling back to env vars.
    pub fn load_or_default(dir: &Path) -> Self {
        let config_json = dir.join(CONFIG_FILE_NAME);

        if config_json.exists() {
            match Self::load(&config_json) {
                Ok(config) => {
                    tracing::info!(
                        "Loaded instantsearch config: app_id={}, index_name={}",
                        config.app_id.as_deref().unwrap_or("-"),
                        config.index_name
                    );
                    return config;
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to load {}: {}, using environment",
                        CONFIG_FILE_NAME,
                        e
                    );
                }
            }
        }

        Self::from_env()
    }

    /// Read `INSTANTSEARCH_APP_ID`, `INSTANTSEARCH_API_KEY` and
    /// `INSTANTSEARCH_INDEX_NAME`. Empty values count as unset.
    pub fn from_env() -> Self {
        let var = |name: &str| {
            std::env::var(name)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let config = InstantSearchConfig {
            app_id: var("INSTANTSEARCH_APP_ID"),
            api_key: var("INSTANTSEARCH_API_KEY"),
            index_name: var("INSTANTSEARCH_INDEX_NAME").unwrap_or_default(),
            root: None,
        };

        tracing::info!(
            "No {} found, loaded config from environment: app_id={}",
            CONFIG_FILE_NAME,
            config.app_id.as_deref().unwrap_or("-")
        );
        config
    }

    /// Credential-mode props for this config. Missing credentials surface as a
    /// configuration error on the first application.
    pub fn into_props<C: ?Sized>(self) -> InstantSearchProps<C> {
        InstantSearchProps {
            app_id: self.app_id,
            api_key: self.api_key,
            algolia_client: None,
            index_name: self.index_name,
            root: self.root,
            rest: serde_json::Map::new(),
        }
    }
}
