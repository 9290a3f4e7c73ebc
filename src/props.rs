use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{InstantSearchError, Result};

/// Root primitive the widget tree is rendered into, plus static properties
/// merged onto it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootSpec {
    #[serde(rename = "Root")]
    pub component: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub props: Map<String, Value>,
}

impl RootSpec {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            props: Map::new(),
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: Value) -> Self {
        self.props.insert(key.into(), value);
        self
    }

    /// JSON form forwarded downstream: `{"Root": .., "props": ..}`, with
    /// `props` omitted when empty.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("Root".to_string(), Value::String(self.component.clone()));
        if !self.props.is_empty() {
            map.insert("props".to_string(), Value::Object(self.props.clone()));
        }
        Value::Object(map)
    }
}

impl Default for RootSpec {
    fn default() -> Self {
        Self::new("div")
    }
}

/// Defaults fixed when a custom InstantSearch component is created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstantSearchDefaults {
    pub root: RootSpec,
}

impl InstantSearchDefaults {
    pub fn with_root(root: RootSpec) -> Self {
        Self { root }
    }
}

/// Props for one application of the InstantSearch component.
///
/// Supply either `app_id` + `api_key` (the client is built by the factory) or
/// a ready `algolia_client`, never both.
pub struct InstantSearchProps<C: ?Sized> {
    pub app_id: Option<String>,
    pub api_key: Option<String>,
    pub algolia_client: Option<Arc<C>>,
    pub index_name: String,
    /// Overrides the component's default root when set.
    pub root: Option<RootSpec>,
    /// Everything else; forwarded untouched.
    pub rest: Map<String, Value>,
}

impl<C: ?Sized> InstantSearchProps<C> {
    pub fn new(index_name: impl Into<String>) -> Self {
        Self {
            app_id: None,
            api_key: None,
            algolia_client: None,
            index_name: index_name.into(),
            root: None,
            rest: Map::new(),
        }
    }

    /// Credential-mode props.
    pub fn with_credentials(
        app_id: impl Into<String>,
        api_key: impl Into<String>,
        index_name: impl Into<String>,
    ) -> Self {
        Self::new(index_name).credentials(app_id, api_key)
    }

    /// Provided-client-mode props.
    pub fn with_client(client: Arc<C>, index_name: impl Into<String>) -> Self {
        Self::new(index_name).client(client)
    }

    pub fn credentials(mut self, app_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self.api_key = Some(api_key.into());
        self
    }

    pub fn client(mut self, client: Arc<C>) -> Self {
        self.algolia_client = Some(client);
        self
    }

    pub fn root(mut self, root: RootSpec) -> Self {
        self.root = Some(root);
        self
    }

    pub fn prop(mut self, key: impl Into<String>, value: Value) -> Self {
        self.rest.insert(key.into(), value);
        self
    }

    /// Work out where the client comes from, rejecting inconsistent props.
    pub fn client_source(&self) -> Result<ClientSource<'_, C>> {
        match (
            &self.algolia_client,
            self.app_id.as_deref(),
            self.api_key.as_deref(),
        ) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(InstantSearchError::Config(
                "both algolia_client and app_id/api_key were supplied; pass one or the other"
                    .to_string(),
            )),
            (Some(client), None, None) => Ok(ClientSource::Provided(client)),
            (None, Some(app_id), Some(api_key)) => {
                Ok(ClientSource::Credentials { app_id, api_key })
            }
            (None, Some(_), None) => Err(InstantSearchError::Config(
                "app_id was supplied without api_key".to_string(),
            )),
            (None, None, Some(_)) => Err(InstantSearchError::Config(
                "api_key was supplied without app_id".to_string(),
            )),
            (None, None, None) => Err(InstantSearchError::Config(
                "either algolia_client or app_id and api_key must be supplied".to_string(),
            )),
        }
    }
}

impl<C: ?Sized> Clone for InstantSearchProps<C> {
    fn clone(&self) -> Self {
        Self {
            app_id: self.app_id.clone(),
            api_key: self.api_key.clone(),
            algolia_client: self.algolia_client.clone(),
            index_name: self.index_name.clone(),
            root: self.root.clone(),
            rest: self.rest.clone(),
        }
    }
}

impl<C: ?Sized> fmt::Debug for InstantSearchProps<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstantSearchProps")
            .field("app_id", &self.app_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field(
                "algolia_client",
                &self.algolia_client.as_ref().map(Arc::as_ptr),
            )
            .field("index_name", &self.index_name)
            .field("root", &self.root)
            .field("rest", &self.rest)
            .finish()
    }
}

/// Where the active client comes from for a given set of props.
pub enum ClientSource<'a, C: ?Sized> {
    Provided(&'a Arc<C>),
    Credentials { app_id: &'a str, api_key: &'a str },
}
