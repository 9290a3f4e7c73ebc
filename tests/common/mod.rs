use std::sync::{Arc, Mutex};

use instantsearch::{BoxError, ClientFactory, RenderProps, RenderTarget, SearchClient};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Route lifecycle logs to the test output; honours RUST_LOG.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

/// Client fake that records every agent it is tagged with.
#[derive(Default)]
pub struct MockClient {
    agents: Mutex<Vec<String>>,
    reject_agents: bool,
}

impl MockClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[allow(dead_code)]
    pub fn rejecting() -> Arc<Self> {
        Arc::new(Self {
            reject_agents: true,
            ..Default::default()
        })
    }

    pub fn agents(&self) -> Vec<String> {
        self.agents.lock().unwrap().clone()
    }

    pub fn agent_calls(&self) -> usize {
        self.agents.lock().unwrap().len()
    }
}

impl SearchClient for MockClient {
    fn add_algolia_agent(&self, agent: &str) -> Result<(), BoxError> {
        if self.reject_agents {
            return Err("agent rejected".into());
        }
        self.agents.lock().unwrap().push(agent.to_string());
        Ok(())
    }
}

/// Factory fake: builds a fresh client per call and remembers the arguments.
#[derive(Default)]
pub struct RecordingFactory {
    calls: Mutex<Vec<(String, String)>>,
    created: Mutex<Vec<Arc<MockClient>>>,
    fail_with: Mutex<Option<String>>,
}

impl RecordingFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    #[allow(dead_code)]
    pub fn created(&self) -> Vec<Arc<MockClient>> {
        self.created.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn fail_next(&self, message: &str) {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
    }
}

#[derive(Debug)]
pub struct FactoryFailure(pub String);

impl std::fmt::Display for FactoryFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for FactoryFailure {}

/// Shares one `RecordingFactory` between the component and the test body.
pub struct SharedFactory(pub Arc<RecordingFactory>);

impl ClientFactory<MockClient> for SharedFactory {
    fn create(&self, app_id: &str, api_key: &str) -> Result<Arc<MockClient>, BoxError> {
        let factory = &self.0;
        if let Some(message) = factory.fail_with.lock().unwrap().take() {
            return Err(Box::new(FactoryFailure(message)));
        }
        factory
            .calls
            .lock()
            .unwrap()
            .push((app_id.to_string(), api_key.to_string()));
        let client = MockClient::new();
        factory.created.lock().unwrap().push(Arc::clone(&client));
        Ok(client)
    }
}

/// Render target fake keeping every forwarded set of props.
#[derive(Default)]
pub struct RecordingTarget {
    pub renders: Vec<RenderProps<MockClient>>,
}

impl RecordingTarget {
    pub fn last(&self) -> &RenderProps<MockClient> {
        self.renders.last().expect("nothing rendered yet")
    }

    #[allow(dead_code)]
    pub fn last_props_without_client(&self) -> Value {
        self.last().props_without_client()
    }
}

impl RenderTarget<MockClient> for RecordingTarget {
    type Output = ();

    fn render(&mut self, props: RenderProps<MockClient>) {
        self.renders.push(props);
    }
}
