//! The InstantSearch component: creation, mounting, and forwarding of the
//! resolved client to the render target.

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::agent::UsageAgent;
use crate::client::{ClientFactory, SearchClient};
use crate::error::Result;
use crate::lifecycle::ClientLifecycle;
use crate::props::{InstantSearchDefaults, InstantSearchProps, RootSpec};

/// Props forwarded downstream after every application.
pub struct RenderProps<C: ?Sized> {
    pub algolia_client: Arc<C>,
    pub index_name: String,
    pub root: RootSpec,
    pub rest: Map<String, Value>,
}

impl<C: ?Sized> RenderProps<C> {
    /// Everything except the client, as JSON. Named props come first; a
    /// pass-through key never overrides them.
    pub fn props_without_client(&self) -> Value {
        let mut map = Map::new();
        map.insert("indexName".to_string(), Value::String(self.index_name.clone()));
        map.insert("root".to_string(), self.root.to_json());
        for (key, value) in &self.rest {
            if !map.contains_key(key) {
                map.insert(key.clone(), value.clone());
            }
        }
        Value::Object(map)
    }
}

/// Whatever orchestrates searches for the widget tree. Receives the active
/// client plus pass-through props on every application.
pub trait RenderTarget<C: ?Sized> {
    type Output;

    fn render(&mut self, props: RenderProps<C>) -> Self::Output;
}

impl<C, O, F> RenderTarget<C> for F
where
    C: ?Sized,
    F: FnMut(RenderProps<C>) -> O,
{
    type Output = O;

    fn render(&mut self, props: RenderProps<C>) -> O {
        self(props)
    }
}

/// Create an InstantSearch component bound to `factory`.
///
/// The returned component can be mounted any number of times; each mount
/// owns its own client state.
pub fn create_instant_search<C, F>(
    factory: F,
    defaults: InstantSearchDefaults,
) -> CustomInstantSearch<C, F>
where
    C: SearchClient + ?Sized,
    F: ClientFactory<C>,
{
    CustomInstantSearch {
        factory: Arc::new(factory),
        defaults,
        agent: UsageAgent::default(),
        _client: PhantomData,
    }
}

pub struct CustomInstantSearch<C: ?Sized, F> {
    factory: Arc<F>,
    defaults: InstantSearchDefaults,
    agent: UsageAgent,
    _client: PhantomData<fn() -> Arc<C>>,
}

impl<C, F> CustomInstantSearch<C, F>
where
    C: SearchClient + ?Sized,
    F: ClientFactory<C>,
{
    /// Replace the usage agent added to clients (defaults to this crate's
    /// name and version).
    pub fn with_agent(mut self, agent: UsageAgent) -> Self {
        self.agent = agent;
        self
    }

    pub fn defaults(&self) -> &InstantSearchDefaults {
        &self.defaults
    }

    pub fn agent(&self) -> &UsageAgent {
        &self.agent
    }

    pub fn mount<T>(&self, target: T) -> InstantSearch<C, F, T>
    where
        T: RenderTarget<C>,
    {
        InstantSearch {
            factory: Arc::clone(&self.factory),
            defaults: self.defaults.clone(),
            lifecycle: ClientLifecycle::new(self.agent.clone()),
            target,
        }
    }
}

/// A mounted InstantSearch component.
pub struct InstantSearch<C: ?Sized, F, T> {
    factory: Arc<F>,
    defaults: InstantSearchDefaults,
    lifecycle: ClientLifecycle<C>,
    target: T,
}

impl<C, F, T> InstantSearch<C, F, T>
where
    C: SearchClient + ?Sized,
    F: ClientFactory<C>,
    T: RenderTarget<C>,
{
    /// Apply a new set of props and forward the active client downstream.
    ///
    /// Nothing is rendered when resolution fails; the previous client stays
    /// active.
    pub fn apply(&mut self, props: &InstantSearchProps<C>) -> Result<T::Output> {
        let client = self.lifecycle.apply(&*self.factory, props)?;
        let root = props
            .root
            .clone()
            .unwrap_or_else(|| self.defaults.root.clone());

        Ok(self.target.render(RenderProps {
            algolia_client: client,
            index_name: props.index_name.clone(),
            root,
            rest: props.rest.clone(),
        }))
    }

    pub fn client(&self) -> Option<&Arc<C>> {
        self.lifecycle.active_client()
    }

    pub fn lifecycle(&self) -> &ClientLifecycle<C> {
        &self.lifecycle
    }

    pub fn render_target(&self) -> &T {
        &self.target
    }

    pub fn render_target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Tear down the component, dropping its client state.
    pub fn unmount(self) -> T {
        self.target
    }
}
