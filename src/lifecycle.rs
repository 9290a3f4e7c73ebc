//! Client resolution for a mounted widget tree.
//!
//! Each props application is resolved against the previously active client:
//!
//!   provided client   --[same Arc]----------------> Unchanged
//!   provided client   --[different Arc / first]---> Replaced (tag it)
//!   credentials       --[same app_id + api_key]---> Unchanged
//!   credentials       --[changed pair / first]----> Replaced (factory call, tag it)
//!
//! Provided clients are compared by identity, never by value. Tagging is
//! tracked per client identity across the whole lifetime of the tree, so a
//! client that comes back after another one took its place is not tagged twice.

use std::sync::{Arc, Weak};

use crate::agent::UsageAgent;
use crate::client::{ClientFactory, SearchClient};
use crate::error::{InstantSearchError, Result};
use crate::props::{ClientSource, InstantSearchProps};

/// The client currently exposed downstream and the credentials that built it.
pub struct ResolvedClient<C: ?Sized> {
    active_client: Arc<C>,
    derived_app_id: Option<String>,
    derived_api_key: Option<String>,
}

impl<C: ?Sized> ResolvedClient<C> {
    fn provided(client: &Arc<C>) -> Self {
        Self {
            active_client: Arc::clone(client),
            derived_app_id: None,
            derived_api_key: None,
        }
    }

    fn derived(client: Arc<C>, app_id: &str, api_key: &str) -> Self {
        Self {
            active_client: client,
            derived_app_id: Some(app_id.to_string()),
            derived_api_key: Some(api_key.to_string()),
        }
    }

    pub fn active_client(&self) -> &Arc<C> {
        &self.active_client
    }

    /// App id the active client was built from; `None` for a provided client.
    pub fn derived_app_id(&self) -> Option<&str> {
        self.derived_app_id.as_deref()
    }

    pub fn derived_api_key(&self) -> Option<&str> {
        self.derived_api_key.as_deref()
    }

    fn is_derived_from(&self, app_id: &str, api_key: &str) -> bool {
        self.derived_app_id.as_deref() == Some(app_id)
            && self.derived_api_key.as_deref() == Some(api_key)
    }
}

/// Outcome of resolving one props application.
pub enum Resolution<C: ?Sized> {
    /// The previous client stays active; nothing to tag.
    Unchanged(Arc<C>),
    /// A client that must be tagged before it becomes active.
    Replaced(ResolvedClient<C>),
}

impl<C: ?Sized> Resolution<C> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Resolution::Unchanged(_))
    }
}

/// Decide which client `props` call for, given the previously resolved one.
///
/// Calls the factory only when the credential pair differs from the one that
/// built the previous client. Factory errors are returned as-is inside
/// [`InstantSearchError::ClientFactory`].
pub fn resolve<C, F>(
    factory: &F,
    props: &InstantSearchProps<C>,
    previous: Option<&ResolvedClient<C>>,
) -> Result<Resolution<C>>
where
    C: ?Sized,
    F: ClientFactory<C> + ?Sized,
{
    match props.client_source()? {
        ClientSource::Provided(client) => match previous {
            Some(prev) if Arc::ptr_eq(&prev.active_client, client) => {
                Ok(Resolution::Unchanged(Arc::clone(&prev.active_client)))
            }
            _ => Ok(Resolution::Replaced(ResolvedClient::provided(client))),
        },
        ClientSource::Credentials { app_id, api_key } => match previous {
            Some(prev) if prev.is_derived_from(app_id, api_key) => {
                Ok(Resolution::Unchanged(Arc::clone(&prev.active_client)))
            }
            _ => {
                let client = factory
                    .create(app_id, api_key)
                    .map_err(InstantSearchError::ClientFactory)?;
                Ok(Resolution::Replaced(ResolvedClient::derived(
                    client, app_id, api_key,
                )))
            }
        },
    }
}

/// Identities of every client already tagged by one lifecycle.
///
/// Holds `Weak` handles so a tracked allocation cannot be reused by a new
/// client while its entry is alive. Entries whose client is gone are pruned.
pub struct TaggedClients<C: ?Sized> {
    clients: Vec<Weak<C>>,
}

impl<C: ?Sized> TaggedClients<C> {
    pub fn new() -> Self {
        Self {
            clients: Vec::new(),
        }
    }

    pub fn contains(&self, client: &Arc<C>) -> bool {
        let target = Arc::as_ptr(client) as *const ();
        self.clients
            .iter()
            .any(|tagged| Weak::as_ptr(tagged) as *const () == target)
    }

    pub fn insert(&mut self, client: &Arc<C>) {
        self.clients.retain(|tagged| tagged.strong_count() > 0);
        if !self.contains(client) {
            self.clients.push(Arc::downgrade(client));
        }
    }

    /// Number of tracked clients that are still alive.
    pub fn len(&self) -> usize {
        self.clients
            .iter()
            .filter(|tagged| tagged.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<C: ?Sized> Default for TaggedClients<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns the resolved client of one mounted widget tree.
pub struct ClientLifecycle<C: ?Sized> {
    agent: UsageAgent,
    agent_string: String,
    state: Option<ResolvedClient<C>>,
    tagged: TaggedClients<C>,
}

impl<C: SearchClient + ?Sized> ClientLifecycle<C> {
    pub fn new(agent: UsageAgent) -> Self {
        let agent_string = agent.to_string();
        Self {
            agent,
            agent_string,
            state: None,
            tagged: TaggedClients::new(),
        }
    }

    pub fn agent(&self) -> &UsageAgent {
        &self.agent
    }

    /// Currently active client, if any application has succeeded yet.
    pub fn active_client(&self) -> Option<&Arc<C>> {
        self.state.as_ref().map(ResolvedClient::active_client)
    }

    pub fn state(&self) -> Option<&ResolvedClient<C>> {
        self.state.as_ref()
    }

    pub fn tagged_clients(&self) -> &TaggedClients<C> {
        &self.tagged
    }

    /// Resolve `props`, tag a newly activated client, and return the active one.
    ///
    /// On any error the previously active client stays in place.
    pub fn apply<F>(&mut self, factory: &F, props: &InstantSearchProps<C>) -> Result<Arc<C>>
    where
        F: ClientFactory<C> + ?Sized,
    {
        match resolve(factory, props, self.state.as_ref())? {
            Resolution::Unchanged(client) => {
                tracing::debug!(index_name = %props.index_name, "search client unchanged");
                Ok(client)
            }
            Resolution::Replaced(next) => {
                if self.tagged.contains(&next.active_client) {
                    tracing::debug!("search client already tagged");
                } else {
                    next.active_client
                        .add_algolia_agent(&self.agent_string)
                        .map_err(InstantSearchError::AgentTagging)?;
                    self.tagged.insert(&next.active_client);
                    tracing::debug!(agent = %self.agent_string, "tagged search client");
                }

                let source = if next.derived_app_id.is_some() {
                    "factory"
                } else {
                    "provided"
                };
                tracing::info!(
                    index_name = %props.index_name,
                    source,
                    app_id = next.derived_app_id.as_deref().unwrap_or("-"),
                    "search client activated"
                );
                let client = Arc::clone(&next.active_client);
                self.state = Some(next);
                Ok(client)
            }
        }
    }
}
