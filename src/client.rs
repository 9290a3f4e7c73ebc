//! Contracts for the two collaborators the widget core talks to: the search
//! client itself and the factory that builds one from credentials.

use std::sync::Arc;

use crate::error::BoxError;

/// A connection/session to the hosted search service.
///
/// The widget core only needs to tag the client with its usage agent. Query
/// execution belongs to whatever orchestrates the widget tree.
pub trait SearchClient {
    /// Append `agent` to the agents this client reports on every request.
    fn add_algolia_agent(&self, agent: &str) -> Result<(), BoxError>;
}

/// Builds a client from an application id and API key.
///
/// May be expensive (it can open network resources), so the lifecycle
/// manager calls it at most once per distinct credential pair.
pub trait ClientFactory<C: ?Sized> {
    fn create(&self, app_id: &str, api_key: &str) -> Result<Arc<C>, BoxError>;
}

impl<C, F, E> ClientFactory<C> for F
where
    C: ?Sized,
    F: Fn(&str, &str) -> Result<Arc<C>, E>,
    E: Into<BoxError>,
{
    fn create(&self, app_id: &str, api_key: &str) -> Result<Arc<C>, BoxError> {
        self(app_id, api_key).map_err(Into::into)
    }
}
