//! # InstantSearch
//!
//! Core of a search-UI widget library. Widgets (menus, search boxes, ...) all
//! talk to the hosted search service through one shared client; this crate
//! owns that client for a mounted widget tree:
//!
//! - builds it from `app_id` + `api_key` through an embedder-supplied factory,
//!   or accepts a ready client,
//! - keeps it across re-renders and rebuilds it only when the credentials (or
//!   the provided client's identity) change,
//! - tags every client exactly once with `"<library> <version>"`,
//! - forwards it with the remaining props to the render target.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use instantsearch::{
//!     create_instant_search, BoxError, InstantSearchDefaults, InstantSearchProps, RenderProps,
//!     SearchClient,
//! };
//!
//! struct MyClient;
//!
//! impl SearchClient for MyClient {
//!     fn add_algolia_agent(&self, _agent: &str) -> Result<(), BoxError> {
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> instantsearch::Result<()> {
//! let factory = |_app_id: &str, _api_key: &str| -> Result<Arc<MyClient>, BoxError> {
//!     Ok(Arc::new(MyClient))
//! };
//! let component = create_instant_search(factory, InstantSearchDefaults::default());
//!
//! let mut search = component.mount(|props: RenderProps<MyClient>| props.index_name);
//! let index = search.apply(&InstantSearchProps::with_credentials("app", "key", "products"))?;
//! assert_eq!(index, "products");
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod client;
pub mod config;
pub mod error;
pub mod instant_search;
pub mod lifecycle;
pub mod props;
pub mod widgets;

pub use agent::UsageAgent;
pub use client::{ClientFactory, SearchClient};
pub use config::InstantSearchConfig;
pub use error::{BoxError, InstantSearchError, Result};
pub use instant_search::{
    create_instant_search, CustomInstantSearch, InstantSearch, RenderProps, RenderTarget,
};
pub use lifecycle::{resolve, ClientLifecycle, Resolution, ResolvedClient, TaggedClients};
pub use props::{ClientSource, InstantSearchDefaults, InstantSearchProps, RootSpec};
