//! Incremental account search: debounced input, page-scoped queries, and a
//! controller that only ever applies the latest issued request.

use async_trait::async_trait;
use shared::{
    domain::{SearchRequest, SearchResult, SearchState},
    error::SearchError,
};

pub mod client;
pub mod controller;
pub mod debouncer;
pub mod session;
#[cfg(test)]
pub(crate) mod testing;

pub use client::{ClientSettings, SearchClient};
pub use controller::{ControllerSettings, SearchController};
pub use debouncer::{DebouncedTrigger, QueryDebouncer};
pub use session::{SearchHandle, SearchSession, SessionError};

/// Remote directory seam. `SearchClient` is the network implementation.
#[async_trait]
pub trait DirectorySearch: Send + Sync {
    async fn fetch_page(&self, request: &SearchRequest) -> Result<SearchResult, SearchError>;
}

/// Renders controller state. Only ever sees snapshots.
pub trait ResultView {
    fn render(&mut self, state: &SearchState);
}

pub trait ProfileOpener: Send + Sync {
    fn redirect_to_profile(&self, url: &str);
}
