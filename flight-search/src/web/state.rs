//! Application state for the web layer.

use std::sync::Arc;

use crate::planner::SearchConfig;
use crate::store::FlightStore;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
pub struct AppState<S> {
    /// Route and segment store
    pub store: Arc<S>,

    /// Itinerary search configuration
    pub config: Arc<SearchConfig>,
}

impl<S: FlightStore> AppState<S> {
    /// Create a new app state.
    pub fn new(store: S, config: SearchConfig) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}

// Derive would require `S: Clone`
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: Arc::clone(&self.config),
        }
    }
}
