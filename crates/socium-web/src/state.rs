//! Application state.

use std::sync::Arc;

use socium_graph::GraphClient;

/// Application state shared across handlers.
///
/// The bearer secret is injected once at construction and never
/// mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub graph: GraphClient,
    pub auth_token: Arc<str>,
}

impl AppState {
    pub fn new(graph: GraphClient, auth_token: impl Into<Arc<str>>) -> Self {
        Self {
            graph,
            auth_token: auth_token.into(),
        }
    }
}
