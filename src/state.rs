use std::sync::Arc;

use tokio::sync::RwLock;

use crate::types::{Assignment, Task};

/// Shared application state.
///
/// Tasks and assignments live here rather than in a database; see
/// `types.rs` for the durability caveats. The reqwest client is shared so
/// the ai-explain pipeline reuses connections.
#[derive(Clone)]
pub struct AppState {
    pub tasks: Arc<RwLock<Vec<Task>>>,
    pub assignments: Arc<RwLock<Vec<Assignment>>>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(RwLock::new(Vec::new())),
            assignments: Arc::new(RwLock::new(Vec::new())),
            http: reqwest::Client::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
