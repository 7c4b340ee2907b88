//! Application state for the API server.

use std::sync::Arc;

use lifeline_brain::Brain;
use lifeline_coordinator::{CoordinatorConfig, Dispatcher};
use lifeline_store::InMemoryStore;

/// Shared application state for the API server.
pub struct AppState {
    /// Coordination façade over the dispatch store.
    pub dispatcher: Dispatcher,

    /// Question-answering brain (provider resolved at construction).
    pub brain: Brain,

    /// Server start time (for health checks).
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Build state from configuration: in-memory store (seeded per config),
    /// dispatcher, and brain.
    pub fn new(config: &CoordinatorConfig) -> Self {
        let store = if config.seed_demo_data {
            InMemoryStore::seeded()
        } else {
            InMemoryStore::new()
        };
        let dispatcher = Dispatcher::new(Arc::new(store));
        let brain = Brain::from_config(&config.brain);
        Self::with_parts(dispatcher, brain)
    }

    /// Assemble state from pre-built components (tests, custom wiring).
    pub fn with_parts(dispatcher: Dispatcher, brain: Brain) -> Self {
        Self {
            dispatcher,
            brain,
            start_time: std::time::Instant::now(),
        }
    }

    /// Get the uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
