//! HTTP API
//!
//! A thin JSON front end over the turn runtime.

mod handlers;
mod types;

pub use handlers::create_router;
pub use types::*;

use crate::runtime::TriageRuntime;
use crate::session::SessionStore;
use std::sync::Arc;

/// Runtime as served over HTTP, with the store chosen at startup
pub type SharedRuntime = TriageRuntime<Arc<dyn SessionStore>>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub runtime: Arc<SharedRuntime>,
}

impl AppState {
    pub fn new(runtime: SharedRuntime) -> Self {
        Self {
            runtime: Arc::new(runtime),
        }
    }
}
