use std::sync::Arc;

use yatube_core::YatubeCore;

pub mod auth;
pub mod error;
pub mod extract;
pub mod routes;
pub mod views;

pub use routes::router;

/// Per-request context: handlers reach the data store and the acting
/// user's identity settings through this, never through globals.
#[derive(Clone)]
pub struct AppState {
    pub core: Arc<YatubeCore>,
}

impl AppState {
    pub fn new(core: YatubeCore) -> Self {
        Self {
            core: Arc::new(core),
        }
    }
}
