//! Shared application state.
//!
//! Owns the snapshot cache, the player connection slot, and the command
//! router as explicit fields with single-writer access; no globals.

use std::sync::Arc;

use crate::cache::StateCache;
use crate::registry::ConnectionRegistry;
use crate::router::CommandRouter;

/// Shared state for Actix handlers and the player channel actor.
pub struct AppState {
    /// Latest published snapshot.
    pub cache: StateCache,
    /// Single-slot player connection registry.
    pub registry: Arc<ConnectionRegistry>,
    /// Command relay facade.
    pub router: CommandRouter,
    /// Shared secret required on command paths.
    pub auth_token: String,
}

impl AppState {
    pub fn new(auth_token: String) -> Self {
        let cache = StateCache::new();
        let registry = Arc::new(ConnectionRegistry::new());
        let router = CommandRouter::new(registry.clone(), cache.clone());
        Self {
            cache,
            registry,
            router,
            auth_token,
        }
    }
}
