use std::sync::Arc;

use crate::auth::{CredentialVerifier, SessionManager};
use crate::config::Config;
use crate::store::{MemoryStore, PostgresStore, SessionStore, TaskStore, UserStore};

/// Everything a handler needs, registered once as `web::Data<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub sessions: SessionManager,
    pub verifier: CredentialVerifier,
    /// Request header the session token is read from.
    pub token_header: String,
}

impl AppState {
    /// Wires every capability to the same backing store.
    pub fn new<S>(store: Arc<S>, verifier: CredentialVerifier, token_header: impl Into<String>) -> Self
    where
        S: UserStore + SessionStore + TaskStore + 'static,
    {
        Self {
            users: store.clone(),
            tasks: store.clone(),
            sessions: SessionManager::new(store),
            verifier,
            token_header: token_header.into(),
        }
    }

    pub fn postgres(store: PostgresStore, config: &Config) -> Self {
        Self::new(
            Arc::new(store),
            CredentialVerifier::new(config.bcrypt_cost),
            config.token_header.clone(),
        )
    }

    pub fn in_memory(config: &Config) -> Self {
        Self::new(
            Arc::new(MemoryStore::new()),
            CredentialVerifier::new(config.bcrypt_cost),
            config.token_header.clone(),
        )
    }
}
