use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use super::extractors::Principal;
use crate::error::AppError;
use crate::models::SessionToken;
use crate::store::SessionStore;

/// Issues, resolves and revokes session tokens. The only authority on who the caller is.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Opens a new session for `user_id`. Every login gets its own token, so one user
    /// may hold several live sessions at once.
    ///
    /// A failed insert, including the theoretical token collision, is returned as is and
    /// never retried.
    pub async fn create_session(&self, user_id: Uuid) -> Result<SessionToken, AppError> {
        let session = self.store.insert_session(SessionToken::generate(), user_id).await?;
        log::info!("Session opened for user {}", user_id);
        Ok(session.token)
    }

    /// Maps a presented token to the caller it was issued to.
    ///
    /// Unknown, revoked and malformed tokens are all `AppError::InvalidSession`.
    pub async fn resolve(&self, token: &str) -> Result<Principal, AppError> {
        let token: SessionToken = token
            .parse()
            .map_err(|_| AppError::InvalidSession("Invalid session token".into()))?;

        match self.store.find_live_session(token).await? {
            Some(session) => Ok(Principal {
                user_id: session.user_id,
            }),
            None => Err(AppError::InvalidSession("Invalid session token".into())),
        }
    }

    /// Revokes the session behind `token`. Revoking an unknown, malformed or already
    /// revoked token succeeds and changes nothing.
    pub async fn revoke(&self, token: &str) -> Result<(), AppError> {
        let token: SessionToken = match token.parse() {
            Ok(token) => token,
            Err(_) => {
                log::debug!("Ignoring logout with a malformed session token");
                return Ok(());
            }
        };

        let revoked = self.store.revoke_session(token, Utc::now()).await?;
        if revoked > 0 {
            log::info!("Session revoked");
        } else {
            log::debug!("Logout for a session that is not live");
        }
        Ok(())
    }
}
