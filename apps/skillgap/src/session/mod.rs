//! Session Store: single source of truth for who is logged in.
//!
//! `SessionStore` is the only writer of `Session`. Everything else borrows
//! `&Session`. The only way to obtain a store is `SessionStore::initialize`,
//! so restoration runs exactly once and before any route is resolved.

use std::sync::Arc;

use tracing::{info, warn};

use crate::api_client::ApiClient;
use crate::models::UserProfile;

pub mod token_store;

use token_store::{TokenStore, TokenStoreError};

/// A user together with the bearer token that was confirmed for them.
#[derive(Debug, Clone, PartialEq)]
pub struct Authenticated {
    pub user: UserProfile,
    pub token: String,
}

/// Either both user and token are present, or neither is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    auth: Option<Authenticated>,
}

impl Session {
    pub fn user(&self) -> Option<&UserProfile> {
        self.auth.as_ref().map(|a| &a.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.auth.as_ref().map(|a| a.token.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    #[cfg(test)]
    pub fn authenticated(user: UserProfile, token: &str) -> Self {
        Self {
            auth: Some(Authenticated {
                user,
                token: token.to_string(),
            }),
        }
    }
}

pub struct SessionStore {
    session: Session,
    tokens: Arc<dyn TokenStore>,
}

impl SessionStore {
    /// Restores the session from the persisted token.
    ///
    /// The token is only trusted after `GET /auth/me` accepts it. Any failure
    /// (unreadable store, transport error, rejection, bad payload) discards the
    /// persisted token and yields an empty session. Never fails.
    pub async fn initialize(api: &ApiClient, tokens: Arc<dyn TokenStore>) -> Self {
        let mut store = Self {
            session: Session::default(),
            tokens,
        };

        let persisted = match store.tokens.load().await {
            Ok(token) => token,
            Err(e) => {
                warn!("Could not read persisted token: {e}");
                store.discard_persisted().await;
                return store;
            }
        };

        let Some(token) = persisted else {
            info!("No persisted session");
            return store;
        };

        info!("Restoring session...");
        match api.me(&token).await {
            Ok(user) => {
                info!("Session restored for user {}", user.id);
                store.session.auth = Some(Authenticated { user, token });
            }
            Err(e) => {
                warn!("Persisted token rejected, starting logged out: {e}");
                store.discard_persisted().await;
            }
        }
        store
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Replaces the session and persists the token. The caller has already
    /// obtained both from the backend; nothing is validated here.
    ///
    /// Surrounding whitespace is dropped once here, so the session and the
    /// store hold the same token. The in-memory session is replaced even
    /// when persisting fails.
    pub async fn login(&mut self, user: UserProfile, token: String) -> Result<(), TokenStoreError> {
        info!("Logged in as user {}", user.id);
        let token = token.trim().to_string();
        self.session.auth = Some(Authenticated {
            user,
            token: token.clone(),
        });
        self.tokens.save(&token).await
    }

    /// Clears the session and the persisted token. Idempotent.
    ///
    /// The in-memory session is cleared even when removing the token fails.
    pub async fn logout(&mut self) -> Result<(), TokenStoreError> {
        if self.session.auth.take().is_some() {
            info!("Logged out");
        }
        self.tokens.clear().await
    }

    async fn discard_persisted(&self) {
        if let Err(e) = self.tokens.clear().await {
            warn!("Could not remove persisted token: {e}");
        }
    }
}
