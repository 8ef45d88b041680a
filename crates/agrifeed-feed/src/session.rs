//! Viewer session derived from the store.
//!
//! Logging in is done elsewhere (the login surface writes [`keys::LOGGED_IN`],
//! [`keys::LOGGED_IN_USER`] and the user's avatar key); this module only
//! reads that state back and tears it down on logout.

use agrifeed_store::SharedStore;
use agrifeed_types::Session;
use tracing::{info, warn};

use crate::keys;

/// Where the caller should send the viewer next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    Login,
}

/// Reads and clears the viewer session.
#[derive(Clone)]
pub struct SessionState {
    store: SharedStore,
}

impl SessionState {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    async fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "store read failed; treating as absent");
                None
            }
        }
    }

    async fn remove(&self, key: &str) {
        if let Err(e) = self.store.remove(key).await {
            warn!(key, error = %e, "failed to remove session key");
        }
    }

    /// Current session. Any missing or unreadable key reads as absent.
    pub async fn check_status(&self) -> Session {
        if self.read(keys::LOGGED_IN).await.as_deref() != Some(keys::LOGGED_IN_TRUE) {
            return Session::anonymous();
        }
        let Some(username) = self.read(keys::LOGGED_IN_USER).await else {
            return Session {
                is_active: true,
                username: None,
                profile_image: None,
            };
        };
        let profile_image = self.read(&keys::profile_image_key(&username)).await;
        Session::active(username, profile_image)
    }

    /// Clear the active flag, the username, and that user's avatar key.
    pub async fn logout(&self) -> Navigation {
        let username = self.read(keys::LOGGED_IN_USER).await;
        self.remove(keys::LOGGED_IN).await;
        self.remove(keys::LOGGED_IN_USER).await;
        if let Some(username) = &username {
            self.remove(&keys::profile_image_key(username)).await;
        }
        info!(user = username.as_deref().unwrap_or("<unknown>"), "logged out");
        Navigation::Login
    }

    /// The login/logout button: log out if a session is active, then send
    /// the viewer to the login surface either way.
    pub async fn toggle(&self, current: &Session) -> Navigation {
        if current.is_active {
            self.logout().await
        } else {
            Navigation::Login
        }
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState").finish_non_exhaustive()
    }
}
