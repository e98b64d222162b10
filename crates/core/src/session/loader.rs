//! Reading and writing the persisted token and user profile.

use tracing::{debug, warn};

use crate::storage::{Storage, StorageError, TOKEN_KEY, USER_KEY};

use super::models::{PersistedSession, UserProfile};

/// Bridges [`super::SessionState`] and the storage port.
pub struct SessionLoader;

impl SessionLoader {
    /// Read whatever token/user pair was left behind.
    ///
    /// Storage failures and an unparsable profile degrade to a missing value;
    /// this never fails.
    pub async fn load(storage: &dyn Storage) -> PersistedSession {
        let token = match storage.get(TOKEN_KEY).await {
            Ok(token) => token.filter(|token| !token.is_empty()),
            Err(err) => {
                warn!(?err, "Reading persisted token failed");
                None
            }
        };

        let user = match storage.get(USER_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<UserProfile>(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    warn!(%err, "Persisted user profile is corrupt; ignoring it");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!(?err, "Reading persisted user failed");
                None
            }
        };

        debug!(
            has_token = token.is_some(),
            has_user = user.is_some(),
            "Loaded persisted session"
        );
        PersistedSession { token, user }
    }

    /// Store a fresh login. Failures are returned so the caller can refuse
    /// to treat the login as complete.
    pub async fn persist(
        storage: &dyn Storage,
        token: &str,
        user: &UserProfile,
    ) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(user)?;
        storage.set(TOKEN_KEY, token).await?;
        storage.set(USER_KEY, &serialized).await
    }

    /// Replace only the token, e.g. after a refresh.
    pub async fn persist_token(storage: &dyn Storage, token: &str) -> Result<(), StorageError> {
        storage.set(TOKEN_KEY, token).await
    }

    /// Drop token and user. Each key is attempted even if the other fails.
    pub async fn clear(storage: &dyn Storage) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(err) = storage.remove(key).await {
                warn!(?err, key, "Clearing persisted session failed");
            }
        }
    }
}
