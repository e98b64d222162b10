use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::storage::Storage;

use super::{
    loader::SessionLoader,
    models::{reduce, AuthStatus, SessionAction, SessionState},
};

/// Injectable session container: `state()` to read, `dispatch()` to change.
///
/// Cloning yields another handle onto the same state. Every dispatch runs
/// under one write lock, so no reader ever sees a token without its user.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    state: SessionState,
    resolved: bool,
}

impl SessionStore {
    /// Empty store, pending until [`SessionStore::rehydrate`] or a login.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.inner.read().state.clone()
    }

    /// Gate status derived from the current state.
    pub fn status(&self) -> AuthStatus {
        let inner = self.inner.read();
        status_of(&inner)
    }

    /// Apply `action` atomically and return the resulting status.
    ///
    /// A rehydration arriving after the session was already resolved (by an
    /// earlier rehydration, a login or a logout) is ignored so stale storage
    /// cannot overwrite a fresh login.
    pub fn dispatch(&self, action: SessionAction) -> AuthStatus {
        let mut inner = self.inner.write();
        match &action {
            SessionAction::Rehydrated(_) if inner.resolved => {
                debug!("Ignoring late rehydration");
                return status_of(&inner);
            }
            SessionAction::Rehydrated(_)
            | SessionAction::SetUserAndToken { .. }
            | SessionAction::Logout => inner.resolved = true,
            _ => {}
        }
        let state = std::mem::take(&mut inner.state);
        inner.state = reduce(state, action);
        status_of(&inner)
    }

    /// Restore token and user from `storage` and leave the pending state.
    pub async fn rehydrate(&self, storage: &dyn Storage) -> AuthStatus {
        let persisted = SessionLoader::load(storage).await;
        let status = self.dispatch(SessionAction::Rehydrated(persisted));
        info!(?status, "Session rehydrated");
        status
    }
}

fn status_of(inner: &Inner) -> AuthStatus {
    if !inner.resolved {
        AuthStatus::Pending
    } else if inner.state.is_authenticated() {
        AuthStatus::Authenticated
    } else {
        AuthStatus::Unauthenticated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{PersistedSession, UserProfile};
    use crate::storage::{MemoryStorage, TOKEN_KEY, USER_KEY};

    fn user() -> UserProfile {
        UserProfile {
            id: 1,
            display_name: "Asha".to_string(),
            email: None,
            mobile: None,
            tenant_id: None,
        }
    }

    #[test]
    fn pending_until_resolved() {
        let store = SessionStore::new();
        assert_eq!(store.status(), AuthStatus::Pending);
        assert_eq!(
            store.dispatch(SessionAction::SetIdentifier("asha".to_string())),
            AuthStatus::Pending
        );
        assert_eq!(
            store.dispatch(SessionAction::Rehydrated(PersistedSession::default())),
            AuthStatus::Unauthenticated
        );
    }

    #[tokio::test]
    async fn rehydrates_full_session() {
        let storage = MemoryStorage::with_entries([
            (TOKEN_KEY, "abc".to_string()),
            (USER_KEY, serde_json::to_string(&user()).unwrap()),
        ]);
        let store = SessionStore::new();
        assert_eq!(store.rehydrate(&storage).await, AuthStatus::Authenticated);
        assert_eq!(store.state().user, Some(user()));
    }

    #[tokio::test]
    async fn token_without_user_rehydrates_unauthenticated() {
        let storage = MemoryStorage::with_entries([(TOKEN_KEY, "abc")]);
        let store = SessionStore::new();
        assert_eq!(store.rehydrate(&storage).await, AuthStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn late_rehydration_does_not_clobber_login() {
        let store = SessionStore::new();
        store.dispatch(SessionAction::SetUserAndToken {
            user: user(),
            token: "fresh".to_string(),
        });

        let storage = MemoryStorage::with_entries([(TOKEN_KEY, "stale")]);
        assert_eq!(store.rehydrate(&storage).await, AuthStatus::Authenticated);
        assert_eq!(store.state().token.as_deref(), Some("fresh"));
    }

    #[test]
    fn clones_share_state() {
        let store = SessionStore::new();
        let other = store.clone();
        store.dispatch(SessionAction::SetUserAndToken {
            user: user(),
            token: "abc".to_string(),
        });
        assert_eq!(other.status(), AuthStatus::Authenticated);
        other.dispatch(SessionAction::Logout);
        assert_eq!(store.status(), AuthStatus::Unauthenticated);
        assert_eq!(store.state(), SessionState::default());
    }
}
