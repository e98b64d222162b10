#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

use crate::models::RecordId;

/// Signed-in user as returned by the login endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "Id")]
    pub id: RecordId,
    #[serde(rename = "UserName")]
    pub display_name: String,
    #[serde(rename = "EmailId", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "MobileNo", default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(rename = "tenantid", default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<RecordId>,
}

/// Token and user read back from storage at start-up. Either half may be
/// missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedSession {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

/// Authentication state plus the login form drafts.
///
/// There is no `authenticated` flag: it is always derived from
/// the presence of both token and user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
    /// Email, mobile number or username typed into the login form.
    pub identifier: String,
    pub password: String,
    pub tenant_id: Option<RecordId>,
}

impl SessionState {
    /// Both a non-empty token and a user are present.
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty()) && self.user.is_some()
    }
}

/// Gate state seen by the navigation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthStatus {
    /// Storage has not been read yet.
    Pending,
    Authenticated,
    Unauthenticated,
}

/// State transitions. Each one is applied atomically by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    SetIdentifier(String),
    SetPassword(String),
    SetTenant(RecordId),
    /// Successful login: token and user land together.
    SetUserAndToken { user: UserProfile, token: String },
    /// Clear token, user, drafts and tenant.
    Logout,
    /// Start-up restore from storage.
    Rehydrated(PersistedSession),
}

/// Pure reducer.
pub fn reduce(state: SessionState, action: SessionAction) -> SessionState {
    match action {
        SessionAction::SetIdentifier(identifier) => SessionState {
            identifier,
            ..state
        },
        SessionAction::SetPassword(password) => SessionState { password, ..state },
        SessionAction::SetTenant(tenant_id) => SessionState {
            tenant_id: Some(tenant_id),
            ..state
        },
        SessionAction::SetUserAndToken { user, token } => SessionState {
            tenant_id: user.tenant_id.or(state.tenant_id),
            token: Some(token),
            user: Some(user),
            ..state
        },
        SessionAction::Logout => SessionState::default(),
        SessionAction::Rehydrated(persisted) => {
            let mut next = state;
            if let Some(token) = persisted.token {
                next.token = Some(token);
            }
            if let Some(user) = persisted.user {
                next.tenant_id = user.tenant_id.or(next.tenant_id);
                next.user = Some(user);
            }
            next
        }
    }
}
