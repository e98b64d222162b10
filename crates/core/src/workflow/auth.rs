use tracing::{info, warn};

use crate::api::{ApiClient, LoginIdentifier, LoginReply, LoginResponse, TenantOption};
use crate::models::RecordId;
use crate::session::{AuthStatus, SessionAction, SessionLoader, SessionStore, UserProfile};
use crate::validation::validate_credentials;

use super::WorkflowError;

/// What happened after credentials were accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// Session persisted and dispatched.
    SignedIn(UserProfile),
    /// The account spans several tenants; call [`AuthFlow::select_tenant`]
    /// with one of them.
    SelectTenant {
        /// Tenants to choose from.
        tenants: Vec<TenantOption>,
        /// Prompt from the server.
        message: Option<String>,
    },
}

/// Login, tenant selection, token refresh and logout against one
/// [`SessionStore`].
#[derive(Clone)]
pub struct AuthFlow {
    api: ApiClient,
    store: SessionStore,
}

impl AuthFlow {
    /// Flow persisting into the client's storage.
    pub fn new(api: ApiClient, store: SessionStore) -> Self {
        Self { api, store }
    }

    /// Session store updated by this flow.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Sign in with an email, ten-digit mobile number or username.
    pub async fn login(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<LoginOutcome, WorkflowError> {
        validate_credentials(identifier, password)?;
        self.store
            .dispatch(SessionAction::SetIdentifier(identifier.to_string()));
        self.store
            .dispatch(SessionAction::SetPassword(password.to_string()));

        let identifier = LoginIdentifier::classify(identifier.trim());
        match self.api.auth().login(&identifier, password).await? {
            LoginReply::Session(response) => self.complete(response).await.map(LoginOutcome::SignedIn),
            LoginReply::TenantSelection { tenants, message } => {
                info!(count = tenants.len(), "Login requires tenant selection");
                Ok(LoginOutcome::SelectTenant { tenants, message })
            }
        }
    }

    /// Finish a login that asked for a tenant, reusing the credential drafts.
    pub async fn select_tenant(&self, tenant_id: RecordId) -> Result<UserProfile, WorkflowError> {
        let state = self.store.state();
        validate_credentials(&state.identifier, &state.password)?;
        self.store.dispatch(SessionAction::SetTenant(tenant_id));

        let identifier = LoginIdentifier::classify(state.identifier.trim());
        let response = self
            .api
            .auth()
            .login_with_tenant(&identifier, &state.password, tenant_id)
            .await?;
        self.complete(response).await
    }

    /// Swap the stored token for a fresh one.
    pub async fn refresh(&self) -> Result<String, WorkflowError> {
        let token = self.api.auth().refresh_token().await?;
        SessionLoader::persist_token(self.api.storage().as_ref(), &token).await?;
        if let Some(user) = self.store.state().user {
            self.store.dispatch(SessionAction::SetUserAndToken {
                user,
                token: token.clone(),
            });
        }
        Ok(token)
    }

    /// Sign out. The server is told when reachable; the local session is
    /// cleared either way.
    pub async fn logout(&self) -> AuthStatus {
        if let Err(err) = self.api.auth().logout().await {
            warn!(%err, "Server logout failed; clearing local session anyway");
        }
        SessionLoader::clear(self.api.storage().as_ref()).await;
        let status = self.store.dispatch(SessionAction::Logout);
        info!("Signed out");
        status
    }

    async fn complete(&self, response: LoginResponse) -> Result<UserProfile, WorkflowError> {
        SessionLoader::persist(self.api.storage().as_ref(), &response.token, &response.user)
            .await?;
        self.store.dispatch(SessionAction::SetUserAndToken {
            user: response.user.clone(),
            token: response.token,
        });
        info!(user = %response.user.display_name, "Signed in");
        Ok(response.user)
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    use super::*;
    use crate::api::test_server::client_with;
    use crate::storage::{Storage, TOKEN_KEY, USER_KEY};
    use crate::validation::ValidationError;

    fn router() -> Router {
        Router::new()
            .route(
                "/api/auth/login",
                post(|Json(body): Json<Value>| async move {
                    if body.get("emailid").is_some() {
                        return Json(json!({
                            "requiresTenantSelection": true,
                            "tenants": [{ "tenantid": 1, "compid": 10 }, { "tenantid": 2, "compid": 20 }]
                        }));
                    }
                    Json(json!({ "token": "tok", "user": { "Id": 7, "UserName": "Asha", "tenantid": 1 } }))
                }),
            )
            .route(
                "/api/auth/login-with-tenant",
                post(|Json(body): Json<Value>| async move {
                    Json(json!({
                        "token": format!("tok-{}", body["tenantid"]),
                        "user": { "Id": 7, "UserName": "Asha", "tenantid": body["tenantid"] }
                    }))
                }),
            )
            .route(
                "/api/auth/refresh-token",
                post(|| async { Json(json!({ "token": "fresh" })) }),
            )
            .route(
                "/api/auth/logout",
                post(|| async {
                    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "message": "down" })))
                }),
            )
    }

    async fn flow() -> (AuthFlow, std::sync::Arc<crate::storage::MemoryStorage>) {
        let (client, storage) = client_with(router(), vec![]).await;
        let store = SessionStore::new();
        store.rehydrate(storage.as_ref()).await;
        (AuthFlow::new(client, store), storage)
    }

    #[tokio::test]
    async fn login_persists_and_authenticates() -> anyhow::Result<()> {
        let (flow, storage) = flow().await;
        assert_eq!(flow.store().status(), AuthStatus::Unauthenticated);

        let outcome = flow.login("asha", "secret").await?;
        assert!(matches!(outcome, LoginOutcome::SignedIn(ref user) if user.id == 7));
        assert_eq!(flow.store().status(), AuthStatus::Authenticated);
        assert_eq!(flow.store().state().tenant_id, Some(1));
        assert_eq!(storage.get(TOKEN_KEY).await?.as_deref(), Some("tok"));
        assert!(storage.get(USER_KEY).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn tenant_selection_then_login() -> anyhow::Result<()> {
        let (flow, storage) = flow().await;

        let outcome = flow.login("asha@example.com", "secret").await?;
        let LoginOutcome::SelectTenant { tenants, .. } = outcome else {
            panic!("expected tenant selection");
        };
        assert_eq!(tenants.len(), 2);
        assert_eq!(flow.store().status(), AuthStatus::Unauthenticated);
        assert_eq!(storage.get(TOKEN_KEY).await?, None);

        let user = flow.select_tenant(2).await?;
        assert_eq!(user.tenant_id, Some(2));
        assert_eq!(flow.store().status(), AuthStatus::Authenticated);
        assert_eq!(storage.get(TOKEN_KEY).await?.as_deref(), Some("tok-2"));
        Ok(())
    }

    #[tokio::test]
    async fn empty_credentials_are_rejected_locally() {
        let (flow, _) = flow().await;
        let err = flow.login("  ", "secret").await.unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Validation(ValidationError::MissingCredentials)
        ));
        assert_eq!(err.user_message("Login failed"), "Please enter email/username and password");
    }

    #[tokio::test]
    async fn refresh_replaces_token() -> anyhow::Result<()> {
        let (flow, storage) = flow().await;
        flow.login("asha", "secret").await?;

        assert_eq!(flow.refresh().await?, "fresh");
        assert_eq!(storage.get(TOKEN_KEY).await?.as_deref(), Some("fresh"));
        assert_eq!(flow.store().state().token.as_deref(), Some("fresh"));
        assert_eq!(flow.store().status(), AuthStatus::Authenticated);
        Ok(())
    }

    #[tokio::test]
    async fn logout_clears_even_when_server_fails() -> anyhow::Result<()> {
        let (flow, storage) = flow().await;
        flow.login("asha", "secret").await?;

        assert_eq!(flow.logout().await, AuthStatus::Unauthenticated);
        assert_eq!(storage.get(TOKEN_KEY).await?, None);
        assert_eq!(storage.get(USER_KEY).await?, None);
        let state = flow.store().state();
        assert!(state.identifier.is_empty());
        assert!(state.password.is_empty());
        assert_eq!(state.tenant_id, None);
        Ok(())
    }
}
