//! Login, tenant selection, token refresh and logout endpoints.
//!
//! These calls only talk to the server. Persisting the returned session and
//! updating the [`SessionStore`](crate::session::SessionStore) is left to
//! [`AuthFlow`](crate::workflow::AuthFlow).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::RecordId;
use crate::session::UserProfile;

use super::{
    endpoints::{LOGIN, LOGIN_WITH_TENANT, LOGOUT, REFRESH_TOKEN},
    take_field, ApiClient, ApiError,
};

static MOBILE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{10}$").expect("failed to compile mobile number regex"));

/// How the login form's identifier is sent to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginIdentifier {
    /// Sent as `emailid`.
    Email(String),
    /// Sent as `mobileno`.
    Mobile(String),
    /// Sent as `username`.
    Username(String),
}

impl LoginIdentifier {
    /// Anything with an `@` is an email, exactly ten digits is a mobile
    /// number, everything else is a username.
    pub fn classify(identifier: &str) -> Self {
        let identifier = identifier.to_string();
        if identifier.contains('@') {
            Self::Email(identifier)
        } else if MOBILE_NUMBER_RE.is_match(&identifier) {
            Self::Mobile(identifier)
        } else {
            Self::Username(identifier)
        }
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    mobileno: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    emailid: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tenantid: Option<RecordId>,
}

impl<'a> LoginRequest<'a> {
    fn new(identifier: &'a LoginIdentifier, password: &'a str, tenantid: Option<RecordId>) -> Self {
        let mut request = Self {
            mobileno: None,
            emailid: None,
            username: None,
            password,
            tenantid,
        };
        match identifier {
            LoginIdentifier::Email(value) => request.emailid = Some(value),
            LoginIdentifier::Mobile(value) => request.mobileno = Some(value),
            LoginIdentifier::Username(value) => request.username = Some(value),
        }
        request
    }
}

/// Successful login.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    /// Greeting from the server.
    #[serde(default)]
    pub message: Option<String>,
    /// Bearer token for later requests.
    pub token: String,
    /// The signed-in user.
    pub user: UserProfile,
}

/// One tenant the credentials are valid for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[allow(missing_docs)]
pub struct TenantOption {
    pub tenantid: RecordId,
    pub compid: RecordId,
    #[serde(rename = "dbName", default)]
    pub db_name: Option<String>,
}

/// Result of `POST /api/auth/login`.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginReply {
    /// Token and user issued.
    Session(LoginResponse),
    /// The account belongs to several tenants; ask the user to pick one and
    /// call [`AuthApi::login_with_tenant`].
    #[allow(missing_docs)]
    TenantSelection {
        tenants: Vec<TenantOption>,
        message: Option<String>,
    },
}

impl LoginReply {
    fn from_body(mut body: Value) -> Result<Self, ApiError> {
        let needs_tenant = body
            .get("requiresTenantSelection")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if needs_tenant {
            let tenants = super::take_list(&mut body, "tenants", LOGIN)?;
            let message = super::message_of(body);
            return Ok(Self::TenantSelection { tenants, message });
        }
        serde_json::from_value(body)
            .map(Self::Session)
            .map_err(|source| ApiError::Decode {
                endpoint: LOGIN.to_string(),
                source,
            })
    }
}

/// `/api/auth` handle.
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Authentication endpoints.
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { client: self }
    }
}

impl AuthApi<'_> {
    /// Sign in. May ask for a tenant instead of issuing a token.
    pub async fn login(
        &self,
        identifier: &LoginIdentifier,
        password: &str,
    ) -> Result<LoginReply, ApiError> {
        let request = LoginRequest::new(identifier, password, None);
        let body: Value = self.client.post(LOGIN, &request).await?;
        LoginReply::from_body(body)
    }

    /// Sign in to the chosen tenant.
    pub async fn login_with_tenant(
        &self,
        identifier: &LoginIdentifier,
        password: &str,
        tenant_id: RecordId,
    ) -> Result<LoginResponse, ApiError> {
        let request = LoginRequest::new(identifier, password, Some(tenant_id));
        self.client.post(LOGIN_WITH_TENANT, &request).await
    }

    /// Exchange the current bearer token for a fresh one.
    pub async fn refresh_token(&self) -> Result<String, ApiError> {
        let mut body: Value = self.client.post_empty(REFRESH_TOKEN).await?;
        take_field(&mut body, "token", REFRESH_TOKEN)
    }

    /// Invalidate the token server-side.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let _: Value = self.client.post_empty(LOGOUT).await?;
        Ok(())
    }
}
