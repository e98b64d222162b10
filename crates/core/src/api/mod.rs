//! HTTP façade over the bookings REST API.
//!
//! [`ApiClient`] owns transport, bearer injection and 401 handling; the
//! per-resource handles (`client.cards()`, `client.friends()`, ...) are thin
//! request/response pass-throughs that unwrap the server's JSON envelopes.

pub mod auth;
/// `/api/bookings`.
pub mod bookings;
/// `/api/cards`.
pub mod cards;
mod client;
mod error;
/// `/api/friends`.
pub mod friends;
/// `/api/partners`.
pub mod partners;
/// `/api/platforms`.
pub mod platforms;
/// `/api/seller-payments`.
pub mod seller_payments;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

pub use auth::{AuthApi, LoginIdentifier, LoginReply, LoginResponse, TenantOption};
pub use client::ApiClient;
pub use error::ApiError;
pub use seller_payments::SellerPaymentList;

/// Path prefixes of every endpoint used by the client.
pub mod endpoints {
    /// Credential login.
    pub const LOGIN: &str = "/api/auth/login";
    /// Credential login for a chosen tenant.
    pub const LOGIN_WITH_TENANT: &str = "/api/auth/login-with-tenant";
    /// Exchange the current token for a new one.
    pub const REFRESH_TOKEN: &str = "/api/auth/refresh-token";
    /// Server-side logout.
    pub const LOGOUT: &str = "/api/auth/logout";
    /// Card collection.
    pub const CARDS: &str = "/api/cards";
    /// Friend collection.
    pub const FRIENDS: &str = "/api/friends";
    /// Platform collection.
    pub const PLATFORMS: &str = "/api/platforms";
    /// Booking collection.
    pub const BOOKINGS: &str = "/api/bookings";
    /// Seller payment collection.
    pub const SELLER_PAYMENTS: &str = "/api/seller-payments";
    /// Partner collection.
    pub const PARTNERS: &str = "/api/partners";
}

/// Outcome of a create or update call.
#[derive(Debug, Clone, PartialEq)]
pub struct Saved<T> {
    /// Confirmation text from the server.
    pub message: Option<String>,
    /// The stored record, when the server echoes it back.
    pub record: Option<T>,
}

#[derive(Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
}

/// Deserialize `body[key]`; a missing key reads as JSON `null`.
pub(crate) fn take_field<T: DeserializeOwned>(
    body: &mut Value,
    key: &str,
    endpoint: &str,
) -> Result<T, ApiError> {
    let value = body.get_mut(key).map(Value::take).unwrap_or(Value::Null);
    serde_json::from_value(value).map_err(|source| ApiError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

/// `body[key]` as a list; missing or `null` is an empty list.
pub(crate) fn take_list<T: DeserializeOwned>(
    body: &mut Value,
    key: &str,
    endpoint: &str,
) -> Result<Vec<T>, ApiError> {
    Ok(take_field::<Option<Vec<T>>>(body, key, endpoint)?.unwrap_or_default())
}

/// Split a mutation response into its message and echoed record.
pub(crate) fn take_saved<T: DeserializeOwned>(
    mut body: Value,
    key: &str,
    endpoint: &str,
) -> Result<Saved<T>, ApiError> {
    let record = take_field::<Option<T>>(&mut body, key, endpoint)?;
    Ok(Saved {
        message: message_of(body),
        record,
    })
}

/// `message` of a response body, if any.
pub(crate) fn message_of(body: Value) -> Option<String> {
    serde_json::from_value::<MessageBody>(body)
        .ok()
        .and_then(|body| body.message)
}
