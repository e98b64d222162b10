use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::{
    session::SessionLoader,
    storage::{SharedStorage, TOKEN_KEY},
};

use super::error::{extract_message, ApiError};

/// Shared HTTP client for every resource.
///
/// Each request reads the bearer token from storage; a 401 response wipes
/// the persisted token and user before the error is returned. Nothing is
/// retried or cached.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    storage: SharedStorage,
}

impl ApiClient {
    /// Client for the API at `base_url` (e.g. `http://localhost:5000`).
    pub fn new(base_url: impl Into<String>, storage: SharedStorage) -> Result<Self, ApiError> {
        let http = Client::builder()
            .gzip(true)
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self::with_http(http, base_url, storage))
    }

    /// Client reusing an existing reqwest client.
    pub fn with_http(http: Client, base_url: impl Into<String>, storage: SharedStorage) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            storage,
        }
    }

    /// API host without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Storage the token is read from.
    pub fn storage(&self) -> &SharedStorage {
        &self.storage
    }

    /// `GET path`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        self.send(self.http.get(&url), url).await
    }

    /// `GET path?query`.
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(path);
        self.send(self.http.get(&url).query(query), url).await
    }

    /// `POST path` with a JSON body.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        self.send(self.http.post(&url).json(body), url).await
    }

    /// `POST path` without a body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        self.send(self.http.post(&url), url).await
    }

    /// `PUT path` with a JSON body.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        self.send(self.http.put(&url).json(body), url).await
    }

    /// `DELETE path`.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        self.send(self.http.delete(&url), url).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn bearer_token(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY).await {
            Ok(token) => token.filter(|token| !token.is_empty()),
            Err(err) => {
                warn!(?err, "Reading token for request failed");
                None
            }
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: String,
    ) -> Result<T, ApiError> {
        let request = match self.bearer_token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(source) => return Err(ApiError::Transport { url, source }),
        };
        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(source) => return Err(ApiError::Transport { url, source }),
        };
        debug!(%url, %status, bytes = body.len(), "API response");

        if status == StatusCode::UNAUTHORIZED {
            warn!(%url, "Unauthorized response; clearing persisted session");
            SessionLoader::clear(self.storage.as_ref()).await;
            return Err(ApiError::Unauthorized {
                message: extract_message(&body),
            });
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                message: extract_message(&body),
            });
        }

        // Some endpoints answer with an empty body.
        let payload: &[u8] = if body.is_empty() { b"null" } else { &body };
        serde_json::from_slice(payload).map_err(|source| ApiError::Decode {
            endpoint: url,
            source,
        })
    }
}
