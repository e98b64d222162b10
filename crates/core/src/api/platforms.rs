use serde_json::Value;

use crate::models::{Platform, RecordId};

use super::{endpoints::PLATFORMS, take_list, take_saved, ApiClient, ApiError, Saved};

/// `/api/platforms` handle. Platforms are never deleted, only deactivated.
pub struct PlatformsApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Platform endpoints.
    pub fn platforms(&self) -> PlatformsApi<'_> {
        PlatformsApi { client: self }
    }
}

impl PlatformsApi<'_> {
    /// All platforms, active or not.
    pub async fn list(&self) -> Result<Vec<Platform>, ApiError> {
        let mut body: Value = self.client.get(PLATFORMS).await?;
        take_list(&mut body, "platforms", PLATFORMS)
    }

    /// Create a record.
    pub async fn add(&self, platform: &Platform) -> Result<Saved<Platform>, ApiError> {
        let body: Value = self.client.post(PLATFORMS, platform).await?;
        take_saved(body, "platform", PLATFORMS)
    }

    /// Replace a record.
    pub async fn update(
        &self,
        id: RecordId,
        platform: &Platform,
    ) -> Result<Saved<Platform>, ApiError> {
        let path = format!("{PLATFORMS}/{id}");
        let body: Value = self.client.put(&path, platform).await?;
        take_saved(body, "platform", &path)
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::Path,
        http::StatusCode,
        routing::{get, put},
        Json, Router,
    };
    use serde_json::{json, Value};

    use crate::api::test_server::client_with;
    use crate::models::Platform;

    fn router() -> Router {
        Router::new()
            .route(
                "/api/platforms",
                get(|| async {
                    Json(json!({ "platforms": [
                        { "id": 1, "name": "Flipkart", "is_active": true },
                        { "id": 2, "name": "Croma", "is_active": false }
                    ] }))
                })
                .post(|Json(body): Json<Value>| async move {
                    (
                        StatusCode::CREATED,
                        Json(json!({ "message": "Platform added", "platform": { "id": 3, "name": body["name"] } })),
                    )
                }),
            )
            .route(
                "/api/platforms/{id}",
                put(|Path(id): Path<i64>, Json(body): Json<Value>| async move {
                    Json(json!({
                        "message": "Platform updated",
                        "platform": { "id": id, "name": body["name"], "is_active": body["is_active"] }
                    }))
                }),
            )
    }

    #[tokio::test]
    async fn list_add_update() -> anyhow::Result<()> {
        let (client, _) = client_with(router(), vec![]).await;

        let platforms = client.platforms().list().await?;
        assert_eq!(platforms.len(), 2);
        assert_eq!(platforms[1].is_active, Some(false));

        let draft = Platform {
            name: "Amazon".to_string(),
            ..Platform::default()
        };
        let saved = client.platforms().add(&draft).await?;
        assert_eq!(saved.message.as_deref(), Some("Platform added"));
        assert_eq!(saved.record.and_then(|platform| platform.id), Some(3));

        let deactivated = Platform {
            is_active: Some(false),
            ..draft
        };
        let saved = client.platforms().update(3, &deactivated).await?;
        assert_eq!(saved.message.as_deref(), Some("Platform updated"));
        let platform = saved.record.ok_or_else(|| anyhow::anyhow!("no record echoed"))?;
        assert_eq!(platform.id, Some(3));
        assert_eq!(platform.name, "Amazon");
        assert_eq!(platform.is_active, Some(false));
        Ok(())
    }
}
