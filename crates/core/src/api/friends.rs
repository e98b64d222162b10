use serde::Serialize;
use serde_json::Value;

use crate::models::{Friend, RecordId};

use super::{endpoints::FRIENDS, message_of, take_field, take_list, take_saved, ApiClient, ApiError, Saved};

/// `/api/friends` handle.
pub struct FriendsApi<'a> {
    client: &'a ApiClient,
}

#[derive(Serialize)]
struct FriendQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    partner_id: Option<RecordId>,
}

impl ApiClient {
    /// Friend endpoints.
    pub fn friends(&self) -> FriendsApi<'_> {
        FriendsApi { client: self }
    }
}

impl FriendsApi<'_> {
    /// Friends, optionally narrowed to one partner's.
    pub async fn list(&self, partner_id: Option<RecordId>) -> Result<Vec<Friend>, ApiError> {
        let query = FriendQuery {
            partner_id: partner_id.filter(|id| *id != 0),
        };
        let mut body: Value = self.client.get_with_query(FRIENDS, &query).await?;
        take_list(&mut body, "friends", FRIENDS)
    }

    /// Fetch one record.
    pub async fn get(&self, id: RecordId) -> Result<Friend, ApiError> {
        let path = format!("{FRIENDS}/{id}");
        let mut body: Value = self.client.get(&path).await?;
        take_field(&mut body, "friend", &path)
    }

    /// Create a record.
    pub async fn add(&self, friend: &Friend) -> Result<Saved<Friend>, ApiError> {
        let body: Value = self.client.post(FRIENDS, friend).await?;
        take_saved(body, "friend", FRIENDS)
    }

    /// Replace a record.
    pub async fn update(&self, id: RecordId, friend: &Friend) -> Result<Saved<Friend>, ApiError> {
        let path = format!("{FRIENDS}/{id}");
        let body: Value = self.client.put(&path, friend).await?;
        take_saved(body, "friend", &path)
    }

    /// Delete a record. Returns the server's confirmation, if any.
    pub async fn delete(&self, id: RecordId) -> Result<Option<String>, ApiError> {
        let path = format!("{FRIENDS}/{id}");
        let body: Value = self.client.delete(&path).await?;
        Ok(message_of(body))
    }
}
