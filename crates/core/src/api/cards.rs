use serde_json::Value;

use crate::models::{CardDraft, CardPatch, CardRecord, RecordId};

use super::{endpoints::CARDS, message_of, take_field, take_list, take_saved, ApiClient, ApiError, Saved};

/// `/api/cards` handle.
pub struct CardsApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Card endpoints.
    pub fn cards(&self) -> CardsApi<'_> {
        CardsApi { client: self }
    }
}

impl CardsApi<'_> {
    /// Every card visible to the signed-in tenant, numbers masked.
    pub async fn list(&self) -> Result<Vec<CardRecord>, ApiError> {
        let mut body: Value = self.client.get(CARDS).await?;
        take_list(&mut body, "cards", CARDS)
    }

    /// Cards held by one friend.
    pub async fn list_by_friend(&self, friend_id: RecordId) -> Result<Vec<CardRecord>, ApiError> {
        let path = format!("{CARDS}/friend/{friend_id}");
        let mut body: Value = self.client.get(&path).await?;
        take_list(&mut body, "cards", &path)
    }

    /// One card including its full number; fetched only on explicit request.
    pub async fn get(&self, id: RecordId) -> Result<CardRecord, ApiError> {
        let path = format!("{CARDS}/{id}");
        let mut body: Value = self.client.get(&path).await?;
        take_field(&mut body, "card", &path)
    }

    /// Create a card.
    pub async fn add(&self, draft: &CardDraft) -> Result<Saved<CardRecord>, ApiError> {
        let body: Value = self.client.post(CARDS, draft).await?;
        take_saved(body, "card", CARDS)
    }

    /// Apply a partial update.
    pub async fn update(
        &self,
        id: RecordId,
        patch: &CardPatch,
    ) -> Result<Saved<CardRecord>, ApiError> {
        let path = format!("{CARDS}/{id}");
        let body: Value = self.client.put(&path, patch).await?;
        take_saved(body, "card", &path)
    }

    /// Delete a card. Returns the server's confirmation, if any.
    pub async fn delete(&self, id: RecordId) -> Result<Option<String>, ApiError> {
        let path = format!("{CARDS}/{id}");
        let body: Value = self.client.delete(&path).await?;
        Ok(message_of(body))
    }
}
