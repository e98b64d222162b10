use tracing::{debug, info};

use crate::api::{ApiClient, ApiError, Saved};
use crate::card::{classify, CardNameRegistry};
use crate::models::{CardDraft, CardRecord};
use crate::validation::validate_card;

use super::WorkflowError;

/// Fetch the catalog and fold its card names into the suggestion list.
///
/// Saving the names is best effort and never fails the load.
pub async fn load_catalog(
    api: &ApiClient,
    names: &CardNameRegistry,
) -> Result<Vec<CardRecord>, ApiError> {
    let cards = api.cards().list().await?;
    let seen: Vec<&str> = cards.iter().map(|card| card.card_name.as_str()).collect();
    names.sync_server_names(&seen).await;
    info!(count = cards.len(), "Loaded card catalog");
    Ok(cards)
}

/// Validate, stamp network and category, submit, then remember the name.
///
/// A partner-held card is sent without `friend_id`; the server resolves the
/// partner's friend entry itself.
pub async fn create_card(
    api: &ApiClient,
    names: &CardNameRegistry,
    mut draft: CardDraft,
) -> Result<Saved<CardRecord>, WorkflowError> {
    validate_card(&draft)?;

    draft.card_type = Some(classify(&draft.card_number));
    draft.card_category = Some(draft.card_category.unwrap_or_default());
    if draft.partner_id.is_some_and(|id| id != 0) {
        draft.friend_id = None;
    }

    let saved = api.cards().add(&draft).await?;
    if names.add_name(&draft.card_name).await {
        debug!(name = %draft.card_name.trim(), "Remembered new card name");
    }
    Ok(saved)
}
