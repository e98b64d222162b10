use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::RecordId;

/// Card scheme derived from the leading digits of the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkTag {
    Visa,
    Mastercard,
    Rupay,
    #[serde(other)]
    Unknown,
}

impl NetworkTag {
    /// Label shown next to a card number. Empty for [`NetworkTag::Unknown`].
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::Rupay => "RuPay",
            Self::Unknown => "",
        }
    }

    /// Wire value, also used as the filter key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::Rupay => "rupay",
            Self::Unknown => "unknown",
        }
    }
}

impl Default for NetworkTag {
    fn default() -> Self {
        Self::Unknown
    }
}

impl fmt::Display for NetworkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credit or debit. Records without a category are credit cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardCategory {
    Credit,
    Debit,
}

impl Default for CardCategory {
    fn default() -> Self {
        Self::Credit
    }
}

/// Cashback limit reset cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitPolicy {
    None,
    Monthly,
    Quarterly,
    Yearly,
}

impl Default for LimitPolicy {
    fn default() -> Self {
        Self::None
    }
}

impl LimitPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

/// A card as listed by `GET /api/cards`.
///
/// The list endpoint only carries the last four digits and a masked number;
/// `card_number` is populated by `GET /api/cards/:id`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: RecordId,
    #[serde(default)]
    pub friend_id: Option<RecordId>,
    #[serde(default)]
    pub partner_id: Option<RecordId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub card_name: String,
    #[serde(default)]
    pub card_number: Option<String>,
    #[serde(default)]
    pub card_number_last4: Option<String>,
    #[serde(default)]
    pub card_number_masked: Option<String>,
    #[serde(default)]
    pub expiry_mm: Option<String>,
    #[serde(default)]
    pub expiry_yy: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub card_type: NetworkTag,
    #[serde(default)]
    pub card_category: Option<CardCategory>,
    #[serde(default)]
    pub bank_name: Option<String>,
    /// Holder: the friend (or partner acting as friend) lending the card.
    #[serde(default)]
    pub friend_name: Option<String>,
    #[serde(default)]
    pub partner_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub limit_type: LimitPolicy,
    #[serde(default)]
    pub limit_amount: Option<Decimal>,
    #[serde(default)]
    pub limit_period_start: Option<String>,
    #[serde(default)]
    pub current_period_start: Option<String>,
    #[serde(default)]
    pub current_period_end: Option<String>,
    #[serde(default)]
    pub total_used: Option<Decimal>,
    /// Computed by the server; displayed as-is.
    #[serde(default)]
    pub limit_remaining: Option<Decimal>,
    #[serde(default)]
    pub total_cashback: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Explicit `null` reads the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl CardRecord {
    /// Category with the implicit credit default applied.
    pub fn category(&self) -> CardCategory {
        self.card_category.unwrap_or_default()
    }

    /// Limit amount, only when a limit policy is in force.
    pub fn effective_limit(&self) -> Option<Decimal> {
        match self.limit_type {
            LimitPolicy::None => None,
            _ => self.limit_amount,
        }
    }

    /// Expiry rendered as `MM/YY` when both halves are known.
    pub fn expiry(&self) -> Option<String> {
        match (self.expiry_mm.as_deref(), self.expiry_yy.as_deref()) {
            (Some(mm), Some(yy)) if !mm.is_empty() && !yy.is_empty() => {
                Some(format!("{mm}/{yy}"))
            }
            _ => None,
        }
    }
}

/// Payload for `POST /api/cards`.
///
/// Exactly one of `friend_id` / `partner_id` names the holder; when a
/// partner is chosen the server resolves the matching friend entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CardDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friend_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<RecordId>,
    pub card_name: String,
    pub card_number: String,
    pub expiry_mm: String,
    pub expiry_yy: String,
    pub cvv: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<NetworkTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_category: Option<CardCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    pub limit_type: Option<LimitPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_period_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial update for `PUT /api/cards/:id`; unset fields are left alone.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CardPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_mm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_yy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_category: Option<CardCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_type: Option<LimitPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_period_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_list_payload_with_string_amounts() -> anyhow::Result<()> {
        let record: CardRecord = serde_json::from_value(json!({
            "id": 7,
            "card_name": "Amazon Pay ICICI",
            "card_number_last4": "1111",
            "card_type": "visa",
            "bank_name": "ICICI",
            "friend_name": "Ravi",
            "limit_type": "monthly",
            "limit_amount": "5000.00",
            "total_used": 1250,
            "created_at": "2024-03-01T10:00:00.000Z"
        }))?;

        assert_eq!(record.card_type, NetworkTag::Visa);
        assert_eq!(record.category(), CardCategory::Credit);
        assert_eq!(record.effective_limit(), Some(Decimal::new(5000, 0)));
        assert_eq!(record.total_used, Some(Decimal::new(1250, 0)));
        assert!(record.created_at.is_some());
        Ok(())
    }

    #[test]
    fn unexpected_network_falls_back_to_unknown() -> anyhow::Result<()> {
        let record: CardRecord =
            serde_json::from_value(json!({ "id": 1, "card_type": "amex", "limit_type": "none", "limit_amount": 900 }))?;
        assert_eq!(record.card_type, NetworkTag::Unknown);
        assert_eq!(record.effective_limit(), None);
        Ok(())
    }

    #[test]
    fn null_fields_read_as_defaults() -> anyhow::Result<()> {
        let record: CardRecord = serde_json::from_value(json!({
            "id": 1,
            "card_name": null,
            "card_type": null,
            "limit_type": null,
            "limit_amount": "100"
        }))?;
        assert_eq!(record.card_name, "");
        assert_eq!(record.card_type, NetworkTag::Unknown);
        assert_eq!(record.limit_type, LimitPolicy::None);
        assert_eq!(record.effective_limit(), None);
        Ok(())
    }

    #[test]
    fn patch_serializes_only_set_fields() -> anyhow::Result<()> {
        let patch = CardPatch {
            notes: Some("renewed".to_string()),
            ..CardPatch::default()
        };
        assert_eq!(serde_json::to_value(&patch)?, json!({ "notes": "renewed" }));
        Ok(())
    }
}
