//! Search, filter and sort over an in-memory card list.
//!
//! [`apply`] is a pure projection of `(records, filters)`: it never mutates
//! its input and keeps no state between calls.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CardCategory, CardRecord, LimitPolicy, NetworkTag};

/// Distinct filter values present in a card list.
/// Distinct values for the filter pickers.
pub mod facets;

pub use facets::Facets;

/// Field the catalog is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Card display name, case-insensitive.
    Name,
    /// Issuing bank, case-insensitive.
    Bank,
    /// Creation timestamp.
    Created,
    /// Limit amount; missing counts as zero.
    Limit,
    /// Accumulated usage; missing counts as zero.
    Used,
}

/// Ordering polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    Asc,
    /// Largest first.
    Desc,
}

/// Every knob of the catalog view. Unset filters match everything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Free text; every whitespace-separated term must appear somewhere.
    pub search: String,
    /// Exact bank name.
    pub bank: Option<String>,
    /// Card network.
    pub network: Option<NetworkTag>,
    /// Credit or debit; records without a category count as credit.
    pub category: Option<CardCategory>,
    /// Exact holder name.
    pub holder: Option<String>,
    /// Limit reset cadence.
    pub limit_policy: Option<LimitPolicy>,
    /// Sort field.
    pub sort_key: SortKey,
    /// Sort polarity.
    pub sort_direction: SortDirection,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            bank: None,
            network: None,
            category: None,
            holder: None,
            limit_policy: None,
            sort_key: SortKey::Created,
            sort_direction: SortDirection::Desc,
        }
    }
}

impl FilterState {
    /// Number of dimensional filters in effect. Search and sort are not counted.
    pub fn active_filter_count(&self) -> usize {
        [
            self.bank.is_some(),
            self.network.is_some(),
            self.category.is_some(),
            self.holder.is_some(),
            self.limit_policy.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Reset search, filters and sort to their defaults.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether `record` passes the search and every dimensional filter.
    pub fn matches(&self, record: &CardRecord) -> bool {
        if !matches_search(record, &self.search) {
            return false;
        }
        if let Some(bank) = &self.bank {
            if record.bank_name.as_ref() != Some(bank) {
                return false;
            }
        }
        if let Some(network) = self.network {
            if record.card_type != network {
                return false;
            }
        }
        if let Some(category) = self.category {
            if record.category() != category {
                return false;
            }
        }
        if let Some(holder) = &self.holder {
            if record.friend_name.as_ref() != Some(holder) {
                return false;
            }
        }
        if let Some(policy) = self.limit_policy {
            if record.limit_type != policy {
                return false;
            }
        }
        true
    }

    /// Compare two records under the current sort key and direction.
    pub fn compare(&self, a: &CardRecord, b: &CardRecord) -> Ordering {
        let ordering = match self.sort_key {
            SortKey::Name => compare_text(&a.card_name, &b.card_name),
            SortKey::Bank => compare_text(
                a.bank_name.as_deref().unwrap_or_default(),
                b.bank_name.as_deref().unwrap_or_default(),
            ),
            // Missing timestamps sort as the earliest instant.
            SortKey::Created => a.created_at.cmp(&b.created_at),
            SortKey::Limit => amount(a.limit_amount).cmp(&amount(b.limit_amount)),
            SortKey::Used => amount(a.total_used).cmp(&amount(b.total_used)),
        };
        match self.sort_direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Filter and order `records`.
///
/// Records that compare equal keep their input order, so the output is
/// fully determined by the arguments.
pub fn apply<'a>(records: &'a [CardRecord], filters: &FilterState) -> Vec<&'a CardRecord> {
    let mut view: Vec<&CardRecord> = records
        .iter()
        .filter(|record| filters.matches(record))
        .collect();
    view.sort_by(|a, b| filters.compare(a, b));
    view
}

/// Case-insensitive multi-term search.
///
/// Every term must be a substring of at least one searchable field; terms
/// may match different fields. A blank search matches everything.
pub fn matches_search(record: &CardRecord, search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let fields: Vec<String> = [
        Some(record.card_name.as_str()),
        record.bank_name.as_deref(),
        record.friend_name.as_deref(),
        record.partner_name.as_deref(),
        record.card_number_last4.as_deref(),
        record.card_number_masked.as_deref(),
        record.notes.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|field| !field.is_empty())
    .map(str::to_lowercase)
    .collect();

    needle
        .split_whitespace()
        .all(|term| fields.iter().any(|field| field.contains(term)))
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn amount(value: Option<Decimal>) -> Decimal {
    value.unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn card(id: i64, name: &str, bank: Option<&str>) -> CardRecord {
        CardRecord {
            id,
            card_name: name.to_string(),
            bank_name: bank.map(str::to_string),
            ..CardRecord::default()
        }
    }

    fn ids(view: &[&CardRecord]) -> Vec<i64> {
        view.iter().map(|record| record.id).collect()
    }

    fn sample() -> Vec<CardRecord> {
        let mut millennia = card(1, "Millennia", Some("HDFC"));
        millennia.friend_name = Some("Ravi".to_string());
        millennia.card_type = NetworkTag::Mastercard;
        millennia.limit_type = LimitPolicy::Monthly;
        millennia.limit_amount = Some(Decimal::new(5000, 0));
        millennia.total_used = Some(Decimal::new(1200, 0));
        millennia.card_number_last4 = Some("4444".to_string());
        millennia.created_at = Some(Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap());

        let mut ace = card(2, "Ace", Some("Axis Bank"));
        ace.friend_name = Some("Priya".to_string());
        ace.card_type = NetworkTag::Visa;
        ace.card_category = Some(CardCategory::Debit);
        ace.notes = Some("fuel only".to_string());
        ace.created_at = Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());

        let mut regalia = card(3, "Regalia", Some("HDFC"));
        regalia.friend_name = Some("Ravi".to_string());
        regalia.partner_name = Some("Axis Traders".to_string());
        regalia.card_type = NetworkTag::Visa;
        regalia.limit_type = LimitPolicy::Quarterly;
        regalia.limit_amount = Some(Decimal::new(15000, 0));

        let mut swiggy = card(4, "Swiggy", Some("HDFC"));
        swiggy.card_type = NetworkTag::Rupay;
        swiggy.card_number_masked = Some("**** **** **** 9876".to_string());
        swiggy.created_at = Some(Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).unwrap());

        vec![millennia, ace, regalia, swiggy]
    }

    #[test]
    fn blank_search_matches_everything() {
        let records = sample();
        let filters = FilterState {
            search: "   ".to_string(),
            sort_key: SortKey::Name,
            sort_direction: SortDirection::Asc,
            ..FilterState::default()
        };
        assert_eq!(ids(&apply(&records, &filters)), vec![2, 1, 3, 4]);
    }

    #[test]
    fn every_term_must_match_some_field() {
        let records = sample();
        let filters = FilterState {
            search: "axis bank".to_string(),
            ..FilterState::default()
        };
        assert_eq!(ids(&apply(&records, &filters)), vec![2]);

        // "axis" matches the partner and "ravi" the holder: different fields.
        let filters = FilterState {
            search: "AXIS ravi".to_string(),
            ..FilterState::default()
        };
        assert_eq!(ids(&apply(&records, &filters)), vec![3]);
    }

    #[test]
    fn search_covers_digits_and_notes() {
        let records = sample();
        let by_last4 = FilterState {
            search: "4444".to_string(),
            ..FilterState::default()
        };
        assert_eq!(ids(&apply(&records, &by_last4)), vec![1]);

        let by_masked = FilterState {
            search: "9876".to_string(),
            ..FilterState::default()
        };
        assert_eq!(ids(&apply(&records, &by_masked)), vec![4]);

        let by_notes = FilterState {
            search: "Fuel".to_string(),
            ..FilterState::default()
        };
        assert_eq!(ids(&apply(&records, &by_notes)), vec![2]);
    }

    #[test]
    fn bank_filter_sorted_by_limit_descending() {
        let records = sample();
        let filters = FilterState {
            bank: Some("HDFC".to_string()),
            sort_key: SortKey::Limit,
            sort_direction: SortDirection::Desc,
            ..FilterState::default()
        };
        let view = apply(&records, &filters);
        assert_eq!(ids(&view), vec![3, 1, 4]);
        assert!(view.iter().all(|record| record.bank_name.as_deref() == Some("HDFC")));
        assert!(view
            .windows(2)
            .all(|pair| amount(pair[0].limit_amount) >= amount(pair[1].limit_amount)));
    }

    #[test]
    fn dimensional_filters_are_exact_and_compose() {
        let records = sample();
        let lowercase_bank = FilterState {
            bank: Some("hdfc".to_string()),
            ..FilterState::default()
        };
        assert!(apply(&records, &lowercase_bank).is_empty());

        let filters = FilterState {
            holder: Some("Ravi".to_string()),
            network: Some(NetworkTag::Visa),
            ..FilterState::default()
        };
        assert_eq!(ids(&apply(&records, &filters)), vec![3]);

        let monthly = FilterState {
            limit_policy: Some(LimitPolicy::Monthly),
            ..FilterState::default()
        };
        assert_eq!(ids(&apply(&records, &monthly)), vec![1]);
    }

    #[test]
    fn missing_category_counts_as_credit() {
        let records = sample();
        let credit = FilterState {
            category: Some(CardCategory::Credit),
            sort_key: SortKey::Name,
            sort_direction: SortDirection::Asc,
            ..FilterState::default()
        };
        assert_eq!(ids(&apply(&records, &credit)), vec![1, 3, 4]);

        let debit = FilterState {
            category: Some(CardCategory::Debit),
            ..FilterState::default()
        };
        assert_eq!(ids(&apply(&records, &debit)), vec![2]);
    }

    #[test]
    fn created_sort_puts_missing_timestamps_first_when_ascending() {
        let records = sample();
        let mut filters = FilterState {
            sort_key: SortKey::Created,
            sort_direction: SortDirection::Asc,
            ..FilterState::default()
        };
        assert_eq!(ids(&apply(&records, &filters)), vec![3, 4, 1, 2]);

        filters.sort_direction = SortDirection::Desc;
        assert_eq!(ids(&apply(&records, &filters)), vec![2, 1, 4, 3]);
    }

    #[test]
    fn ties_keep_input_order_in_both_directions() {
        let records = vec![
            card(10, "b", Some("HDFC")),
            card(11, "a", Some("hdfc")),
            card(12, "c", Some("Axis")),
        ];
        let mut filters = FilterState {
            sort_key: SortKey::Bank,
            sort_direction: SortDirection::Asc,
            ..FilterState::default()
        };
        assert_eq!(ids(&apply(&records, &filters)), vec![12, 10, 11]);

        filters.sort_direction = SortDirection::Desc;
        assert_eq!(ids(&apply(&records, &filters)), vec![10, 11, 12]);
    }

    #[test]
    fn used_sort_treats_missing_as_zero() {
        let records = sample();
        let filters = FilterState {
            sort_key: SortKey::Used,
            sort_direction: SortDirection::Desc,
            ..FilterState::default()
        };
        assert_eq!(ids(&apply(&records, &filters)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn apply_is_repeatable_and_leaves_input_alone() {
        let records = sample();
        let before = records.clone();
        let filters = FilterState {
            search: "hdfc".to_string(),
            sort_key: SortKey::Name,
            sort_direction: SortDirection::Desc,
            ..FilterState::default()
        };
        let first = ids(&apply(&records, &filters));
        let second = ids(&apply(&records, &filters));
        assert_eq!(first, second);
        assert_eq!(first, vec![4, 3, 1]);
        assert_eq!(records, before);
    }

    #[test]
    fn active_filter_count_and_clear() {
        let mut filters = FilterState {
            search: "x".to_string(),
            bank: Some("HDFC".to_string()),
            limit_policy: Some(LimitPolicy::Yearly),
            sort_key: SortKey::Name,
            ..FilterState::default()
        };
        assert_eq!(filters.active_filter_count(), 2);

        filters.clear();
        assert_eq!(filters, FilterState::default());
        assert_eq!(filters.sort_key, SortKey::Created);
        assert_eq!(filters.sort_direction, SortDirection::Desc);
    }
}
