use std::collections::BTreeSet;

use crate::models::{CardRecord, LimitPolicy, NetworkTag};

/// Options offered by the filter pickers, each sorted and de-duplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    /// Issuing banks.
    pub banks: Vec<String>,
    /// Known networks only; `unknown` is never offered.
    pub networks: Vec<NetworkTag>,
    /// Friend or partner names holding a card.
    pub holders: Vec<String>,
    /// Cashback limit policies in use.
    pub limit_policies: Vec<LimitPolicy>,
}

impl Facets {
    /// Collect the distinct values present in `records`.
    pub fn from_records(records: &[CardRecord]) -> Self {
        let mut banks = BTreeSet::new();
        let mut networks = BTreeSet::new();
        let mut holders = BTreeSet::new();
        let mut limit_policies = BTreeSet::new();

        for record in records {
            if let Some(bank) = record.bank_name.as_deref().filter(|bank| !bank.is_empty()) {
                banks.insert(bank.to_string());
            }
            if record.card_type != NetworkTag::Unknown {
                networks.insert(record.card_type);
            }
            if let Some(holder) = record.friend_name.as_deref().filter(|name| !name.is_empty()) {
                holders.insert(holder.to_string());
            }
            limit_policies.insert(record.limit_type);
        }

        Self {
            banks: banks.into_iter().collect(),
            networks: networks.into_iter().collect(),
            holders: holders.into_iter().collect(),
            limit_policies: limit_policies.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_distinct_sorted_values() {
        let records = vec![
            CardRecord {
                id: 1,
                bank_name: Some("SBI".to_string()),
                friend_name: Some("Ravi".to_string()),
                card_type: NetworkTag::Rupay,
                limit_type: LimitPolicy::Yearly,
                ..CardRecord::default()
            },
            CardRecord {
                id: 2,
                bank_name: Some("HDFC".to_string()),
                friend_name: Some("Anil".to_string()),
                card_type: NetworkTag::Unknown,
                ..CardRecord::default()
            },
            CardRecord {
                id: 3,
                bank_name: Some("SBI".to_string()),
                card_type: NetworkTag::Visa,
                ..CardRecord::default()
            },
        ];

        let facets = Facets::from_records(&records);
        assert_eq!(facets.banks, vec!["HDFC", "SBI"]);
        assert_eq!(facets.networks, vec![NetworkTag::Visa, NetworkTag::Rupay]);
        assert_eq!(facets.holders, vec!["Anil", "Ravi"]);
        assert_eq!(facets.limit_policies, vec![LimitPolicy::None, LimitPolicy::Yearly]);
    }
}
