//! Card-name suggestions for the "add card" form.
//!
//! Three sources feed the list: a bundled catalogue of common card products,
//! names the user has saved on this device, and names seen in the latest
//! catalog fetch. Only the device-local list is ever written.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::storage::{SharedStorage, CARD_NAMES_KEY};

/// Card products offered before the user has saved anything.
pub const DEFAULT_CARD_NAMES: &[&str] = &[
    "Amazon Pay ICICI",
    "Axis Bank Ace",
    "Axis Bank Flipkart",
    "Axis Bank Magnus",
    "Axis Bank My Zone",
    "Axis Bank Neo",
    "Axis Bank Select",
    "BOBCARD Eterna",
    "AU Bank LIT",
    "HDFC Diners Club Black",
    "HDFC Infinia",
    "HDFC Millennia",
    "HDFC MoneyBack+",
    "HDFC Regalia Gold",
    "HDFC Swiggy",
    "HDFC Tata Neu Infinity",
    "HDFC Tata Neu Plus",
    "ICICI Coral",
    "ICICI Emeralde",
    "ICICI HPCL Super Saver",
    "ICICI Rubyx",
    "ICICI Sapphiro",
    "IDFC First Millennia",
    "IDFC First Select",
    "IDFC First Wealth",
    "IndusInd Legend",
    "Kotak 811",
    "Kotak League Platinum",
    "Kotak Myntra",
    "OneCard",
    "RBL Shoprite",
    "SBI Cashback",
    "SBI Elite",
    "SBI Prime",
    "SBI SimplyCLICK",
    "SBI SimplySAVE",
    "Standard Chartered Smart",
    "YES Bank Marquee",
];

/// Merges and persists card-name suggestions.
///
/// Reads never fail: an unreadable or corrupt device list counts as empty.
/// Writes are read-modify-write without a lock, so two concurrent adds may
/// lose one of the names.
#[derive(Clone)]
pub struct CardNameRegistry {
    storage: SharedStorage,
    defaults: Vec<String>,
}

impl CardNameRegistry {
    /// Registry over `storage` seeded with [`DEFAULT_CARD_NAMES`].
    pub fn new(storage: SharedStorage) -> Self {
        Self::with_defaults(storage, DEFAULT_CARD_NAMES.iter().copied())
    }

    /// Registry with a custom bundled list.
    pub fn with_defaults<I, S>(storage: SharedStorage, defaults: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            storage,
            defaults: defaults.into_iter().map(Into::into).collect(),
        }
    }

    /// The bundled list as given.
    pub fn defaults(&self) -> &[String] {
        &self.defaults
    }

    /// Names saved on this device, in stored order.
    pub async fn persisted(&self) -> Vec<String> {
        let raw = match self.storage.get(CARD_NAMES_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(?err, "Reading saved card names failed");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(names) => names,
            Err(err) => {
                warn!(%err, "Saved card names are corrupt; ignoring them");
                Vec::new()
            }
        }
    }

    /// Every known name: bundled, saved and `server_names`, trimmed,
    /// de-duplicated and sorted. Recomputed on each call.
    pub async fn all_names<S: AsRef<str>>(&self, server_names: &[S]) -> Vec<String> {
        let persisted = self.persisted().await;
        merge_names(
            self.defaults
                .iter()
                .map(String::as_str)
                .chain(persisted.iter().map(String::as_str))
                .chain(server_names.iter().map(AsRef::as_ref)),
        )
    }

    /// Save `name` on this device. Returns whether it was newly stored.
    ///
    /// Blank names and names already saved (after trimming, case-sensitive)
    /// are skipped.
    pub async fn add_name(&self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return false;
        }

        let mut existing = self.persisted().await;
        if existing.iter().any(|saved| saved == trimmed) {
            return false;
        }

        existing.push(trimmed.to_string());
        existing.sort();
        if self.write(&existing).await {
            debug!(name = trimmed, "Saved card name");
            true
        } else {
            false
        }
    }

    /// Fold names seen on the server into the device list.
    pub async fn sync_server_names<S: AsRef<str>>(&self, server_names: &[S]) {
        let existing = self.persisted().await;
        let merged = merge_names(
            existing
                .iter()
                .map(String::as_str)
                .chain(server_names.iter().map(AsRef::as_ref)),
        );
        if merged == existing {
            return;
        }
        if self.write(&merged).await {
            debug!(count = merged.len(), "Synced card names from server");
        }
    }

    /// Forget every saved name. Bundled names are unaffected.
    pub async fn clear(&self) {
        if let Err(err) = self.storage.remove(CARD_NAMES_KEY).await {
            warn!(?err, "Clearing saved card names failed");
        }
    }

    async fn write(&self, names: &[String]) -> bool {
        let serialized = match serde_json::to_string(names) {
            Ok(serialized) => serialized,
            Err(err) => {
                warn!(%err, "Serializing card names failed");
                return false;
            }
        };
        match self.storage.set(CARD_NAMES_KEY, &serialized).await {
            Ok(()) => true,
            Err(err) => {
                warn!(?err, "Saving card names failed");
                false
            }
        }
    }
}

/// Trim, drop blanks, de-duplicate and sort.
pub fn merge_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    names
        .into_iter()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::storage::{MemoryStorage, Storage, StorageError};

    fn registry(storage: Arc<MemoryStorage>) -> CardNameRegistry {
        CardNameRegistry::with_defaults(storage, ["Zeta", " Alpha ", ""])
    }

    #[tokio::test]
    async fn merges_all_sources() {
        let storage = Arc::new(MemoryStorage::with_entries([(
            CARD_NAMES_KEY,
            r#"["Mid","Alpha"]"#,
        )]));
        let names = registry(storage).all_names(&["Beta ", "  ", "Zeta"]).await;
        assert_eq!(names, vec!["Alpha", "Beta", "Mid", "Zeta"]);
    }

    #[tokio::test]
    async fn all_names_is_repeatable() {
        let storage = Arc::new(MemoryStorage::new());
        let registry = registry(storage);
        let first = registry.all_names(&["Foo"]).await;
        let second = registry.all_names(&["Foo"]).await;
        assert_eq!(first, second);
        assert_eq!(first, vec!["Alpha", "Foo", "Zeta"]);
    }

    #[tokio::test]
    async fn adding_twice_stores_once() {
        let storage = Arc::new(MemoryStorage::new());
        let registry = registry(storage);
        assert!(registry.add_name("Foo").await);
        assert!(!registry.add_name(" Foo ").await);
        assert!(registry.add_name("Bar").await);
        assert!(!registry.add_name("   ").await);
        assert_eq!(registry.persisted().await, vec!["Bar", "Foo"]);
    }

    #[tokio::test]
    async fn dedup_is_case_sensitive() {
        let storage = Arc::new(MemoryStorage::new());
        let registry = registry(storage);
        assert!(registry.add_name("foo").await);
        assert!(registry.add_name("Foo").await);
        assert_eq!(registry.persisted().await, vec!["Foo", "foo"]);
    }

    #[tokio::test]
    async fn corrupt_list_reads_as_empty() {
        let storage = Arc::new(MemoryStorage::with_entries([(CARD_NAMES_KEY, "{oops")]));
        let registry = registry(storage);
        assert!(registry.persisted().await.is_empty());
        assert_eq!(registry.all_names::<&str>(&[]).await, vec!["Alpha", "Zeta"]);

        assert!(registry.add_name("Foo").await);
        assert_eq!(registry.persisted().await, vec!["Foo"]);
    }

    #[tokio::test]
    async fn sync_merges_server_names_into_device_list() {
        let storage = Arc::new(MemoryStorage::with_entries([(CARD_NAMES_KEY, r#"["Mid"]"#)]));
        let registry = registry(storage.clone());
        registry.sync_server_names(&["Server", " Mid", ""]).await;
        assert_eq!(registry.persisted().await, vec!["Mid", "Server"]);

        registry.clear().await;
        assert!(registry.persisted().await.is_empty());
        assert_eq!(registry.defaults().len(), 3);
    }

    struct BrokenStorage;

    #[async_trait]
    impl Storage for BrokenStorage {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Io {
                path: "broken".to_string(),
                source: std::io::Error::other("unavailable"),
            })
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io {
                path: "broken".to_string(),
                source: std::io::Error::other("unavailable"),
            })
        }

        async fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn unavailable_storage_is_absorbed() {
        let registry = CardNameRegistry::with_defaults(Arc::new(BrokenStorage), ["Alpha"]);
        assert_eq!(registry.all_names(&["Beta"]).await, vec!["Alpha", "Beta"]);
        assert!(!registry.add_name("Gamma").await);
        registry.sync_server_names(&["Delta"]).await;
    }
}
