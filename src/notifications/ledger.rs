use tracing::warn;

use crate::persistence::{KeyValueStore, Result};

/// Records which budget alerts have already fired, one flag per
/// category and month.
pub struct AlertLedger<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> AlertLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn key(category_id: &str, month: &str) -> String {
        format!("budgetAlert_{}_{}", category_id, month)
    }

    /// An unreadable or malformed flag reads as "not fired".
    pub fn has_fired(&self, category_id: &str, month: &str) -> bool {
        let key = Self::key(category_id, month);
        match self.store.read(&key) {
            Ok(Some(bytes)) => serde_json::from_slice::<bool>(&bytes).unwrap_or_else(|err| {
                warn!(key = %key, error = %err, "ignoring malformed alert flag");
                false
            }),
            Ok(None) => false,
            Err(err) => {
                warn!(key = %key, error = %err, "failed to read alert flag");
                false
            }
        }
    }

    pub fn mark_fired(&self, category_id: &str, month: &str) -> Result<()> {
        let bytes = serde_json::to_vec(&true)?;
        self.store.write(&Self::key(category_id, month), &bytes)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn flag_is_keyed_by_category_and_month() {
        let ledger = AlertLedger::new(MemoryStore::new());
        assert!(!ledger.has_fired("food", "2024-03"));
        ledger.mark_fired("food", "2024-03").unwrap();
        assert!(ledger.has_fired("food", "2024-03"));
        assert!(!ledger.has_fired("food", "2024-04"));
        assert_eq!(ledger.store().keys(), ["budgetAlert_food_2024-03"]);
        assert_eq!(
            ledger.store().read("budgetAlert_food_2024-03").unwrap().as_deref(),
            Some(&b"true"[..])
        );
    }

    #[test]
    fn malformed_flag_reads_as_unfired() {
        let store = MemoryStore::new();
        store.write("budgetAlert_food_2024-03", b"yes").unwrap();
        let ledger = AlertLedger::new(store);
        assert!(!ledger.has_fired("food", "2024-03"));
    }
}
