use crate::error::SlipResult;
use crate::store::SlipStore;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// In-memory slip store. State lives for the lifetime of the process;
/// useful for tests and embedders that manage durability themselves.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlipStore for MemoryStore {
    fn get(&self, key: &str) -> SlipResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> SlipResult<()> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing").unwrap(), None);

        store.set("betslip.currency", "USD").unwrap();
        assert_eq!(store.get("betslip.currency").unwrap().as_deref(), Some("USD"));

        store.set("betslip.currency", "RWF").unwrap();
        assert_eq!(store.get("betslip.currency").unwrap().as_deref(), Some("RWF"));
    }
}
