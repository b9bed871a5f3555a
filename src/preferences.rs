// src/preferences.rs
use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

/// In-memory category preference store, standing in for the identity
/// collaborator that owns user rows. The feed core never reads this directly;
/// the HTTP layer snapshots it and passes categories in explicitly.
#[derive(Clone)]
pub struct PreferenceStore {
    inner: Arc<RwLock<BTreeSet<String>>>,
}

impl PreferenceStore {
    /// New store with the default preference set `{general, technology}`.
    pub fn new() -> Self {
        let defaults: BTreeSet<String> =
            ["general", "technology"].into_iter().map(String::from).collect();
        Self {
            inner: Arc::new(RwLock::new(defaults)),
        }
    }

    pub fn get(&self) -> BTreeSet<String> {
        self.inner.read().expect("rwlock poisoned").clone()
    }

    /// Replace the whole set. Empty input is rejected.
    pub fn set(&self, preferences: BTreeSet<String>) -> bool {
        if preferences.is_empty() {
            return false;
        }
        *self.inner.write().expect("rwlock poisoned") = preferences;
        true
    }
}

impl Default for PreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_then_replace() {
        let store = PreferenceStore::new();
        let got = store.get();
        assert!(got.contains("general") && got.contains("technology"));

        let next: BTreeSet<String> = ["sports".to_string()].into_iter().collect();
        assert!(store.set(next));
        assert_eq!(store.get().len(), 1);
    }

    #[test]
    fn empty_replacement_is_rejected() {
        let store = PreferenceStore::new();
        assert!(!store.set(BTreeSet::new()));
        assert!(!store.get().is_empty());
    }
}
