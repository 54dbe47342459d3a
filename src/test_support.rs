//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use crate::config::{ClientConfig, ConfigStore};

/// In-memory config store. Clones share the same slot, so a test can hand
/// one clone to the client and inspect writes through another.
#[derive(Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<ClientConfig>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last config written through [`ConfigStore::save`].
    pub fn saved(&self) -> Option<ClientConfig> {
        self.slot.lock().unwrap().clone()
    }
}

impl ConfigStore for MemoryStore {
    fn load(&self) -> Option<ClientConfig> {
        self.slot.lock().unwrap().clone()
    }

    fn save(&self, config: &ClientConfig) {
        *self.slot.lock().unwrap() = Some(config.clone());
    }
}
