//! Key-value persistence
//!
//! Features:
//! - `KeyValueStore` trait over string keys and JSON string values
//! - In-memory store for native builds and tests
//! - Browser LocalStorage backend (wasm32 only)
//! - Player profiles, the cosmetic shop and a game-over recorder built on top

pub mod profile;
pub mod shop;

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use profile::{MatchRecorder, PlayerProfile, ProfileStore};
pub use shop::{Accessory, SHOP_ITEMS, ShopCategory, ShopItem, ShopItemId, Skin};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend is unavailable")]
    Unavailable,
    #[error("storage rejected write for key '{key}'")]
    WriteRejected { key: String },
    #[error("no profile for player '{name}'")]
    UnknownPlayer { name: String },
    #[error("cannot purchase '{item}': costs {price}, have {coins}")]
    CannotPurchase { item: String, price: u64, coins: u64 },
    #[error("'{item}' is not owned")]
    NotOwned { item: String },
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

/// String key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str);
}

/// Read and decode a JSON value. Missing or malformed entries read as `None`.
pub fn load_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let json = store.get(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring malformed '{}': {}", key, e);
            None
        }
    }
}

pub fn save_json<T: Serialize>(
    store: &mut impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

/// Process-local store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = Self::storage().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| StoreError::WriteRejected {
                key: key.to_string(),
            })
    }

    fn remove(&mut self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}
