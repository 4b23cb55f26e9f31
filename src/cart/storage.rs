//! Durable key-value storage for the cart.
//!
//! Loading and saving never fail towards the caller: a broken store means
//! an empty cart on load and an unsaved cart on write, both logged.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use super::CartState;

/// Key under which the cart JSON (`{"pizzas": [...], "misc": [...]}`) is stored.
pub const CART_STORAGE_KEY: &str = "cart";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
}

pub trait CartStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside `dir`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl CartStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        // write-then-rename so a crash never leaves half a cart behind
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// Reads the cart from `storage`. Missing or unreadable data yields an empty cart.
pub fn load_cart<S: CartStorage + ?Sized>(storage: &S) -> CartState {
    let raw = match storage.get(CART_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return CartState::default(),
        Err(err) => {
            tracing::error!(error = %err, "failed to read cart from storage");
            return CartState::default();
        }
    };

    match serde_json::from_str::<CartState>(&raw) {
        Ok(state) => state,
        Err(err) => {
            tracing::error!(error = %err, "stored cart is malformed, starting empty");
            CartState::default()
        }
    }
}

/// Writes the cart to `storage`. Failures are logged and swallowed.
pub fn save_cart<S: CartStorage + ?Sized>(storage: &mut S, state: &CartState) {
    let raw = match serde_json::to_string(state) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::error!(error = %err, "failed to serialize cart");
            return;
        }
    };
    if let Err(err) = storage.set(CART_STORAGE_KEY, &raw) {
        tracing::error!(error = %err, "failed to save cart to storage");
    }
}
