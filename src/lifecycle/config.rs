//! Runtime configuration for the cart store.
//!
//! | Variable            | Default             | Meaning                                  |
//! |---------------------|---------------------|------------------------------------------|
//! | `CART_STORAGE_KEY`  | `@RocketShoes:cart` | key the serialized cart is stored under  |
//! | `CART_STORAGE_DIR`  | unset               | directory for [`FileStore`]; unset keeps the cart in memory |
//! | `CART_BUFFER_SIZE`  | `32`                | capacity of the store's request channel  |

use crate::cart_actor::DEFAULT_BUFFER_SIZE;
use crate::services::{FileStore, KeyValueStore, MemoryStore, StorageError};
use std::num::ParseIntError;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

pub const ENV_STORAGE_KEY: &str = "CART_STORAGE_KEY";
pub const ENV_STORAGE_DIR: &str = "CART_STORAGE_DIR";
pub const ENV_BUFFER_SIZE: &str = "CART_BUFFER_SIZE";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be a number, got {value:?}: {source}")]
    InvalidNumber {
        var: &'static str,
        value: String,
        source: ParseIntError,
    },

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartConfig {
    pub storage_key: String,
    /// `None` keeps the cart in process memory only.
    pub storage_dir: Option<PathBuf>,
    pub buffer_size: usize,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_dir: None,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl CartConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults for unset
    /// variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(key) = lookup(ENV_STORAGE_KEY) {
            if key.trim().is_empty() {
                return Err(ConfigError::Empty(ENV_STORAGE_KEY));
            }
            config.storage_key = key;
        }

        if let Some(dir) = lookup(ENV_STORAGE_DIR).filter(|d| !d.trim().is_empty()) {
            config.storage_dir = Some(PathBuf::from(dir));
        }

        if let Some(value) = lookup(ENV_BUFFER_SIZE) {
            let size: usize = value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidNumber {
                    var: ENV_BUFFER_SIZE,
                    value: value.clone(),
                    source,
                })?;
            if size == 0 {
                return Err(ConfigError::Zero(ENV_BUFFER_SIZE));
            }
            config.buffer_size = size;
        }

        Ok(config)
    }

    /// The key-value store this configuration points at.
    pub fn open_storage(&self) -> Result<Arc<dyn KeyValueStore>, StorageError> {
        Ok(match &self.storage_dir {
            Some(dir) => Arc::new(FileStore::open(dir)?),
            None => Arc::new(MemoryStore::new()),
        })
    }
}
