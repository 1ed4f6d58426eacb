//! App Configuration
//!
//! Defaults plus optional overrides stored as JSON under `todoConfig`.

use std::str::FromStr;
use std::time::Duration;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::storage::{KeyValueStorage, StorageError, StorageResult};

/// Storage key holding config overrides
pub const CONFIG_KEY: &str = "todoConfig";

/// Store behaviour and timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Slot the todo list is mirrored into
    pub storage_key: String,
    /// Mirror todos into storage on every change
    pub persist: bool,
    /// Quiet period before search input reaches the store
    pub search_debounce_ms: u64,
    /// Simulated search latency
    pub search_settle_ms: u64,
    /// Simulated initial fetch latency
    pub load_delay_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: "todoList".to_string(),
            persist: true,
            search_debounce_ms: 300,
            search_settle_ms: 100,
            load_delay_ms: 500,
        }
    }
}

impl StoreConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn search_settle(&self) -> Duration {
        Duration::from_millis(self.search_settle_ms)
    }

    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `log` level name: off, error, warn, info, debug, trace
    pub log_level: String,
    pub store: StoreConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            store: StoreConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load overrides from storage; an empty slot yields the defaults.
    /// Read failures and malformed overrides are returned so the caller can
    /// log them and fall back to the defaults.
    pub fn load(storage: &dyn KeyValueStorage) -> StorageResult<Self> {
        match storage.get(CONFIG_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| StorageError::Malformed(e.to_string())),
            None => Ok(Self::default()),
        }
    }

    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_defaults_without_overrides() {
        let config = AppConfig::load(&MemoryStorage::new()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.store.storage_key, "todoList");
        assert_eq!(config.store.search_debounce(), Duration::from_millis(300));
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_partial_override_merges() {
        let storage = MemoryStorage::new();
        storage
            .set(CONFIG_KEY, r#"{"log_level":"debug","store":{"persist":false,"load_delay_ms":10}}"#)
            .unwrap();

        let config = AppConfig::load(&storage).unwrap();
        assert_eq!(config.level_filter(), LevelFilter::Debug);
        assert!(!config.store.persist);
        assert_eq!(config.store.load_delay(), Duration::from_millis(10));
        assert_eq!(config.store.search_settle_ms, 100);
        assert_eq!(config.store.storage_key, "todoList");
    }

    #[test]
    fn test_malformed_override_is_reported() {
        let storage = MemoryStorage::new();
        storage.set(CONFIG_KEY, "{broken").unwrap();
        assert!(matches!(AppConfig::load(&storage), Err(StorageError::Malformed(_))));

        storage.set(CONFIG_KEY, r#"{"store":{"search_debounce_ms":"fast"}}"#).unwrap();
        assert!(matches!(AppConfig::load(&storage), Err(StorageError::Malformed(_))));
    }

    #[test]
    fn test_read_failure_is_reported() {
        struct BrokenStorage;

        impl KeyValueStorage for BrokenStorage {
            fn get(&self, _key: &str) -> StorageResult<Option<String>> {
                Err(StorageError::Read("SecurityError".to_string()))
            }

            fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
                Ok(())
            }
        }

        assert_eq!(
            AppConfig::load(&BrokenStorage),
            Err(StorageError::Read("SecurityError".to_string()))
        );
    }

    #[test]
    fn test_unknown_level_is_info() {
        let config = AppConfig { log_level: "loud".to_string(), ..AppConfig::default() };
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }
}
