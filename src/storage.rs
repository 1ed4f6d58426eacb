//! Key-Value Storage
//!
//! The persisted slot for todos. `window.localStorage` in the browser, an
//! in-memory map when it is unavailable (private mode, sandboxed frames).

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::Todo;

/// Storage-level errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    Unavailable(String),
    Read(String),
    Write(String),
    Malformed(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Unavailable(msg) => write!(f, "Storage unavailable: {}", msg),
            StorageError::Read(msg) => write!(f, "Read failed: {}", msg),
            StorageError::Write(msg) => write!(f, "Write failed: {}", msg),
            StorageError::Malformed(msg) => write!(f, "Malformed data: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

pub type StorageResult<T> = Result<T, StorageError>;

/// String key-value slot store
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// `window.localStorage`
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    pub fn open() -> StorageResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Read(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}

/// Process-local map, lost on reload
#[derive(Default)]
pub struct MemoryStorage {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.slots.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Serialized form of the slot: `{"todos": [...]}`
#[derive(Serialize, Deserialize)]
struct PersistedTodos {
    todos: Vec<Todo>,
}

/// Write the todo list under `key`
pub fn save_todos(storage: &dyn KeyValueStorage, key: &str, todos: &[Todo]) -> StorageResult<()> {
    let json = serde_json::to_string(&PersistedTodos { todos: todos.to_vec() })
        .map_err(|e| StorageError::Write(e.to_string()))?;
    storage.set(key, &json)
}

/// Read the todo list under `key`. `Ok(None)` when the slot is empty.
pub fn restore_todos(storage: &dyn KeyValueStorage, key: &str) -> StorageResult<Option<Vec<Todo>>> {
    let Some(raw) = storage.get(key)? else {
        return Ok(None);
    };
    let persisted: PersistedTodos =
        serde_json::from_str(&raw).map_err(|e| StorageError::Malformed(e.to_string()))?;

    let mut seen = HashSet::new();
    if let Some(dup) = persisted.todos.iter().find(|t| !seen.insert(t.id)) {
        return Err(StorageError::Malformed(format!("duplicate id {}", dup.id)));
    }
    Ok(Some(persisted.todos))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "todoList";

    #[test]
    fn test_save_then_restore() {
        let storage = MemoryStorage::new();
        let todos = vec![
            Todo { id: 7, title: "Buy milk".to_string(), completed: true },
            Todo::new(9, "Walk dog"),
        ];
        save_todos(&storage, KEY, &todos).unwrap();

        let restored = restore_todos(&storage, KEY).unwrap();
        assert_eq!(restored, Some(todos));
    }

    #[test]
    fn test_wire_shape() {
        let storage = MemoryStorage::new();
        save_todos(&storage, KEY, &[Todo::new(1, "a")]).unwrap();
        let raw = storage.get(KEY).unwrap().unwrap();
        assert_eq!(raw, r#"{"todos":[{"id":1,"title":"a","completed":false}]}"#);
    }

    #[test]
    fn test_missing_slot_is_none() {
        let storage = MemoryStorage::new();
        assert_eq!(restore_todos(&storage, KEY).unwrap(), None);
    }

    #[test]
    fn test_malformed_payloads() {
        let storage = MemoryStorage::new();
        for raw in [
            "not json",
            r#"[1,2,3]"#,
            r#"{"todos":[{"id":"x","title":"a","completed":false}]}"#,
            r#"{"todos":[{"id":1,"title":"a","completed":false},{"id":1,"title":"b","completed":true}]}"#,
        ] {
            storage.set(KEY, raw).unwrap();
            assert!(
                matches!(restore_todos(&storage, KEY), Err(StorageError::Malformed(_))),
                "expected malformed for {}",
                raw
            );
        }
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            StorageError::Write("quota".to_string()).to_string(),
            "Write failed: quota"
        );
    }
}
