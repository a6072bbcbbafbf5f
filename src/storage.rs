use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::warn;
use web_sys::{Storage, Window};

use crate::error::{describe, SiteError};

pub trait KeyValueStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<(), SiteError>;
}

impl KeyValueStore for Storage {
    fn read(&self, key: &str) -> Option<String> {
        self.get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SiteError> {
        self.set_item(key, value)
            .map_err(|err| SiteError::Storage(describe(&err)))
    }
}

/// Page-lifetime store, used when `localStorage` is off limits.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SiteError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub enum BrowserStore {
    Local(Storage),
    Memory(MemoryStore),
}

impl BrowserStore {
    pub fn open(window: &Window) -> Self {
        match window.local_storage() {
            Ok(Some(storage)) => BrowserStore::Local(storage),
            Ok(None) => {
                warn!("localStorage missing, theme will not persist");
                BrowserStore::Memory(MemoryStore::default())
            }
            Err(err) => {
                warn!("localStorage blocked ({}), theme will not persist", describe(&err));
                BrowserStore::Memory(MemoryStore::default())
            }
        }
    }
}

impl KeyValueStore for BrowserStore {
    fn read(&self, key: &str) -> Option<String> {
        match self {
            BrowserStore::Local(storage) => storage.read(key),
            BrowserStore::Memory(memory) => memory.read(key),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SiteError> {
        match self {
            BrowserStore::Local(storage) => storage.write(key, value),
            BrowserStore::Memory(memory) => memory.write(key, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_and_overwrites() {
        let store = MemoryStore::default();
        assert_eq!(store.read("solora-theme"), None);
        store.write("solora-theme", "dark").unwrap();
        store.write("solora-theme", "light").unwrap();
        assert_eq!(store.read("solora-theme").as_deref(), Some("light"));
    }

    #[test]
    fn clones_share_entries() {
        let store = MemoryStore::default();
        let other = store.clone();
        store.write("k", "v").unwrap();
        assert_eq!(other.read("k").as_deref(), Some("v"));
    }
}
