use std::cell::RefCell;
use std::collections::HashMap;

use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::error::{FeedError, Result};

/// A durable string key-value location that survives page reloads.
pub trait PersistenceSlot {
    /// Returns None if nothing was ever written under `key`.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites whatever is stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

pub(crate) fn js_error_text(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

/// The browser's `window.localStorage`.
pub struct LocalStorageSlot {
    storage: Storage,
}

impl LocalStorageSlot {
    pub fn new(storage: Storage) -> Self {
        LocalStorageSlot { storage }
    }

    pub fn from_window() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| FeedError::PersistenceRead("no window".into()))?;
        let storage = window
            .local_storage()
            .map_err(|err| FeedError::PersistenceRead(js_error_text(&err)))?
            .ok_or_else(|| FeedError::PersistenceRead("localStorage unavailable".into()))?;

        Ok(LocalStorageSlot::new(storage))
    }
}

impl PersistenceSlot for LocalStorageSlot {
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|err| FeedError::PersistenceRead(js_error_text(&err)))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|err| FeedError::Persistence(js_error_text(&err)))
    }
}

/// In-memory slot, used by tests and whenever localStorage is blocked.
#[derive(Default)]
pub struct MemorySlot {
    items: RefCell<HashMap<String, String>>,
    read_only: bool,
}

impl MemorySlot {
    pub fn new() -> Self {
        MemorySlot::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let slot = MemorySlot::new();
        slot.items.borrow_mut().insert(key.to_owned(), value.to_owned());
        slot
    }

    /// A slot that rejects every write, like a full storage quota.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl PersistenceSlot for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if self.read_only {
            return Err(FeedError::Persistence(format!("{} is read-only", key)));
        }
        self.items
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

impl<T: PersistenceSlot + ?Sized> PersistenceSlot for std::rc::Rc<T> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}
