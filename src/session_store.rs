//! Per-session string key-value storage.
//!
//! The browser build talks to `window.sessionStorage`; native builds keep the
//! values in memory for the lifetime of the app.

use crate::error::StorageError;
use std::rc::Rc;

pub trait SessionStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Cloneable handle so a store can be provided through context.
#[derive(Clone)]
pub struct SessionHandle(pub Rc<dyn SessionStore>);

impl SessionHandle {
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self(Rc::new(store))
    }

    /// The default backend for the current target.
    pub fn for_platform() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self::new(BrowserSessionStore)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::new(MemorySessionStore::default())
        }
    }

    pub fn store(&self) -> &dyn SessionStore {
        self.0.as_ref()
    }
}

#[cfg(target_arch = "wasm32")]
pub struct BrowserSessionStore;

#[cfg(target_arch = "wasm32")]
impl SessionStore for BrowserSessionStore {
    fn get_item(&self, key: &str) -> Option<String> {
        use gloo_storage::{SessionStorage, Storage};
        SessionStorage::raw().get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        use gloo_storage::{SessionStorage, Storage};
        SessionStorage::raw()
            .set_item(key, value)
            .map_err(|err| StorageError::Write {
                key: key.to_string(),
                reason: format!("{err:?}"),
            })
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Default)]
pub struct MemorySessionStore {
    items: std::sync::Mutex<std::collections::HashMap<String, String>>,
}

#[cfg(not(target_arch = "wasm32"))]
impl SessionStore for MemorySessionStore {
    fn get_item(&self, key: &str) -> Option<String> {
        let items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        items.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
