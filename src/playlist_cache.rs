//! Session-scoped read-through cache of the user's playlists.
//!
//! Entries never expire and are not refreshed after a playlist changes.

use crate::api::JspfObject;
use crate::error::StorageError;
use crate::session_store::SessionStore;

pub const PLAYLISTS_CACHE_KEY: &str = "listenbrainz_playlists";

#[derive(Debug)]
pub enum CacheRead {
    Hit(Vec<JspfObject>),
    Miss,
    Corrupt(serde_json::Error),
}

pub struct PlaylistCache<'a> {
    store: &'a dyn SessionStore,
}

impl<'a> PlaylistCache<'a> {
    pub fn new(store: &'a dyn SessionStore) -> Self {
        Self { store }
    }

    pub fn read(&self) -> CacheRead {
        let Some(raw) = self.store.get_item(PLAYLISTS_CACHE_KEY) else {
            return CacheRead::Miss;
        };
        if raw.is_empty() {
            return CacheRead::Miss;
        }
        match serde_json::from_str::<Vec<JspfObject>>(&raw) {
            Ok(playlists) => CacheRead::Hit(playlists),
            Err(err) => CacheRead::Corrupt(err),
        }
    }

    pub fn write(&self, playlists: &[JspfObject]) -> Result<(), StorageError> {
        let encoded =
            serde_json::to_string(playlists).map_err(|e| StorageError::Encode(e.to_string()))?;
        self.store.set_item(PLAYLISTS_CACHE_KEY, &encoded)
    }
}
