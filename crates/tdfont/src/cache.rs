//! Caller owned cache of parsed font files.
use std::{
    collections::HashMap,
    hash::Hash,
    path::{Path, PathBuf},
    sync::Arc,
};

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing::debug;

use crate::{error::Result, tdf::FontFile};

type Slot = Arc<OnceCell<Arc<FontFile>>>;

/// Parsed [`FontFile`]s by key. Each key is constructed at most once; callers
/// racing on the same key wait for the first construction and share its
/// result. Failed loads are not stored.
pub struct FontCache<K = PathBuf> {
    slots: Mutex<HashMap<K, Slot>>,
}

impl<K> Default for FontCache<K> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl<K: Eq + Hash + Clone> FontCache<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached file for `key`, calling `loader` for its bytes on
    /// first use.
    pub fn get_or_load<F>(&self, key: &K, loader: F) -> Result<Arc<FontFile>>
    where
        F: FnOnce() -> Result<Vec<u8>>,
    {
        let slot = self.slots.lock().entry(key.clone()).or_default().clone();
        let loaded = slot.get_or_try_init(|| {
            let bytes = loader()?;
            FontFile::from_bytes(&bytes).map(Arc::new)
        });
        match loaded {
            Ok(file) => Ok(Arc::clone(file)),
            Err(err) => {
                let mut slots = self.slots.lock();
                if slots
                    .get(key)
                    .is_some_and(|s| Arc::ptr_eq(s, &slot) && s.get().is_none())
                {
                    slots.remove(key);
                }
                Err(err)
            }
        }
    }

    /// Number of successfully loaded entries.
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|s| s.get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &K) -> bool {
        self.slots
            .lock()
            .get(key)
            .is_some_and(|s| s.get().is_some())
    }

    pub fn clear(&self) {
        self.slots.lock().clear();
    }
}

impl FontCache<PathBuf> {
    /// Loads (once) the font file at `path`.
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<Arc<FontFile>> {
        let path = path.as_ref().to_path_buf();
        self.get_or_load(&path, || {
            debug!(path = %path.display(), "reading font file");
            Ok(std::fs::read(&path)?)
        })
    }
}
