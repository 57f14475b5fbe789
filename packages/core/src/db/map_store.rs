//! sled-backed map store.
//!
//! Persisted layout (mirrors the two key families the application has always
//! used):
//!
//! - default tree: `map:<id>` → JSON-encoded [`Map`]
//! - `maps:list` tree: `<id>` → JSON-encoded [`MapSummary`]
//!
//! The store is a thin codec over sled; it knows nothing about the
//! summary/document invariant. Keeping the two families consistent is the
//! map service's job.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sled::{Db, Tree};

use crate::db::StoreError;
use crate::models::{Map, MapSummary};

const SUMMARIES_TREE: &str = "maps:list";
const MAP_KEY_PREFIX: &str = "map:";

fn map_key(id: &str) -> String {
    format!("{MAP_KEY_PREFIX}{id}")
}

/// Handle to the embedded key-value store. Cheap to clone; one logical
/// store is shared for the process lifetime.
#[derive(Clone)]
pub struct MapStore {
    db: Arc<Db>,
    summaries: Tree,
    path: PathBuf,
}

impl MapStore {
    /// Open (or create) the store at the given directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let db = sled::open(&path).map_err(|e| StoreError::open_failed(path.clone(), e))?;
        let summaries = db.open_tree(SUMMARIES_TREE)?;

        Ok(Self {
            db: Arc::new(db),
            summaries,
            path,
        })
    }

    /// Filesystem path the store was opened at.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load a full map document, `None` if the key is absent.
    pub fn get_map(&self, id: &str) -> Result<Option<Map>, StoreError> {
        let key = map_key(id);
        match self.db.get(key.as_bytes())? {
            Some(bytes) => {
                let map = serde_json::from_slice(&bytes)
                    .map_err(|e| StoreError::corrupt(key, e))?;
                Ok(Some(map))
            }
            None => Ok(None),
        }
    }

    /// Whether a full document exists for this map id.
    pub fn contains_map(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.db.contains_key(map_key(id).as_bytes())?)
    }

    /// Write a full map document under `map:<id>`.
    pub fn put_map(&self, map: &Map) -> Result<(), StoreError> {
        let key = map_key(&map.id);
        let bytes = serde_json::to_vec(map).map_err(|e| StoreError::encode(key.clone(), e))?;
        self.db.insert(key.as_bytes(), bytes)?;
        Ok(())
    }

    /// Remove a full map document. Returns whether the key existed.
    pub fn delete_map(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.db.remove(map_key(id).as_bytes())?.is_some())
    }

    /// All summaries in store iteration order.
    pub fn list_summaries(&self) -> Result<Vec<MapSummary>, StoreError> {
        let mut summaries = Vec::new();
        for entry in self.summaries.iter() {
            let (key, bytes) = entry?;
            let summary = serde_json::from_slice(&bytes)
                .map_err(|e| StoreError::corrupt(String::from_utf8_lossy(&key), e))?;
            summaries.push(summary);
        }
        Ok(summaries)
    }

    /// Number of summary entries (= number of maps).
    pub fn summary_count(&self) -> usize {
        self.summaries.len()
    }

    /// Whether any map summaries exist. Drives default-map bootstrap: an
    /// empty tree is the sled analogue of the summaries hash never having
    /// been created.
    pub fn has_summaries(&self) -> bool {
        !self.summaries.is_empty()
    }

    /// Write (or overwrite) the summary entry for a map.
    pub fn put_summary(&self, summary: &MapSummary) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(summary)
            .map_err(|e| StoreError::encode(summary.id.clone(), e))?;
        self.summaries.insert(summary.id.as_bytes(), bytes)?;
        Ok(())
    }

    /// Remove the summary entry for a map id. Returns whether it existed.
    pub fn delete_summary(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.summaries.remove(id.as_bytes())?.is_some())
    }

    /// Cheap liveness probe for the health endpoint.
    pub fn ping(&self) -> Result<(), StoreError> {
        self.db.contains_key(b"__ping__")?;
        Ok(())
    }

    /// Flush pending writes to disk. Called on graceful shutdown.
    pub fn flush(&self) -> Result<(), StoreError> {
        self.db.flush()?;
        Ok(())
    }
}

impl std::fmt::Debug for MapStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapStore")
            .field("path", &self.path)
            .field("maps", &self.summaries.len())
            .finish()
    }
}
