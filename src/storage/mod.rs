//! Best-effort persistence for the match.
//!
//! A [`Store`] is a plain string key/value space (a directory of JSON files
//! by default, a map in tests). [`MatchStore`] layers
//! the match schema and legacy-key fallback on top of it.

pub mod schema;

use crate::error::{ScoreError, ScoreResult};
use crate::game::MatchState;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub use self::schema::{LOAD_ORDER, STORAGE_KEY};

pub trait Store {
    fn get(&self, key: &str) -> ScoreResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> ScoreResult<()>;
}

/// One `<key>.json` file per key under `root`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> ScoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ScoreError::Io(e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> ScoreResult<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// In-memory store. `read_only` simulates a full or blocked storage backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_only() -> Self {
        Self {
            entries: HashMap::new(),
            read_only: true,
        }
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> ScoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> ScoreResult<()> {
        if self.read_only {
            return Err(ScoreError::PersistenceUnavailable(format!(
                "store is read-only, cannot write '{}'",
                key
            )));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Match persistence gateway.
pub struct MatchStore<S: Store> {
    store: S,
}

impl<S: Store> MatchStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Walks [`LOAD_ORDER`] and returns the first readable match, upgraded to
    /// the current shape. Unreadable or malformed entries count as absent.
    pub fn load(&self) -> Option<MatchState> {
        for key in LOAD_ORDER {
            let raw = match self.store.get(key) {
                Ok(Some(raw)) => raw,
                Ok(None) => continue,
                Err(e) => {
                    warn!("Could not read '{}': {}", key, e);
                    continue;
                }
            };

            match schema::decode(&raw) {
                Ok(state) => {
                    info!("Loaded saved match from '{}'", key);
                    return Some(state);
                }
                Err(e) => warn!("Ignoring saved match under '{}': {}", key, e),
            }
        }
        debug!("No saved match found");
        None
    }

    /// Writes the current shape under [`STORAGE_KEY`].
    pub fn save(&mut self, state: &MatchState) -> ScoreResult<()> {
        let encoded = schema::encode(state)?;
        self.store
            .set(STORAGE_KEY, &encoded)
            .map_err(|e| match e {
                ScoreError::PersistenceUnavailable(_) => e,
                other => ScoreError::PersistenceUnavailable(other.to_string()),
            })
    }
}
