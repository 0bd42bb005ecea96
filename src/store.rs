//! Persisted set of incident ids that have already been pushed.
//!
//! The file is a JSON array of strings. Files written by the earlier
//! notifier, an array of `{alert_info, alert_type, alert_time}` objects, are
//! still readable and are rewritten in the new shape on the next save.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::incident_id;
use crate::error::StoreError;

#[derive(Debug, Clone)]
pub struct IdentifierStore {
    path: PathBuf,
    ids: HashSet<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredEntry {
    Id(String),
    Legacy { alert_info: String, alert_time: String },
}

impl StoredEntry {
    fn into_id(self) -> String {
        match self {
            StoredEntry::Id(id) => id,
            StoredEntry::Legacy {
                alert_info,
                alert_time,
            } => incident_id(&alert_time, &alert_info),
        }
    }
}

impl IdentifierStore {
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ids: HashSet::new(),
        }
    }

    /// Missing file loads as an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No store at {:?}, starting empty", path);
                return Ok(Self::empty(path));
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let entries: Vec<StoredEntry> = match serde_json::from_str(&text) {
            Ok(entries) => entries,
            Err(source) => return Err(StoreError::Corrupt { path, source }),
        };

        let ids = entries.into_iter().map(StoredEntry::into_id).collect();
        Ok(Self { path, ids })
    }

    /// Like `load`, but an unreadable file resets to an empty store.
    pub fn load_or_reset(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::load(&path) {
            Ok(store) => store,
            Err(e) => {
                warn!("⚠️  {} - starting with an empty store", e);
                Self::empty(path)
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Returns false if the id was already present.
    pub fn add(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites the file via a temporary sibling and a rename.
    pub fn save(&self) -> Result<(), StoreError> {
        let mut sorted: Vec<&String> = self.ids.iter().collect();
        sorted.sort();
        let json = serde_json::to_string_pretty(&sorted)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let tmp = tmp_path(&self.path);
        fs::write(&tmp, json).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!("Saved {} ids to {:?}", self.ids.len(), self.path);
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
