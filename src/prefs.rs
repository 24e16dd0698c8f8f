//! Persisted user preferences
//!
//! Stored as YAML:
//!
//! ```yaml
//! remove-ad-libs: true
//! sync-offsets:
//!   dQw4w9WgXcQ: 0.3
//! ```
//!
//! Offsets are kept per video, since each upload has its own drift against
//! the lyric timestamps.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::TypesyncError;
use crate::sync::SyncOffset;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Preferences {
    pub remove_ad_libs: bool,
    /// Video id to offset. Values are re-clamped and re-rounded on read.
    pub sync_offsets: BTreeMap<String, SyncOffset>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            remove_ad_libs: true,
            sync_offsets: BTreeMap::new(),
        }
    }
}

impl Preferences {
    pub fn from_yaml(source: &str) -> Result<Self, TypesyncError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source).map_err(|e| TypesyncError::PreferencesError(e.to_string()))
    }

    pub fn to_yaml(&self) -> Result<String, TypesyncError> {
        serde_yaml::to_string(self).map_err(|e| TypesyncError::PreferencesError(e.to_string()))
    }

    /// Stored offset for `video_id`, or zero.
    pub fn offset_for(&self, video_id: &str) -> SyncOffset {
        self.sync_offsets.get(video_id).copied().unwrap_or(SyncOffset::ZERO)
    }

    /// Remember `offset` for `video_id`. A zero offset removes the entry.
    pub fn set_offset(&mut self, video_id: &str, offset: SyncOffset) {
        if offset.is_zero() {
            self.sync_offsets.remove(video_id);
        } else {
            self.sync_offsets.insert(video_id.to_string(), offset);
        }
    }
}

pub trait PreferenceStore {
    fn load(&self) -> Result<Preferences, TypesyncError>;
    fn save(&self, preferences: &Preferences) -> Result<(), TypesyncError>;
}

/// Preferences in a YAML file. A missing file reads as the defaults.
#[derive(Debug, Clone)]
pub struct YamlFileStore {
    path: PathBuf,
}

impl YamlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for YamlFileStore {
    fn load(&self) -> Result<Preferences, TypesyncError> {
        match fs::read_to_string(&self.path) {
            Ok(source) => Preferences::from_yaml(&source),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Preferences::default()),
            Err(e) => Err(TypesyncError::PreferencesError(format!(
                "cannot read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    /// Replaces the file atomically; an interrupted save leaves the previous
    /// file in place.
    fn save(&self, preferences: &Preferences) -> Result<(), TypesyncError> {
        let yaml = preferences.to_yaml()?;
        atomic_write(&self.path, &yaml).map_err(|e| {
            TypesyncError::PreferencesError(format!("cannot write {}: {}", self.path.display(), e))
        })
    }
}

fn atomic_write(target: &Path, content: &str) -> io::Result<()> {
    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(content.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(target)?;
    Ok(())
}

/// In-memory store for tests and hosts without persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    stored: RefCell<Option<Preferences>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(preferences: Preferences) -> Self {
        Self {
            stored: RefCell::new(Some(preferences)),
        }
    }

    pub fn stored(&self) -> Option<Preferences> {
        self.stored.borrow().clone()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Result<Preferences, TypesyncError> {
        Ok(self.stored.borrow().clone().unwrap_or_default())
    }

    fn save(&self, preferences: &Preferences) -> Result<(), TypesyncError> {
        *self.stored.borrow_mut() = Some(preferences.clone());
        Ok(())
    }
}
