//! Single-slot profile storage.
//!
//! The controller depends on `ProfileStore` only. `FileProfileStore` keeps
//! the profile as the same JSON blob a browser keeps under `userInfo`;
//! `MemoryProfileStore` is the in-process fake.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing::{debug, warn};

use crate::workflow::model::ApplicantProfile;

/// Storage key used by the browser client, reused as the default file stem.
pub const PROFILE_KEY: &str = "userInfo";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Profile store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Profile store encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Profile store lock poisoned")]
    Poisoned,
}

/// Whole-record get/set/clear. Partial updates are not expressible.
pub trait ProfileStore: Send + Sync {
    /// Returns the stored profile, or `None` if absent or incomplete.
    fn get(&self) -> Result<Option<ApplicantProfile>, StoreError>;
    fn set(&self, profile: &ApplicantProfile) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    slot: Mutex<Option<ApplicantProfile>>,
}

impl MemoryProfileStore {
    pub fn with_profile(profile: ApplicantProfile) -> Self {
        Self {
            slot: Mutex::new(Some(profile)),
        }
    }
}

impl ProfileStore for MemoryProfileStore {
    fn get(&self) -> Result<Option<ApplicantProfile>, StoreError> {
        let slot = self.slot.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(slot.clone().filter(ApplicantProfile::is_complete))
    }

    fn set(&self, profile: &ApplicantProfile) -> Result<(), StoreError> {
        *self.slot.lock().map_err(|_| StoreError::Poisoned)? = Some(profile.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot.lock().map_err(|_| StoreError::Poisoned)? = None;
        Ok(())
    }
}

/// JSON file holding exactly one profile. Writes go to a sibling temp file
/// and are renamed into place, so readers see the old or the new record.
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    path: PathBuf,
}

impl FileProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/userInfo.json`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{PROFILE_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| PROFILE_KEY.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ProfileStore for FileProfileStore {
    fn get(&self) -> Result<Option<ApplicantProfile>, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        // Loading re-runs `ApplicantProfile::new`: fields are uppercased and
        // a blank field fails the parse.
        match serde_json::from_str::<ApplicantProfile>(&raw) {
            Ok(profile) => {
                debug!("Loaded profile from {}", self.path.display());
                Ok(Some(profile))
            }
            Err(e) => {
                warn!("Ignoring unreadable profile at {}: {e}", self.path.display());
                Ok(None)
            }
        }
    }

    fn set(&self, profile: &ApplicantProfile) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let encoded = serde_json::to_vec(profile)?;
        let temp = self.temp_path();
        {
            let mut file = std::fs::File::create(&temp)?;
            file.write_all(&encoded)?;
            file.sync_all()?;
        }
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
