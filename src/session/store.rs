//! Persisted key-value slots that survive restarts: the access token and the
//! preferred locale.

use std::{
    collections::BTreeMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};
use thiserror::Error;
use tracing::debug;

pub const ACCESS_TOKEN_SLOT: &str = "access_token";
pub const LOCALE_SLOT: &str = "locale";

const CREDENTIALS_FILE: &str = "credentials.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt credential file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub trait CredentialStore: Send + Sync {
    /// # Errors
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, slot: &str) -> Result<Option<String>, StoreError>;

    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, slot: &str, value: &str) -> Result<(), StoreError>;

    /// Removing an absent slot is not an error.
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn remove(&self, slot: &str) -> Result<(), StoreError>;
}

/// In-process store; nothing outlives the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, slot: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(slot)
            .cloned())
    }

    fn set(&self, slot: &str, value: &str) -> Result<(), StoreError> {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(slot.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<(), StoreError> {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(slot);
        Ok(())
    }
}

/// JSON object in `<dir>/credentials.json`. Every write replaces the file
/// through a temporary sibling so a crash never leaves a truncated file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(CREDENTIALS_FILE),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(BTreeMap::new());
        }
        serde_json::from_slice(&raw).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, slots: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| StoreError::Io { path, source }
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err(parent))?;
        }

        let contents = serde_json::to_vec_pretty(slots).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp).map_err(io_err(&tmp))?;
        restrict_permissions(&tmp)?;
        file.write_all(&contents).map_err(io_err(&tmp))?;
        file.sync_all().map_err(io_err(&tmp))?;
        drop(file);

        fs::rename(&tmp, &self.path).map_err(io_err(&self.path))?;
        debug!("credential store written: {}", self.path.display());
        Ok(())
    }

    fn update<F>(&self, change: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut slots = self.load()?;
        if change(&mut slots) {
            self.save(&slots)?;
        }
        Ok(())
    }
}

impl CredentialStore for FileStore {
    fn get(&self, slot: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.load()?.remove(slot))
    }

    fn set(&self, slot: &str, value: &str) -> Result<(), StoreError> {
        self.update(|slots| {
            slots.insert(slot.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, slot: &str) -> Result<(), StoreError> {
        self.update(|slots| slots.remove(slot).is_some())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|source| {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn memory_store_round_trip() -> Result<()> {
        let store = MemoryStore::new();
        assert_eq!(store.get(ACCESS_TOKEN_SLOT)?, None);
        store.set(ACCESS_TOKEN_SLOT, "tok")?;
        assert_eq!(store.get(ACCESS_TOKEN_SLOT)?.as_deref(), Some("tok"));
        store.remove(ACCESS_TOKEN_SLOT)?;
        store.remove(ACCESS_TOKEN_SLOT)?;
        assert_eq!(store.get(ACCESS_TOKEN_SLOT)?, None);
        Ok(())
    }

    #[test]
    fn file_store_persists_across_instances() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let nested = dir.path().join("state");

        let store = FileStore::new(&nested);
        assert_eq!(store.get(LOCALE_SLOT)?, None);
        store.set(ACCESS_TOKEN_SLOT, "tok")?;
        store.set(LOCALE_SLOT, "fr")?;

        let reopened = FileStore::new(&nested);
        assert_eq!(reopened.get(ACCESS_TOKEN_SLOT)?.as_deref(), Some("tok"));
        assert_eq!(reopened.get(LOCALE_SLOT)?.as_deref(), Some("fr"));

        reopened.remove(ACCESS_TOKEN_SLOT)?;
        assert_eq!(store.get(ACCESS_TOKEN_SLOT)?, None);
        assert_eq!(store.get(LOCALE_SLOT)?.as_deref(), Some("fr"));
        assert!(!nested.join("credentials.json.tmp").exists());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn file_store_is_owner_only() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir()?;
        let store = FileStore::new(dir.path());
        store.set(ACCESS_TOKEN_SLOT, "tok")?;
        let mode = fs::metadata(store.path())?.permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        Ok(())
    }

    #[test]
    fn file_store_reports_corrupt_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join(CREDENTIALS_FILE), "not json")?;
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.get(ACCESS_TOKEN_SLOT),
            Err(StoreError::Corrupt { .. })
        ));
        Ok(())
    }
}
