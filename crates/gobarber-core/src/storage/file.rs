//! File-backed key-value store.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{KeyValueStore, StorageError, StorageResult};

/// Current version of the session file format.
const SESSION_FILE_VERSION: &str = "1.0";

/// Session file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionFile {
    /// Version of the session file format.
    version: String,
    /// Stored string values by key.
    #[serde(default)]
    values: BTreeMap<String, String>,
}

impl Default for SessionFile {
    fn default() -> Self {
        Self { version: SESSION_FILE_VERSION.to_string(), values: BTreeMap::new() }
    }
}

/// Stores values in a JSON file.
///
/// The file is created on first write with permissions 0600 and its parent
/// directory with 0700 on unix. Every operation reads the file afresh, so two
/// stores pointing at the same path see each other's writes.
///
/// # Examples
///
/// ```no_run
/// use gobarber_core::storage::{FileStore, KeyValueStore};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = FileStore::with_path("/tmp/gobarber/session.json".into());
/// store.set("@GoBarber:token", "abc")?;
/// assert_eq!(store.get("@GoBarber:token")?, Some("abc".to_string()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FileStore {
    file_path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Creates a store backed by the file at `path`.
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { file_path: path, lock: Mutex::new(()) }
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Ensures the parent directory exists with proper permissions.
    fn ensure_parent_dir(&self) -> StorageResult<()> {
        let Some(dir) = self.file_path.parent() else {
            return Ok(());
        };
        if dir.as_os_str().is_empty() {
            return Ok(());
        }

        if !dir.exists() {
            fs::create_dir_all(dir)?;

            // Set directory permissions to 0700 (rwx------)
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
            }
        }

        Ok(())
    }

    /// Loads the session file, or an empty one if the file does not exist.
    fn load(&self) -> StorageResult<SessionFile> {
        if !self.file_path.exists() {
            return Ok(SessionFile::default());
        }

        let contents = fs::read_to_string(&self.file_path)?;
        if contents.trim().is_empty() {
            return Ok(SessionFile::default());
        }

        Ok(serde_json::from_str(&contents)?)
    }

    /// Saves the session file with owner-only permissions.
    fn save(&self, file: &SessionFile) -> StorageResult<()> {
        self.ensure_parent_dir()?;

        let json = serde_json::to_string_pretty(file)?;
        fs::write(&self.file_path, json)?;

        // Set file permissions to 0600 (rw-------)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.file_path, fs::Permissions::from_mode(0o600))?;
        }

        debug!(path = %self.file_path.display(), "Saved session file");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(self.load()?.values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut file = self.load()?;
        file.values.insert(key.to_string(), value.to_string());
        self.save(&file)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut file = self.load()?;
        if file.values.remove(key).is_none() {
            return Ok(());
        }
        self.save(&file)
    }
}
