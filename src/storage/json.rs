//! JSON file-based storage backend.
//!
//! Contacts are kept in a single human-readable JSON file. Writes go to a
//! temporary sibling first and are then renamed over the target, so a crash never
//! leaves a half-written file behind.
//!
//! # Performance Characteristics
//!
//! - **Read**: loads the entire file on open and on every clean `load_contacts`
//! - **Write**: serializes and writes the entire collection
//! - **Best for**: a few thousand contacts, one write per user action

use crate::domain::error::{ContactbookError, Result};
use crate::domain::Contact;
use crate::storage::backend::ContactStorage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const FORMAT_VERSION: u32 = 1;

/// On-disk container format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format.
    version: u32,

    /// Unix timestamp of the last successful save.
    #[serde(default)]
    saved_at: i64,

    /// Contacts in collection order.
    #[serde(default)]
    contacts: Vec<Contact>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            saved_at: 0,
            contacts: Vec::new(),
        }
    }
}

/// JSON file storage backend.
///
/// The whole collection is cached in memory and written back on every change.
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`; the runtime drives it from one thread.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "saved_at": 1718000000,
///   "contacts": [
///     { "id": "1", "name": "John Smith", "city": "New York" }
///   ]
/// }
/// ```
pub struct JsonStorage {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory copy of the file.
    data: StorageData,

    /// Set when `data` holds changes the file does not have yet.
    dirty: bool,
}

impl JsonStorage {
    /// Opens the JSON file at `file_path`, or starts empty if it does not exist.
    ///
    /// Parent directories are created automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - File permissions prevent reading
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = Self::read_or_default(&file_path)?;

        tracing::debug!(contact_count = data.contacts.len(), "storage initialized");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Reads the file, or returns empty data if it does not exist.
    fn read_or_default(path: &Path) -> Result<StorageData> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("no contacts file yet, starting empty");
            Ok(StorageData::default())
        }
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| ContactbookError::Storage(format!("failed to parse JSON: {e}")))?;

        if data.version != FORMAT_VERSION {
            return Err(ContactbookError::Storage(format!(
                "unsupported storage version {}",
                data.version
            )));
        }

        tracing::debug!(
            version = data.version,
            saved_at = data.saved_at,
            contacts = data.contacts.len(),
            "loaded storage data"
        );

        Ok(data)
    }

    /// Writes pending changes to disk (temp file, then rename).
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        self.data.saved_at = chrono::Utc::now().timestamp();

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| ContactbookError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "storage saved");
        Ok(())
    }
}

impl ContactStorage for JsonStorage {
    fn load_contacts(&mut self) -> Result<Vec<Contact>> {
        let _span = tracing::debug_span!("json_load_contacts").entered();

        if self.dirty {
            tracing::debug!("unsaved changes pending, serving cached contacts");
        } else {
            self.data = Self::read_or_default(&self.file_path)?;
        }

        Ok(self.data.contacts.clone())
    }

    fn save_contacts(&mut self, contacts: &[Contact]) -> Result<()> {
        let _span = tracing::debug_span!("json_save_contacts", count = contacts.len()).entered();

        if !self.dirty && self.data.contacts == contacts {
            tracing::trace!("contacts unchanged");
            return Ok(());
        }

        contacts.clone_into(&mut self.data.contacts);
        self.dirty = true;
        self.save_to_file()
    }
}

impl Drop for JsonStorage {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty data on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Vec<Contact> {
        vec![
            Contact::with_id("1", "Alice", "Mexico"),
            Contact::with_id("2", "Bob", "Glasgow"),
        ]
    }

    #[test]
    fn missing_file_starts_empty_and_creates_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("contacts.json");

        let mut storage = JsonStorage::new(path.clone()).unwrap();

        assert!(storage.load_contacts().unwrap().is_empty());
        assert!(path.parent().unwrap().is_dir());
        assert!(!path.exists());
    }

    #[test]
    fn saved_contacts_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contacts.json");

        {
            let mut storage = JsonStorage::new(path.clone()).unwrap();
            storage.save_contacts(&sample()).unwrap();
        }

        let mut storage = JsonStorage::new(path.clone()).unwrap();
        assert_eq!(storage.load_contacts().unwrap(), sample());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn load_reads_changes_from_other_writers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contacts.json");

        let mut reader = JsonStorage::new(path.clone()).unwrap();
        let mut writer = JsonStorage::new(path.clone()).unwrap();
        writer.save_contacts(&sample()).unwrap();

        assert_eq!(reader.load_contacts().unwrap(), sample());

        std::fs::remove_file(&path).unwrap();
        assert!(reader.load_contacts().unwrap().is_empty());
    }

    #[test]
    fn file_uses_versioned_container() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contacts.json");

        let mut storage = JsonStorage::new(path.clone()).unwrap();
        storage.save_contacts(&sample()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["version"], 1);
        assert!(raw["saved_at"].as_i64().unwrap() > 0);
        assert_eq!(raw["contacts"][1]["name"], "Bob");
    }

    #[test]
    fn unchanged_contacts_are_not_rewritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contacts.json");

        let mut storage = JsonStorage::new(path.clone()).unwrap();
        storage.save_contacts(&[]).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn invalid_json_is_a_storage_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonStorage::new(path).err().unwrap();
        assert!(matches!(err, ContactbookError::Storage(_)));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        std::fs::write(&path, r#"{"version": 7, "contacts": []}"#).unwrap();

        assert!(matches!(
            JsonStorage::new(path),
            Err(ContactbookError::Storage(_))
        ));
    }
}
