//! File-backed storage for native builds.
//!
//! Each key maps to `<root>/<key>.json`. The browser boundary uses
//! `localStorage` instead; this backend exists so native tooling and tests
//! can open a persistent store the same way.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{RecordStore, StorageBackend, StoreResult};

/// Directory-of-JSON-files backend.
#[derive(Debug)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Open a backend rooted at `root`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(root: P) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileStorage {
    fn read_key(&self, key: &str) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write_key(&mut self, key: &str, value: &str) -> StoreResult<()> {
        fs::write(self.key_path(key), value)?;
        Ok(())
    }
}

impl RecordStore<FileStorage> {
    /// Open a file-backed store rooted at `root`, creating it if needed.
    pub fn open<P: AsRef<Path>>(root: P) -> StoreResult<Self> {
        Ok(Self::new(FileStorage::open(root)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PatientDraft, Sex};

    fn draft() -> PatientDraft {
        PatientDraft {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            birthdate: "1990-03-14".into(),
            height_cm: 170.0,
            weight_kg: 65.0,
            sex: Sex::Female,
            mobile: "07123456789".into(),
            email: "ada@example.com".into(),
            health_info: None,
        }
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = RecordStore::open(dir.path()).unwrap();
        let added = store.add(draft()).unwrap();

        let reopened = RecordStore::open(dir.path()).unwrap();
        assert_eq!(reopened.load().unwrap(), vec![added]);
    }

    #[test]
    fn test_missing_file_is_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();
        assert_eq!(store.load().unwrap(), vec![]);
    }
}
