//! Key-value storage primitives.

use std::{collections::HashMap, fs, io::Write, path::PathBuf};

use crate::Error;

/// Atomic get/set of a string value by key.
///
/// This is the boundary to the platform storage. Implementations must make
/// [set](KeyValueStore::set) replace the previous value in one step so a
/// reader never observes a half-written blob.
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` if the key is absent.
    ///
    /// # Errors
    /// This function will return an [Error::Storage] if the underlying
    /// storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Store `value` under `key`, replacing any previous value entirely.
    ///
    /// # Errors
    /// This function will return an [Error::Storage] if the underlying
    /// storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;
}

/// Keeps each key in a file named `<key>.json` under a root directory.
///
/// Writes go to a temporary file in the same directory which is then
/// renamed over the target, so a crash mid-write leaves the previous value
/// intact.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Create a backend that keeps its files under `root`, creating the
    /// directory if it does not exist.
    ///
    /// # Errors
    /// This function will return an [Error::Storage] if the directory
    /// cannot be created.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, Error> {
        let root = root.into();
        fs::create_dir_all(&root)?;

        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        let temp_path = self.root.join(format!(".{key}.json.tmp"));

        let mut file = fs::File::create(&temp_path)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, self.path_for(key))?;

        Ok(())
    }
}

/// An in-memory backend for tests and callers that do not need
/// persistence across runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.entries.insert(key.to_string(), value.to_string());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{FileBackend, KeyValueStore, MemoryBackend};

    #[test]
    fn file_backend_returns_none_for_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path()).unwrap();

        assert_eq!(backend.get("expenses").unwrap(), None);
    }

    #[test]
    fn file_backend_round_trips_a_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path()).unwrap();

        backend.set("expenses", "[]").unwrap();

        assert_eq!(backend.get("expenses").unwrap(), Some("[]".to_string()));
    }

    #[test]
    fn file_backend_set_replaces_prior_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path()).unwrap();

        backend.set("expenses", "first").unwrap();
        backend.set("expenses", "second").unwrap();

        assert_eq!(backend.get("expenses").unwrap(), Some("second".to_string()));
    }

    #[test]
    fn file_backend_values_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();

        let mut backend = FileBackend::new(dir.path()).unwrap();
        backend.set("expenses", "[1]").unwrap();

        let reopened = FileBackend::new(dir.path()).unwrap();
        assert_eq!(reopened.get("expenses").unwrap(), Some("[1]".to_string()));
    }

    #[test]
    fn memory_backend_round_trips_a_value() {
        let mut backend = MemoryBackend::new();

        assert_eq!(backend.get("expenses").unwrap(), None);

        backend.set("expenses", "[]").unwrap();

        assert_eq!(backend.get("expenses").unwrap(), Some("[]".to_string()));
    }
}
