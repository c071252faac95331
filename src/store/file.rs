use crate::error::{SlipError, SlipResult};
use crate::store::SlipStore;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::info;

/// File-backed slip store: one file per key under a configured directory.
///
/// The durable counterpart of the browser's local storage in the original
/// platform. Writes are plain whole-file replacements; the manager does
/// not require transactional coupling between its in-memory state and the
/// store.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`, creating the directory if needed
    pub fn new(dir: PathBuf) -> SlipResult<Self> {
        fs::create_dir_all(&dir)
            .map_err(|e| SlipError::Storage(format!("Failed to create store directory: {}", e)))?;

        info!("Slip store initialized: {:?}", dir);

        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl SlipStore for FileStore {
    fn get(&self, key: &str) -> SlipResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SlipError::Storage(format!(
                "Failed to read key {}: {}",
                key, e
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> SlipResult<()> {
        fs::write(self.path_for(key), value).map_err(|e| {
            SlipError::Storage(format!("Failed to write key {}: {}", key, e))
        })
    }
}
