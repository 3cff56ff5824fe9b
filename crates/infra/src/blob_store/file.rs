use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use super::r#trait::{BlobStore, BlobStoreError};

/// File-backed blob store: one document per key under a root directory,
/// stored as `<root>/<key>.json`.
///
/// Saves write a temporary file in the same directory and rename it over the
/// target, so a crash mid-write never leaves a torn document behind.
#[derive(Debug)]
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, BlobStoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn document_path(&self, key: &str) -> Result<PathBuf, BlobStoreError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

/// Keys name files directly, so they must not be empty or reach outside the
/// root directory.
fn validate_key(key: &str) -> Result<(), BlobStoreError> {
    if key.is_empty() || key == "." || key == ".." {
        return Err(BlobStoreError::InvalidKey(format!("unusable key {key:?}")));
    }
    if key.contains(['/', '\\']) {
        return Err(BlobStoreError::InvalidKey(format!(
            "key must not contain path separators: {key:?}"
        )));
    }
    Ok(())
}

impl BlobStore for FileBlobStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, BlobStoreError> {
        let path = self.document_path(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), BlobStoreError> {
        let path = self.document_path(key)?;
        let tmp = self.root.join(format!(".{key}.tmp"));
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(bytes)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;
        debug!(key, len = bytes.len(), "blob saved");
        Ok(())
    }
}
