use std::collections::HashMap;
use std::sync::RwLock;

use super::r#trait::{BlobStore, BlobStoreError};

/// In-memory blob store.
///
/// Intended for tests/dev. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, BlobStoreError> {
        let blobs = self.blobs.read().map_err(|_| BlobStoreError::Poisoned)?;
        Ok(blobs.get(key).cloned())
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), BlobStoreError> {
        let mut blobs = self.blobs.write().map_err(|_| BlobStoreError::Poisoned)?;
        blobs.insert(key.to_owned(), bytes.to_vec());
        Ok(())
    }
}
