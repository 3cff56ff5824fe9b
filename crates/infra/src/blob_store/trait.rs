use std::sync::Arc;

use thiserror::Error;

/// Blob store operation error.
///
/// These are **storage errors** (I/O, key shape, lock health) as opposed to
/// document errors (a blob that loads fine but fails to parse belongs to the
/// caller).
#[derive(Debug, Error)]
pub enum BlobStoreError {
    #[error("blob io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid blob key: {0}")]
    InvalidKey(String),

    #[error("blob store lock poisoned")]
    Poisoned,
}

/// Whole-document key-value persistence.
///
/// The store holds at most one document per key and every `save` overwrites
/// it in full; there is no partial update and no append. `load` distinguishes
/// "no document yet" (`Ok(None)`) from a failing backend (`Err`), because the
/// two demand different caller behavior: absence falls back to a default
/// schema, failure must surface.
pub trait BlobStore: Send + Sync {
    /// Read the document stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, BlobStoreError>;

    /// Replace the document stored under `key` with `bytes`.
    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), BlobStoreError>;
}

impl<S> BlobStore for Arc<S>
where
    S: BlobStore + ?Sized,
{
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, BlobStoreError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), BlobStoreError> {
        (**self).save(key, bytes)
    }
}
