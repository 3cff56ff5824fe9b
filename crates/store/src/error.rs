//! Store-level errors.

use thiserror::Error;

use stockbook_infra::BlobStoreError;

/// Errors surfaced by the store.
///
/// Reads keyed by id never error (unknown ids return `None` or zero-valued
/// stats); everything here concerns the persistence boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The blob backend failed to load or save the document.
    #[error("blob storage failed: {0}")]
    Storage(#[from] BlobStoreError),

    /// A blob exists under the key but does not parse as a dataset. Fatal at
    /// open: silently adopting defaults would overwrite the document on the
    /// next save.
    #[error("persisted dataset is unreadable: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The in-memory dataset failed to serialize.
    #[error("dataset failed to serialize: {0}")]
    Encode(serde_json::Error),
}
