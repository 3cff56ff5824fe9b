//! `stockbook-infra` — persistence boundary for the dataset document.
//!
//! Nothing here knows what the document contains: the blob store moves
//! opaque bytes under a key; the schema belongs to the store crate.

pub mod blob_store;

pub use blob_store::{BlobStore, BlobStoreError, FileBlobStore, MemoryBlobStore};
