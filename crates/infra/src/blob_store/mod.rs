//! Whole-document blob persistence boundary.
//!
//! This module defines a storage-agnostic abstraction for loading and saving
//! one serialized dataset document per key, without making any assumptions
//! about the backend.

pub mod file;
pub mod in_memory;
pub mod r#trait;

pub use file::FileBlobStore;
pub use in_memory::MemoryBlobStore;
pub use r#trait::{BlobStore, BlobStoreError};
