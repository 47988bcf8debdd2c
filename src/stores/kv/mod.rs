//! A key-value backed expense store.
//!
//! The whole collection is serialized as a single JSON blob kept under
//! [STORAGE_KEY]. [KeyValueStore] abstracts the storage primitive (atomic
//! get/set of a string by key) the way a mobile platform exposes it;
//! [KvExpenseStore] layers the blob codec and the CRUD operations on top.

mod backend;
mod expense;

pub use backend::{FileBackend, KeyValueStore, MemoryBackend};
pub use expense::{KvExpenseStore, STORAGE_KEY};
