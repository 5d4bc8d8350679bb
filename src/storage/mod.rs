mod draft;
mod store;

pub use draft::{DraftRead, DraftSlot, FIELD_DATA_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore, StorageError};
