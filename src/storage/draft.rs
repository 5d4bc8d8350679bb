use tracing::{debug, warn};

use crate::domain::SelectField;

use super::store::{KeyValueStore, StorageError};

pub const FIELD_DATA_KEY: &str = "FIELD_DATA_KEY";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftRead {
    pub data: Option<SelectField>,
    pub is_error: bool,
}

/// The single local slot holding an unsaved record.
pub struct DraftSlot {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl std::fmt::Debug for DraftSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DraftSlot").field("key", &self.key).finish()
    }
}

impl DraftSlot {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            key: FIELD_DATA_KEY.to_string(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// A failed or corrupt read reports `is_error` and no data; callers treat
    /// it as "no draft".
    pub fn read(&self) -> DraftRead {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return DraftRead::default(),
            Err(err) => {
                warn!(key = %self.key, error = %err, "draft slot unreadable");
                return DraftRead {
                    data: None,
                    is_error: true,
                };
            }
        };
        match serde_json::from_str::<SelectField>(&raw) {
            Ok(record) => DraftRead {
                data: Some(record),
                is_error: false,
            },
            Err(err) => {
                warn!(key = %self.key, error = %err, "draft slot holds invalid JSON");
                DraftRead {
                    data: None,
                    is_error: true,
                }
            }
        }
    }

    pub fn write(&mut self, record: &SelectField) -> Result<(), StorageError> {
        let payload = serde_json::to_string(record)?;
        debug!(key = %self.key, "writing draft");
        self.store.set(&self.key, payload)
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        debug!(key = %self.key, "clearing draft");
        self.store.remove(&self.key)
    }
}
