use serde_json::Value;
use tracing::{info, warn};

use crate::{
    domain::SelectField,
    nav::{FORM_ID_PARAM, Navigation},
    storage::DraftSlot,
};

use super::{
    cache::{QueryCache, QueryKey},
    client::FieldsClient,
    error::ApiError,
};

/// Cached record access plus the side effects a successful save carries:
/// cache invalidation, navigation and draft cleanup.
pub struct FieldsService {
    client: FieldsClient,
    cache: QueryCache,
    navigation: Box<dyn Navigation>,
    drafts: DraftSlot,
}

impl FieldsService {
    pub fn new(
        client: FieldsClient,
        navigation: impl Navigation + 'static,
        drafts: DraftSlot,
    ) -> Self {
        Self {
            client,
            cache: QueryCache::new(),
            navigation: Box::new(navigation),
            drafts,
        }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn navigation(&self) -> &dyn Navigation {
        self.navigation.as_ref()
    }

    pub fn navigation_mut(&mut self) -> &mut dyn Navigation {
        self.navigation.as_mut()
    }

    pub fn drafts(&self) -> &DraftSlot {
        &self.drafts
    }

    pub fn drafts_mut(&mut self) -> &mut DraftSlot {
        &mut self.drafts
    }

    pub fn invalidate(&mut self, key: &QueryKey) -> bool {
        self.cache.invalidate(key)
    }

    pub fn active_id(&self) -> Option<String> {
        self.navigation.get(FORM_ID_PARAM)
    }

    pub fn set_active_id(&mut self, id: Option<&str>) {
        self.navigation.set(FORM_ID_PARAM, id);
    }

    pub fn clear_draft(&mut self) {
        if let Err(err) = self.drafts.clear() {
            warn!(error = %err, "failed to clear draft");
        }
    }

    pub fn list(&mut self) -> Result<Vec<SelectField>, ApiError> {
        if let Some(records) = self.cache.list() {
            return Ok(records.to_vec());
        }
        let records = self.client.list()?;
        self.cache.store_list(records.clone());
        Ok(records)
    }

    pub fn get_by_id(&mut self, id: &str) -> Result<SelectField, ApiError> {
        if let Some(record) = self.cache.record(id) {
            return Ok(record.clone());
        }
        let record = self.client.get_by_id(id)?;
        self.cache.store_record(id, record.clone());
        Ok(record)
    }

    /// Creates or updates `record`. On success the list and record caches are
    /// dropped, the returned id becomes the active one and is handed to
    /// `on_success`, and the draft slot is cleared. A failure changes nothing.
    pub fn save(
        &mut self,
        record: &SelectField,
        on_success: impl FnOnce(&str),
    ) -> Result<SelectField, ApiError> {
        let saved = self.client.upsert(record)?;
        self.cache.invalidate(&QueryKey::List);
        if let Some(id) = record.id.as_deref() {
            self.cache.invalidate(&QueryKey::Record(id.to_string()));
        }
        if let Some(id) = saved.id.as_deref() {
            self.cache.invalidate(&QueryKey::Record(id.to_string()));
        }
        self.navigation.set(FORM_ID_PARAM, saved.id.as_deref());
        match saved.id.as_deref() {
            Some(id) => {
                info!(id, created = record.id.is_none(), "record saved");
                on_success(id);
            }
            None => warn!("save response carried no id"),
        }
        self.clear_draft();
        Ok(saved)
    }

    pub fn delete_by_id(&mut self, id: &str) -> Result<Value, ApiError> {
        let body = self.client.delete_by_id(id)?;
        self.cache.invalidate(&QueryKey::List);
        self.cache.invalidate(&QueryKey::Record(id.to_string()));
        info!(id, "record deleted");
        Ok(body)
    }
}
