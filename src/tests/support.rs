use serde_json::{Value, json};

use crate::{
    api::{FieldsClient, FieldsService, ScriptedTransport},
    domain::SelectField,
    nav::QueryLocation,
    storage::{DraftSlot, FIELD_DATA_KEY, MemoryStore},
};

pub(crate) fn service(transport: &ScriptedTransport, location: &str) -> FieldsService {
    service_with_store(transport, location, MemoryStore::new())
}

pub(crate) fn service_with_store(
    transport: &ScriptedTransport,
    location: &str,
    store: MemoryStore,
) -> FieldsService {
    FieldsService::new(
        FieldsClient::new(transport.clone()),
        QueryLocation::parse(location),
        DraftSlot::new(store),
    )
}

pub(crate) fn draft_store(record: &Value) -> MemoryStore {
    MemoryStore::new().with_entry(FIELD_DATA_KEY, record.to_string())
}

pub(crate) fn record(id: &str, label: &str, choices: &[&str]) -> SelectField {
    SelectField {
        id: Some(id.to_string()),
        label: label.to_string(),
        choices: choices.iter().map(|choice| choice.to_string()).collect(),
        ..SelectField::default()
    }
}

pub(crate) fn record_json(id: &str, label: &str, choices: &[&str]) -> Value {
    json!({
        "id": id,
        "label": label,
        "required": false,
        "choices": choices,
        "displayAlpha": false,
        "default": "",
    })
}

pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}
