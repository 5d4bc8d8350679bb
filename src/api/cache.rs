use std::collections::HashMap;

use crate::domain::SelectField;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    List,
    Record(String),
}

#[derive(Debug, Clone)]
enum Cached {
    List(Vec<SelectField>),
    Record(SelectField),
}

/// Query results that never go stale on their own; only invalidation drops them.
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, Cached>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn list(&self) -> Option<&[SelectField]> {
        match self.entries.get(&QueryKey::List) {
            Some(Cached::List(records)) => Some(records),
            _ => None,
        }
    }

    pub fn record(&self, id: &str) -> Option<&SelectField> {
        match self.entries.get(&QueryKey::Record(id.to_string())) {
            Some(Cached::Record(record)) => Some(record),
            _ => None,
        }
    }

    pub fn store_list(&mut self, records: Vec<SelectField>) {
        self.entries.insert(QueryKey::List, Cached::List(records));
    }

    pub fn store_record(&mut self, id: &str, record: SelectField) {
        self.entries
            .insert(QueryKey::Record(id.to_string()), Cached::Record(record));
    }

    pub fn invalidate(&mut self, key: &QueryKey) -> bool {
        self.entries.remove(key).is_some()
    }
}
