#![deny(rust_2018_idioms)]

pub mod api;
pub mod domain;
pub mod form;
pub mod list;
pub mod nav;
pub mod storage;

mod app;
mod presentation;

pub use app::{FieldBuilderUi, UiOptions};

pub mod prelude {
    pub use super::{
        FieldBuilderUi, UiOptions,
        api::{ClientConfig, FieldsClient, FieldsService},
        domain::SelectField,
        form::{ChoiceLimits, ChoiceListEditor, RecordEditor},
        nav::QueryLocation,
        storage::{DraftSlot, FileStore, MemoryStore},
    };
}

#[cfg(test)]
mod tests;
