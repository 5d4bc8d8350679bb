use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    api::{ClientConfig, FieldsClient, FieldsService, ReqwestTransport},
    nav::QueryLocation,
    storage::{DraftSlot, FileStore},
};

use super::{options::UiOptions, runtime::App};

const FALLBACK_DRAFT_FILE: &str = "fieldsmith-drafts.json";

#[derive(Debug)]
pub struct FieldBuilderUi {
    client: ClientConfig,
    location: QueryLocation,
    draft_path: Option<PathBuf>,
    options: UiOptions,
}

impl FieldBuilderUi {
    pub fn new(client: ClientConfig) -> Self {
        Self {
            client,
            location: QueryLocation::new(),
            draft_path: None,
            options: UiOptions::default(),
        }
    }

    /// Initial navigation state, e.g. `?formId=12`.
    pub fn with_location(mut self, raw: &str) -> Self {
        self.location = QueryLocation::parse(raw);
        self
    }

    pub fn with_draft_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.draft_path = Some(path.into());
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs the terminal UI and returns the final location.
    pub fn run(self) -> Result<String> {
        let FieldBuilderUi {
            client,
            location,
            draft_path,
            options,
        } = self;

        let transport = ReqwestTransport::new(&client).context("failed to build HTTP client")?;
        let draft_path = draft_path
            .or_else(FileStore::default_location)
            .unwrap_or_else(|| PathBuf::from(FALLBACK_DRAFT_FILE));
        info!(api = %client.base_url, drafts = %draft_path.display(), "starting field builder");

        let service = FieldsService::new(
            FieldsClient::new(transport),
            location,
            DraftSlot::new(FileStore::new(draft_path)),
        );
        App::new(service, options).run()
    }
}
