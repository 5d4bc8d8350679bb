use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::SelectField;

use super::{
    error::{ApiError, HttpError},
    transport::{ApiRequest, Method, Transport},
};

pub const FIELDS_PATH: &str = "/fields";

/// Bytes a single path segment cannot carry as-is. Unreserved characters such
/// as `-`, `.`, `_` and `~` pass through.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Typed access to the `/fields` resource. Nothing is retried.
pub struct FieldsClient {
    transport: Box<dyn Transport>,
}

impl FieldsClient {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    pub fn list(&self) -> Result<Vec<SelectField>, ApiError> {
        self.request(Method::Get, FIELDS_PATH.to_string(), None)
    }

    /// Missing choices come back as an empty list.
    pub fn get_by_id(&self, id: &str) -> Result<SelectField, ApiError> {
        self.request(Method::Get, record_path(id), None)
    }

    /// POST for records without an id, PUT to the record path otherwise.
    pub fn upsert(&self, record: &SelectField) -> Result<SelectField, ApiError> {
        let body = serde_json::to_string(record)?;
        match record.id.as_deref() {
            Some(id) => self.request(Method::Put, record_path(id), Some(body)),
            None => self.request(Method::Post, FIELDS_PATH.to_string(), Some(body)),
        }
    }

    pub fn delete_by_id(&self, id: &str) -> Result<Value, ApiError> {
        self.request(Method::Delete, record_path(id), None)
    }

    fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: String,
        body: Option<String>,
    ) -> Result<T, ApiError> {
        let request = ApiRequest { method, path, body };
        let response = self.transport.send(&request)?;
        if !response.is_success() {
            warn!(
                method = %request.method,
                path = %request.path,
                status = response.status,
                "request rejected"
            );
            return Err(HttpError {
                status: response.status,
                status_text: response.status_text,
            }
            .into());
        }
        debug!(method = %request.method, path = %request.path, status = response.status, "request succeeded");
        let body = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        Ok(serde_json::from_str(body)?)
    }
}

pub(super) fn record_path(id: &str) -> String {
    format!("{FIELDS_PATH}/{}", utf8_percent_encode(id, PATH_SEGMENT))
}
