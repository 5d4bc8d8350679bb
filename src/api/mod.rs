//! Remote record resource: transport, typed client, query cache and the
//! service that ties them to navigation and the draft slot.

mod cache;
mod client;
mod error;
mod service;
mod transport;

pub use cache::{QueryCache, QueryKey};
pub use client::{FIELDS_PATH, FieldsClient};
pub use error::{ApiError, HttpError};
pub use service::FieldsService;
pub use transport::{
    ApiRequest, ApiResponse, ClientConfig, DEFAULT_API_BASE, Method, RecordedRequest,
    ReqwestTransport, ScriptedTransport, Transport, TransportError,
};
