use std::{
    cell::RefCell,
    collections::VecDeque,
    fmt,
    rc::Rc,
    time::Duration,
};

use reqwest::blocking::Client;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_API_BASE: &str = "http://localhost:3000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base, starting with `/`.
    pub path: String,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|code| code.canonical_reason())
                .unwrap_or_default()
                .to_string(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("no response scripted for {method} {path}")]
    Unscripted { method: Method, path: String },
}

pub trait Transport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// `None` keeps the HTTP client's own default.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!(method = %request.method, %url, "sending request");
        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };
        let builder = match &request.body {
            Some(body) => builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body.clone()),
            None => builder,
        };
        let response = builder.send()?;
        let status = response.status();
        let body = response.text()?;
        Ok(ApiResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

#[derive(Default)]
struct Script {
    responses: VecDeque<(Method, String, ApiResponse)>,
    requests: Vec<RecordedRequest>,
}

/// Replays canned responses in order and records every request it sees.
/// Clones share the same script, so a test can keep a handle after moving the
/// transport into a client.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Rc<RefCell<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(
        &self,
        method: Method,
        path: impl Into<String>,
        status: u16,
        body: serde_json::Value,
    ) -> &Self {
        self.script.borrow_mut().responses.push_back((
            method,
            path.into(),
            ApiResponse::new(status, body.to_string()),
        ));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.script.borrow().requests.clone()
    }

    pub fn pending(&self) -> usize {
        self.script.borrow().responses.len()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut script = self.script.borrow_mut();
        script.requests.push(RecordedRequest {
            method: request.method,
            path: request.path.clone(),
            body: request
                .body
                .as_deref()
                .and_then(|body| serde_json::from_str(body).ok()),
        });
        let position = script
            .responses
            .iter()
            .position(|(method, path, _)| *method == request.method && *path == request.path);
        match position.and_then(|index| script.responses.remove(index)) {
            Some((_, _, response)) => Ok(response),
            None => Err(TransportError::Unscripted {
                method: request.method,
                path: request.path.clone(),
            }),
        }
    }
}
