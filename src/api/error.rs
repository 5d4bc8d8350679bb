use thiserror::Error;

use super::transport::TransportError;

/// A response outside the success range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status} - {status_text}")]
pub struct HttpError {
    pub status: u16,
    pub status_text: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http(err) => Some(err.status),
            _ => None,
        }
    }
}
