use crate::store::StoreError;

use lambda_http::http;
use thiserror::Error;

/// Failures a request can surface.
///
/// Every variant maps to a distinguishable status code through
/// [`Error::status`]; nothing is logged-and-swallowed into a success
/// envelope.
#[derive(Debug, Error)]
pub enum Error {
    /// The request body was not valid JSON of the expected shape.
    #[error("invalid request body: {0}")]
    InvalidBody(#[source] serde_json::Error),
    /// A required query parameter was absent.
    #[error("missing required parameter `{0}`")]
    MissingParameter(&'static str),
    /// No product exists under the requested identifier.
    #[error("product not found")]
    NotFound,
    /// The full-collection scan exceeded its page bound.
    #[error("collection scan exceeded {0} pages")]
    ScanOverflow(usize),
    /// A store call failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// A response could not be constructed.
    #[error("failed to build response: {0}")]
    Http(#[from] http::Error),
    /// A response payload could not be serialized.
    #[error("failed to encode response body: {0}")]
    EncodeBody(#[source] serde_json::Error),
}

impl Error {
    /// The status code this failure maps to.
    pub fn status(&self) -> http::StatusCode {
        match self {
            Self::InvalidBody(_) | Self::MissingParameter(_) => http::StatusCode::BAD_REQUEST,
            Self::NotFound => http::StatusCode::NOT_FOUND,
            Self::ScanOverflow(_) | Self::Store(_) | Self::Http(_) | Self::EncodeBody(_) => {
                http::StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
