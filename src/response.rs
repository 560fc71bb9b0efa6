//! The uniform response envelope and its wire payloads.
//!
//! Every operation answers with the same shape: a status code, the fixed
//! JSON content type, and a JSON-text body. Write operations wrap their
//! result in [`OperationOutcome`]; the full-collection read wraps its items
//! in [`ProductList`]; error bodies are a bare JSON string.

use crate::error::Error;
use crate::store::Document;

use lambda_http::http::{StatusCode, header};
use lambda_http::{Body, Response};
use serde::Serialize;

/// Wire name of a completed write operation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    /// Create-or-overwrite.
    Save,
    /// Single-field partial update.
    Update,
    /// Removal by key.
    Delete,
}

/// Result wrapper returned by the write operations.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OperationOutcome {
    /// Which operation completed.
    pub operation: Operation,
    /// Fixed success marker.
    pub message: &'static str,
    /// The document the operation acted on or produced.
    pub item: Document,
}

impl OperationOutcome {
    /// Success outcome for `operation` carrying `item`.
    pub fn success(operation: Operation, item: Document) -> Self {
        Self {
            operation,
            message: "SUCCESS",
            item,
        }
    }
}

/// List wrapper returned by the full-collection read.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProductList {
    /// Every document in the collection, in scan order.
    pub products: Vec<Document>,
}

/// Envelope with `status`, the fixed JSON content type, and `payload`
/// serialized as JSON text.
pub fn json<T: Serialize>(status: StatusCode, payload: &T) -> Result<Response<Body>, Error> {
    let body = serde_json::to_string(payload).map_err(Error::EncodeBody)?;
    envelope(status, Body::Text(body))
}

/// Envelope with `status`, the fixed JSON content type, and no body text.
pub fn empty(status: StatusCode) -> Result<Response<Body>, Error> {
    envelope(status, Body::Empty)
}

fn envelope(status: StatusCode, body: Body) -> Result<Response<Body>, Error> {
    let response = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)?;
    Ok(response)
}
