//! The document-store seam.
//!
//! The gateway depends on five store primitives only: point get, overwrite
//! put, single-field update, delete, and a paginated full-collection scan.
//! [`ProductStore`] captures exactly that surface so the router and operation
//! functions never touch an SDK type, and tests can substitute a fake store
//! for the real table.

/// DynamoDB implementation of [`ProductStore`].
pub mod dynamo;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;
use serde_json::Value;
use std::collections;
use thiserror::Error;

/// The partition key attribute identifying a product.
pub const PARTITION_KEY: &str = "productId";

/// A schema-less product document.
///
/// The store never inspects fields other than [`PARTITION_KEY`]; everything
/// else is opaque caller-supplied data.
pub type Document = serde_json::Map<String, Value>;

/// Opaque continuation token returned by a paginated scan.
///
/// Carrying the token of one page into the next scan call resumes the scan
/// where it left off; absence signals exhaustion.
pub type ScanKey = collections::HashMap<String, Value>;

/// One page of a full-collection scan.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScanPage {
    /// The documents returned by this page, in store order.
    pub items: Vec<Document>,
    /// Continuation token for the next page, if more results exist.
    pub next: Option<ScanKey>,
}

/// A single-field assignment applied by the partial-update operation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldSet {
    /// The attribute name to assign.
    pub name: String,
    /// The new value.
    pub value: Value,
}

/// Failures raised by a store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A document or key could not be converted to or from store attributes.
    #[error("attribute conversion failed: {0}")]
    Codec(#[from] serde_dynamo::Error),
    /// A store call failed.
    #[error("{operation} call failed: {source}")]
    Request {
        /// The store operation that failed.
        operation: &'static str,
        /// The underlying failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl StoreError {
    /// Wrap an operation failure, tagging it with the operation name.
    pub(crate) fn request<E>(operation: &'static str) -> impl FnOnce(E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        move |source| Self::Request {
            operation,
            source: Box::new(source),
        }
    }
}

/// The store primitives the gateway is built on.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Point lookup by partition key.
    async fn get(&self, product_id: &str) -> Result<Option<Document>, StoreError>;

    /// Unconditional overwrite of the document sharing the item's key.
    async fn put(&self, item: Document) -> Result<(), StoreError>;

    /// Apply a single-field assignment and return the updated attributes.
    async fn update(&self, product_id: &str, set: FieldSet) -> Result<Document, StoreError>;

    /// Delete by partition key, returning the previous value if one existed.
    async fn delete(&self, product_id: &str) -> Result<Option<Document>, StoreError>;

    /// Fetch one page of the full-collection scan, resuming from `start_key`.
    async fn scan(&self, start_key: Option<ScanKey>) -> Result<ScanPage, StoreError>;
}
