#![deny(missing_docs)]

//! # Product Inventory
//!
//! A serverless CRUD gateway for a product collection stored in DynamoDB.
//!
//! One dispatch function routes each inbound HTTP event to one of five
//! operations by exact match on method and path:
//!
//! | Method | Path        | Operation                                    |
//! |--------|-------------|----------------------------------------------|
//! | GET    | `/health`   | liveness check                               |
//! | GET    | `/product`  | point lookup by `productId` query parameter  |
//! | GET    | `/products` | paginated full-collection read               |
//! | POST   | `/product`  | create or overwrite                          |
//! | PATCH  | `/product`  | single-field partial update                  |
//! | DELETE | `/product`  | delete by `productId` in the body            |
//!
//! Anything else answers `404` with a fixed body. Every response carries the
//! same envelope: a status code, a JSON content type, and a JSON-text body.
//!
//! Products are schema-less documents identified solely by their
//! `productId` attribute. The store is reached through the
//! [`store::ProductStore`] seam, so the handler can be exercised against an
//! in-memory fake while production wires in [`store::dynamo::DynamoStore`]:
//!
//! ```rust,no_run
//! use lambda_http::{run, service_fn};
//! use product_inventory::{config, handler, store::dynamo::DynamoStore};
//!
//! # async fn example() -> Result<(), lambda_http::Error> {
//! let settings = config::Settings::from_env();
//! let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
//! let client = aws_sdk_dynamodb::Client::new(&config);
//! let store = DynamoStore::new(client, settings.table_name);
//! run(service_fn(|event| handler::handle(&store, event))).await
//! # }
//! ```

/// Deployment settings with environment overrides.
pub mod config;

/// Request failure taxonomy and its status-code mapping.
pub mod error;

/// Request router and the five operation functions.
pub mod handler;

/// Uniform response envelope and wire payloads.
pub mod response;

/// The document-store seam and its DynamoDB implementation.
pub mod store;
