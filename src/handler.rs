//! Request router and operation functions.
//!
//! [`handle`] is the sole entry point: it logs the inbound event, selects an
//! operation by exact match on method and path, and turns every failure into
//! an error envelope with a distinguishable status code. The five operation
//! functions each issue store calls through the [`ProductStore`] seam and
//! build the uniform response.

use crate::error::Error;
use crate::response::{self, Operation, OperationOutcome, ProductList};
use crate::store::{self, Document, FieldSet, ProductStore};

use lambda_http::http::{Method, StatusCode};
use lambda_http::{Body, Request, RequestExt, Response};
use serde::Deserialize;
use serde_json::Value;

/// Liveness probe path.
const HEALTH_PATH: &str = "/health";

/// Single-product operations path.
const PRODUCT_PATH: &str = "/product";

/// Full-collection read path.
const PRODUCTS_PATH: &str = "/products";

/// Fixed body returned on a routing miss.
const NOT_FOUND_BODY: &str = "404, Not Found";

/// Upper bound on the pages a single full-collection read will follow.
const MAX_SCAN_PAGES: usize = 100;

/// Body of a partial-update request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRequest {
    product_id: String,
    update_key: String,
    update_value: Value,
}

/// Body of a delete request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteRequest {
    product_id: String,
}

/// Dispatch one inbound request.
///
/// Failures are logged with their method and path and answered with an
/// error envelope; only envelope-construction failures propagate to the
/// runtime.
pub async fn handle<S: ProductStore>(
    store: &S,
    event: Request,
) -> Result<Response<Body>, lambda_http::Error> {
    tracing::debug!(?event, "inbound request");
    let method = event.method().clone();
    let path = event.uri().path().to_owned();
    match route(store, event).await {
        Ok(response) => Ok(response),
        Err(error) => {
            tracing::error!(%method, %path, %error, "request failed");
            response::json(error.status(), &error.to_string()).map_err(Into::into)
        }
    }
}

async fn route<S: ProductStore>(store: &S, event: Request) -> Result<Response<Body>, Error> {
    let method = event.method();
    let path = event.uri().path();
    if method == Method::GET && path == HEALTH_PATH {
        response::empty(StatusCode::OK)
    } else if method == Method::GET && path == PRODUCT_PATH {
        get_product(store, &event).await
    } else if method == Method::GET && path == PRODUCTS_PATH {
        get_products(store).await
    } else if method == Method::POST && path == PRODUCT_PATH {
        save_product(store, event.body()).await
    } else if method == Method::PATCH && path == PRODUCT_PATH {
        modify_product(store, event.body()).await
    } else if method == Method::DELETE && path == PRODUCT_PATH {
        delete_product(store, event.body()).await
    } else {
        response::json(StatusCode::NOT_FOUND, &NOT_FOUND_BODY)
    }
}

async fn get_product<S: ProductStore>(
    store: &S,
    event: &Request,
) -> Result<Response<Body>, Error> {
    let parameters = event.query_string_parameters();
    let product_id = parameters
        .first(store::PARTITION_KEY)
        .ok_or(Error::MissingParameter(store::PARTITION_KEY))?;
    match store.get(product_id).await? {
        Some(product) => response::json(StatusCode::OK, &product),
        None => Err(Error::NotFound),
    }
}

async fn get_products<S: ProductStore>(store: &S) -> Result<Response<Body>, Error> {
    let mut products = Vec::new();
    let mut start_key = None;
    for _ in 0..MAX_SCAN_PAGES {
        let page = store.scan(start_key.take()).await?;
        products.extend(page.items);
        match page.next {
            Some(next) => start_key = Some(next),
            None => return response::json(StatusCode::OK, &ProductList { products }),
        }
    }
    Err(Error::ScanOverflow(MAX_SCAN_PAGES))
}

async fn save_product<S: ProductStore>(store: &S, body: &Body) -> Result<Response<Body>, Error> {
    let product: Document = parse_body(body)?;
    store.put(product.clone()).await?;
    let outcome = OperationOutcome::success(Operation::Save, product);
    response::json(StatusCode::OK, &outcome)
}

async fn modify_product<S: ProductStore>(store: &S, body: &Body) -> Result<Response<Body>, Error> {
    let request: UpdateRequest = parse_body(body)?;
    let set = FieldSet {
        name: request.update_key,
        value: request.update_value,
    };
    let updated = store.update(&request.product_id, set).await?;
    let outcome = OperationOutcome::success(Operation::Update, updated);
    response::json(StatusCode::OK, &outcome)
}

async fn delete_product<S: ProductStore>(store: &S, body: &Body) -> Result<Response<Body>, Error> {
    let request: DeleteRequest = parse_body(body)?;
    match store.delete(&request.product_id).await? {
        Some(previous) => {
            let outcome = OperationOutcome::success(Operation::Delete, previous);
            response::json(StatusCode::OK, &outcome)
        }
        None => Err(Error::NotFound),
    }
}

fn parse_body<T: serde::de::DeserializeOwned>(body: &Body) -> Result<T, Error> {
    serde_json::from_slice(body).map_err(Error::InvalidBody)
}
