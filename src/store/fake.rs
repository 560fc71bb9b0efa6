use crate::store::{
    Document, FieldSet, PARTITION_KEY, ProductStore, ScanKey, ScanPage, StoreError,
};

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("injected store failure")]
struct InjectedFailure;

/// Deterministic in-memory store for unit tests.
///
/// Items keep insertion order. The scan emits a continuation token whenever
/// the returned chunk filled the page limit, mirroring how DynamoDB reports
/// `LastEvaluatedKey` on limit-bounded scans; the token names the last item
/// returned. Scan calls are counted, and every operation can be made to fail.
pub(crate) struct FakeStore {
    items: Mutex<IndexMap<String, Document>>,
    page_size: usize,
    scan_calls: AtomicUsize,
    fail: bool,
}

impl FakeStore {
    /// Store serving the whole collection in a single scan page.
    pub(crate) fn new() -> Self {
        Self::with_page_size(usize::MAX)
    }

    /// Store serving scan pages of at most `page_size` items.
    pub(crate) fn with_page_size(page_size: usize) -> Self {
        Self {
            items: Mutex::default(),
            page_size,
            scan_calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    /// Store on which every operation fails.
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Seed the store with documents, keeping their order.
    pub(crate) fn seed(self, items: Vec<Document>) -> Self {
        {
            let mut guard = self.items.lock().expect("items lock");
            for item in items {
                let product_id = item
                    .get(PARTITION_KEY)
                    .and_then(Value::as_str)
                    .expect("seeded document has a string productId");
                guard.insert(product_id.to_owned(), item.clone());
            }
        }
        self
    }

    /// Number of scan calls issued so far.
    pub(crate) fn scan_calls(&self) -> usize {
        self.scan_calls.load(Ordering::SeqCst)
    }

    /// Current value stored under `product_id`.
    pub(crate) fn item(&self, product_id: &str) -> Option<Document> {
        self.items.lock().expect("items lock").get(product_id).cloned()
    }

    /// Number of stored documents.
    pub(crate) fn len(&self) -> usize {
        self.items.lock().expect("items lock").len()
    }

    fn check(&self, operation: &'static str) -> Result<(), StoreError> {
        if self.fail {
            Err(StoreError::Request {
                operation,
                source: Box::new(InjectedFailure),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ProductStore for FakeStore {
    async fn get(&self, product_id: &str) -> Result<Option<Document>, StoreError> {
        self.check("GetItem")?;
        Ok(self.item(product_id))
    }

    async fn put(&self, item: Document) -> Result<(), StoreError> {
        self.check("PutItem")?;
        let product_id = item
            .get(PARTITION_KEY)
            .and_then(Value::as_str)
            .expect("document has a string productId")
            .to_owned();
        self.items.lock().expect("items lock").insert(product_id, item);
        Ok(())
    }

    async fn update(&self, product_id: &str, set: FieldSet) -> Result<Document, StoreError> {
        self.check("UpdateItem")?;
        let mut items = self.items.lock().expect("items lock");
        // UpdateItem upserts: a missing item is created with just its key.
        let item = items.entry(product_id.to_owned()).or_insert_with(|| {
            Document::from_iter([(
                PARTITION_KEY.to_owned(),
                Value::String(product_id.to_owned()),
            )])
        });
        item.insert(set.name.clone(), set.value.clone());
        Ok(Document::from_iter([(set.name, set.value)]))
    }

    async fn delete(&self, product_id: &str) -> Result<Option<Document>, StoreError> {
        self.check("DeleteItem")?;
        Ok(self
            .items
            .lock()
            .expect("items lock")
            .shift_remove(product_id))
    }

    async fn scan(&self, start_key: Option<ScanKey>) -> Result<ScanPage, StoreError> {
        self.check("Scan")?;
        self.scan_calls.fetch_add(1, Ordering::SeqCst);
        let items = self.items.lock().expect("items lock");
        let start = match start_key {
            Some(key) => {
                let product_id = key
                    .get(PARTITION_KEY)
                    .and_then(Value::as_str)
                    .expect("cursor names a string productId");
                items
                    .get_index_of(product_id)
                    .map_or(0, |index| index + 1)
            }
            None => 0,
        };
        let page: Vec<Document> = items
            .values()
            .skip(start)
            .take(self.page_size)
            .cloned()
            .collect();
        let next = (page.len() == self.page_size).then(|| {
            let last = page.last().expect("non-empty page");
            let product_id = last.get(PARTITION_KEY).cloned().unwrap_or(Value::Null);
            ScanKey::from([(PARTITION_KEY.to_owned(), product_id)])
        });
        Ok(ScanPage { items: page, next })
    }
}
