use crate::store::{self, Document, FieldSet, ProductStore, ScanKey, ScanPage, StoreError};

use async_trait::async_trait;
use aws_sdk_dynamodb::{Client, types};
use serde_dynamo::{from_attribute_value, from_item, from_items, to_attribute_value, to_item};
use std::collections;

/// Placeholder bound to the target attribute name in the update expression.
const FIELD_PLACEHOLDER: &str = "#field";

/// Placeholder bound to the assigned value in the update expression.
const VALUE_PLACEHOLDER: &str = ":value";

/// DynamoDB-backed product store.
///
/// Holds the process-wide SDK client and the table name; one instance is
/// built at startup and reused across invocations.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use product_inventory::store::dynamo::DynamoStore;
///
/// # async fn example() {
/// let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
/// let store = DynamoStore::new(Client::new(&config), "product-inventory".to_string());
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    /// Create a store bound to `table_name`.
    pub fn new(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }
}

/// Parameterized `SET` expression for a single-field assignment.
///
/// The caller-supplied attribute name travels in the names map and the value
/// in the values map; neither is spliced into the expression text.
#[derive(Clone, Debug, PartialEq)]
struct SetExpression {
    expression: String,
    names: collections::HashMap<String, String>,
    values: collections::HashMap<String, types::AttributeValue>,
}

impl TryFrom<FieldSet> for SetExpression {
    type Error = serde_dynamo::Error;

    fn try_from(set: FieldSet) -> Result<Self, Self::Error> {
        let value = to_attribute_value(set.value)?;
        let expression = Self {
            expression: format!("SET {FIELD_PLACEHOLDER} = {VALUE_PLACEHOLDER}"),
            names: collections::HashMap::from([(FIELD_PLACEHOLDER.to_owned(), set.name)]),
            values: collections::HashMap::from([(VALUE_PLACEHOLDER.to_owned(), value)]),
        };
        Ok(expression)
    }
}

fn primary_key(
    product_id: &str,
) -> Result<collections::HashMap<String, types::AttributeValue>, serde_dynamo::Error> {
    let value = to_attribute_value(product_id)?;
    Ok(collections::HashMap::from([(
        store::PARTITION_KEY.to_owned(),
        value,
    )]))
}

fn serialize_key(
    key: ScanKey,
) -> Result<collections::HashMap<String, types::AttributeValue>, serde_dynamo::Error> {
    let mut serialized = collections::HashMap::with_capacity(key.len());
    for (name, value) in key {
        serialized.insert(name, to_attribute_value(value)?);
    }
    Ok(serialized)
}

fn deserialize_key(
    key: collections::HashMap<String, types::AttributeValue>,
) -> Result<ScanKey, serde_dynamo::Error> {
    let mut deserialized = collections::HashMap::with_capacity(key.len());
    for (name, value) in key {
        deserialized.insert(name, from_attribute_value(value)?);
    }
    Ok(deserialized)
}

#[async_trait]
impl ProductStore for DynamoStore {
    #[tracing::instrument(name = "store.get_item", skip(self), err)]
    async fn get(&self, product_id: &str) -> Result<Option<Document>, StoreError> {
        let key = primary_key(product_id)?;
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(key))
            .send()
            .await
            .map_err(StoreError::request("GetItem"))?;
        match output.item {
            Some(item) => Ok(Some(from_item(item)?)),
            None => Ok(None),
        }
    }

    #[tracing::instrument(name = "store.put_item", skip(self, item), err)]
    async fn put(&self, item: Document) -> Result<(), StoreError> {
        let item: collections::HashMap<String, types::AttributeValue> = to_item(item)?;
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(StoreError::request("PutItem"))?;
        Ok(())
    }

    #[tracing::instrument(name = "store.update_item", skip(self, set), err)]
    async fn update(&self, product_id: &str, set: FieldSet) -> Result<Document, StoreError> {
        let key = primary_key(product_id)?;
        let set_expression: SetExpression = set.try_into()?;
        let output = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(key))
            .update_expression(set_expression.expression)
            .set_expression_attribute_names(Some(set_expression.names))
            .set_expression_attribute_values(Some(set_expression.values))
            .return_values(types::ReturnValue::UpdatedNew)
            .send()
            .await
            .map_err(StoreError::request("UpdateItem"))?;
        let attributes = output.attributes.unwrap_or_default();
        Ok(from_item(attributes)?)
    }

    #[tracing::instrument(name = "store.delete_item", skip(self), err)]
    async fn delete(&self, product_id: &str) -> Result<Option<Document>, StoreError> {
        let key = primary_key(product_id)?;
        let output = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(key))
            .return_values(types::ReturnValue::AllOld)
            .send()
            .await
            .map_err(StoreError::request("DeleteItem"))?;
        match output.attributes {
            Some(attributes) => Ok(Some(from_item(attributes)?)),
            None => Ok(None),
        }
    }

    #[tracing::instrument(name = "store.scan", skip(self, start_key), err)]
    async fn scan(&self, start_key: Option<ScanKey>) -> Result<ScanPage, StoreError> {
        let exclusive_start_key = start_key.map(serialize_key).transpose()?;
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .set_exclusive_start_key(exclusive_start_key)
            .send()
            .await
            .map_err(StoreError::request("Scan"))?;
        let items = from_items(output.items.unwrap_or_default())?;
        let next = output.last_evaluated_key.map(deserialize_key).transpose()?;
        Ok(ScanPage { items, next })
    }
}
