//! Lambda entry point for the product inventory gateway.

use lambda_http::{run, service_fn, tracing};

use product_inventory::config::Settings;
use product_inventory::handler;
use product_inventory::store::dynamo::DynamoStore;

#[tokio::main]
async fn main() -> Result<(), lambda_http::Error> {
    tracing::init_default_subscriber();

    let settings = Settings::from_env();
    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(settings.region.clone()))
        .load()
        .await;
    let client = aws_sdk_dynamodb::Client::new(&config);
    let store = DynamoStore::new(client, settings.table_name);

    run(service_fn(|event| handler::handle(&store, event))).await
}
