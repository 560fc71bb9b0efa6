use std::env;

/// Table backing the product collection when `TABLE_NAME` is unset.
const DEFAULT_TABLE_NAME: &str = "product-inventory";

/// Deployment region when `AWS_REGION` is unset.
const DEFAULT_REGION: &str = "eu-west-1";

/// Deployment settings for the gateway.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settings {
    /// Name of the table holding the product collection.
    pub table_name: String,
    /// Region the table lives in.
    pub region: String,
}

impl Settings {
    /// Read settings from the environment, falling back to the fixed
    /// deployment defaults.
    pub fn from_env() -> Self {
        Self::from_vars(env::var("TABLE_NAME").ok(), env::var("AWS_REGION").ok())
    }

    fn from_vars(table_name: Option<String>, region: Option<String>) -> Self {
        Self {
            table_name: table_name.unwrap_or_else(|| DEFAULT_TABLE_NAME.to_owned()),
            region: region.unwrap_or_else(|| DEFAULT_REGION.to_owned()),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_vars(None, None)
    }
}
