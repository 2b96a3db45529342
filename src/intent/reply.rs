use serde::{Deserialize, Serialize};

use crate::catalog::ProductSummary;

/// What the assistant says back. On the wire the variant is implied
/// by the JSON shape: text is a string, a product list is an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reply {
    Text(String),
    ProductList(Vec<ProductSummary>),
}

impl Reply {
    pub fn text(body: &str) -> Self {
        Reply::Text(body.to_string())
    }

    pub fn is_product_list(&self) -> bool {
        matches!(self, Reply::ProductList(_))
    }
}
