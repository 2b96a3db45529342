use serde::{Deserialize, Serialize};

/// The slice of a product record the assistant shows to shoppers.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProductSummary {
    pub name: String,
    pub price: f64,
    pub description: String,
}

impl ProductSummary {
    pub fn new(name: &str, price: f64, description: &str) -> Self {
        Self {
            name: name.to_string(),
            price,
            description: description.to_string(),
        }
    }
}
