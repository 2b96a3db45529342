//! The product catalog as seen by the assistant: a source of random
//! product summaries.

pub mod db;
pub mod models;
pub use db::*;
pub use models::*;

use anyhow::{Error, Result};
use async_trait::async_trait;
use tokio_rusqlite::Connection;

/// Anything that can hand back a random handful of products. May
/// return fewer than `n` items (including none) when the catalog is
/// small, and may fail transiently.
#[async_trait]
pub trait CatalogSampler: Send + Sync {
    async fn sample_random(&self, n: usize) -> Result<Vec<ProductSummary>, Error>;
}

/// Samples from the `product` table of the catalog database.
#[derive(Clone)]
pub struct SqliteCatalog {
    db: Connection,
}

impl SqliteCatalog {
    pub fn new(db: Connection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogSampler for SqliteCatalog {
    async fn sample_random(&self, n: usize) -> Result<Vec<ProductSummary>, Error> {
        sample_products(&self.db, n).await
    }
}
