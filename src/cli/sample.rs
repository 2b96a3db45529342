use anyhow::Result;
use serde_json::json;

use crate::catalog::{CatalogSampler, SqliteCatalog};
use crate::core::AppConfig;
use crate::core::db::async_db;

pub async fn run(count: usize, config: &AppConfig) -> Result<()> {
    let db = async_db(&config.catalog_db_path).await?;
    let catalog = SqliteCatalog::new(db);
    let products = catalog.sample_random(count).await?;
    println!(
        "{}",
        json!({
            "count": products.len(),
            "products": products,
        })
    );
    Ok(())
}
