//! Test utilities for integration tests
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use axum::{Router, body::Body};
use tokio_rusqlite::Connection;

use storefront_assistant::api::AppState;
use storefront_assistant::api::app;
use storefront_assistant::catalog::{
    CatalogSampler, ProductSummary, SqliteCatalog, seed_demo_products,
};
use storefront_assistant::core::AppConfig;
use storefront_assistant::core::config::DEFAULT_ALLOWED_ORIGIN;
use storefront_assistant::core::db::initialize_db;
use storefront_assistant::intent::IntentResponder;

pub fn test_config() -> AppConfig {
    AppConfig {
        storage_path: String::from("./"),
        catalog_db_path: String::from(":memory:"),
        allowed_origin: String::from(DEFAULT_ALLOWED_ORIGIN),
        sampler_timeout: Duration::from_millis(200),
        api_url: String::from("http://127.0.0.1:2222"),
    }
}

/// An in-memory catalog with the schema applied, optionally seeded
/// with the demo products.
pub async fn test_catalog(seed: bool) -> SqliteCatalog {
    let db = Connection::open_in_memory()
        .await
        .expect("Failed to open in-memory db");
    db.call(|conn| {
        initialize_db(conn)?;
        Ok(())
    })
    .await
    .expect("Failed to migrate db");

    if seed {
        seed_demo_products(&db)
            .await
            .expect("Failed to seed products");
    }

    SqliteCatalog::new(db)
}

/// A catalog that is always down.
pub struct FailingSampler;

#[async_trait]
impl CatalogSampler for FailingSampler {
    async fn sample_random(&self, _n: usize) -> Result<Vec<ProductSummary>, Error> {
        Err(anyhow!("catalog unavailable"))
    }
}

pub fn test_app_with_sampler(sampler: Arc<dyn CatalogSampler>) -> Router {
    let config = test_config();
    let responder = IntentResponder::new(sampler, config.sampler_timeout);
    let app_state = AppState::new(responder, config);
    app(Arc::new(app_state))
}

/// Creates a test application router backed by a seeded in-memory
/// catalog.
pub async fn test_app() -> Router {
    test_app_with_sampler(Arc::new(test_catalog(true).await))
}

/// Serve `app` on a random local port and return its base URL.
pub async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not valid UTF-8")
}
