use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::Router;
use http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use super::routes;
use crate::api::state::AppState;
use crate::catalog::SqliteCatalog;
use crate::core::AppConfig;
use crate::core::db::{async_db, initialize_db};
use crate::intent::IntentResponder;

/// Browsers may only reach the API from the storefront itself, with
/// `GET`/`POST` and a JSON content type.
fn cors(allowed_origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    match HeaderValue::from_str(allowed_origin) {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            // No allowed origin means every cross origin request is refused
            tracing::error!("Invalid allowed origin {:?}: {}", allowed_origin, e);
            layer
        }
    }
}

pub fn app(shared_state: Arc<AppState>) -> Router {
    let cors = cors(&shared_state.config.allowed_origin);

    Router::new()
        // API routes
        .nest("/api", routes::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::clone(&shared_state))
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // axum logs rejections from built-in extractors with the `axum::rejection`
                // target, at `TRACE` level. `axum::rejection=trace` enables showing those events
                format! {
                    "{}=debug,tower_http=debug,axum::rejection=trace",
                    env!("CARGO_CRATE_NAME")
                }
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the app against the catalog database named in `config`,
/// creating the schema first so an empty catalog answers normally.
pub async fn catalog_app(config: AppConfig) -> Result<Router> {
    let db = async_db(&config.catalog_db_path).await?;
    db.call(|conn| {
        initialize_db(conn)?;
        Ok(())
    })
    .await?;

    let sampler = Arc::new(SqliteCatalog::new(db));
    let responder = IntentResponder::new(sampler, config.sampler_timeout);
    let app_state = AppState::new(responder, config);

    Ok(app(Arc::new(app_state)))
}

// Run the server
pub async fn serve(host: String, port: String, config: AppConfig) -> Result<()> {
    init_tracing();

    let app = catalog_app(config).await?;

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;

    tracing::debug!("Server started. Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
