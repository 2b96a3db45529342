use std::env;
use std::time::Duration;

pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://shopx-mf2i.onrender.com";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub storage_path: String,
    pub catalog_db_path: String,
    // Only this origin may call the API from a browser
    pub allowed_origin: String,
    pub sampler_timeout: Duration,
    // Base URL the terminal widget talks to
    pub api_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let host = "127.0.0.1";
        let port = "2222";
        let storage_path = env::var("STOREFRONT_STORAGE_PATH").unwrap_or("./".to_string());
        let catalog_db_path = format!("{}/catalog.db", storage_path);
        let allowed_origin = env::var("STOREFRONT_ALLOWED_ORIGIN")
            .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGIN.to_string());
        let sampler_timeout_ms = env::var("STOREFRONT_SAMPLER_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(2000);
        let api_url =
            env::var("STOREFRONT_API_URL").unwrap_or(format!("http://{}:{}", host, port));

        Self {
            storage_path,
            catalog_db_path,
            allowed_origin,
            sampler_timeout: Duration::from_millis(sampler_timeout_ms),
            api_url,
        }
    }
}
