pub mod routes;
mod server;
pub use server::{app, catalog_app, serve};
pub mod public;
mod state;
pub use state::AppState;
