use anyhow::Result;
use storefront_assistant::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
