use anyhow::{Result, anyhow};
use std::fs;

use crate::catalog::{count_products, seed_demo_products};
use crate::core::AppConfig;
use crate::core::db::{async_db, initialize_db};

pub async fn run(db: bool, seed: bool, config: &AppConfig) -> Result<()> {
    if !db && !seed {
        return Err(anyhow!("Missing value for init \"--db\" and/or \"--seed\""));
    }

    fs::create_dir_all(&config.storage_path)
        .unwrap_or_else(|err| println!("Ignoring storage directory create failed: {}", err));
    let conn = async_db(&config.catalog_db_path).await?;

    if db {
        println!("Initializing db...");
        conn.call(|conn| {
            initialize_db(conn)?;
            Ok(())
        })
        .await?;
        println!("Finished initializing db");
    }

    if seed {
        println!("Seeding demo products...");
        let added = seed_demo_products(&conn).await?;
        let total = count_products(&conn).await?;
        println!("Added {} products ({} in catalog)", added, total);
    }

    Ok(())
}
