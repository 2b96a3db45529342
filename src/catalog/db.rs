use anyhow::{Error, Result};
use tokio_rusqlite::{Connection, params};

use super::models::ProductSummary;

/// Pick up to `n` products uniformly at random. There is no fixed
/// seed so consecutive calls return different sets.
pub async fn sample_products(db: &Connection, n: usize) -> Result<Vec<ProductSummary>, Error> {
    let limit = n as i64;
    let products = db
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT name, price, description FROM product ORDER BY RANDOM() LIMIT ?1",
            )?;
            let rows = stmt
                .query_map(params![limit], |row| {
                    Ok(ProductSummary {
                        name: row.get(0)?,
                        price: row.get(1)?,
                        description: row.get(2)?,
                    })
                })?
                .filter_map(|row| match row {
                    Ok(product) => Some(product),
                    Err(e) => {
                        tracing::warn!("Skipping unreadable product row: {}", e);
                        None
                    }
                })
                .collect::<Vec<ProductSummary>>();
            Ok(rows)
        })
        .await?;
    Ok(products)
}

pub async fn insert_product(db: &Connection, product: &ProductSummary) -> Result<(), Error> {
    let ProductSummary {
        name,
        price,
        description,
    } = product.clone();
    db.call(move |conn| {
        conn.execute(
            "INSERT INTO product (name, price, description) VALUES (?1, ?2, ?3)",
            params![name, price, description],
        )?;
        Ok(())
    })
    .await?;
    Ok(())
}

pub async fn count_products(db: &Connection) -> Result<i64, Error> {
    let count = db
        .call(|conn| {
            let mut stmt = conn.prepare("SELECT COUNT(*) FROM product")?;
            let count: i64 = stmt.query_row([], |row| row.get(0))?;
            Ok(count)
        })
        .await?;
    Ok(count)
}

/// A few products so a fresh install has something to recommend.
pub fn demo_products() -> Vec<ProductSummary> {
    vec![
        ProductSummary::new(
            "Canvas Weekender Bag",
            89.0,
            "Water resistant canvas duffel with leather handles.",
        ),
        ProductSummary::new(
            "Ceramic Pour-Over Set",
            42.5,
            "Hand glazed dripper and carafe for two cups.",
        ),
        ProductSummary::new(
            "Merino Crew Sweater",
            120.0,
            "Midweight merino wool knit in charcoal.",
        ),
        ProductSummary::new(
            "Walnut Desk Organizer",
            35.99,
            "Solid walnut tray with pen and phone slots.",
        ),
        ProductSummary::new(
            "Trail Running Socks",
            14.0,
            "Cushioned, quick drying, sold as a pair.",
        ),
    ]
}

pub async fn seed_demo_products(db: &Connection) -> Result<usize, Error> {
    let products = demo_products();
    for p in products.iter() {
        insert_product(db, p).await?;
    }
    Ok(products.len())
}
