//! # Catalog Repository
//!
//! Products and their stock levels, as served to the cart's lookups.
//!
//! ## Tables
//! ```text
//! products                          stock
//! ┌────┬───────────┬───────┬───────┐ ┌────────────┬────────┐
//! │ id │ title     │ image │ price │ │ product_id │ amount │
//! ├────┼───────────┼───────┼───────┤ ├────────────┼────────┤
//! │ 42 │ Shoe      │ ...   │ 17990 │ │ 42         │ 5      │
//! └────┴───────────┴───────┴───────┘ └────────────┴────────┘
//! ```
//! Prices are integer cents. A product without a stock row has no stock
//! record, which is different from a stock of zero.

use chrono::Utc;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use stockcart_core::{Money, Product, ProductId, StockInfo};

/// A `products` row.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    title: String,
    image: String,
    price_cents: i64,
}

impl TryFrom<ProductRow> for Product {
    type Error = DbError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Product {
            id: id_from_sql(row.id)?,
            title: row.title,
            image: row.image,
            price: Money::from_cents(row.price_cents),
        })
    }
}

/// A `stock` row.
#[derive(Debug, FromRow)]
struct StockRow {
    product_id: i64,
    amount: i64,
}

/// SQLite integers are signed; product ids are not.
fn id_to_sql(id: ProductId) -> DbResult<i64> {
    i64::try_from(id.get())
        .map_err(|_| DbError::InvalidData(format!("product id {} out of range", id)))
}

fn id_from_sql(id: i64) -> DbResult<ProductId> {
    u64::try_from(id)
        .map(ProductId::new)
        .map_err(|_| DbError::InvalidData(format!("negative product id {}", id)))
}

/// Repository for the `products` and `stock` tables.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Gets a product by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - No such product
    pub async fn get_product(&self, id: ProductId) -> DbResult<Option<Product>> {
        debug!(product_id = %id, "Fetching product");

        let row: Option<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, title, image, price_cents
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id_to_sql(id)?)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// Gets the stock record for a product.
    pub async fn get_stock(&self, id: ProductId) -> DbResult<Option<StockInfo>> {
        debug!(product_id = %id, "Fetching stock");

        let row: Option<StockRow> = sqlx::query_as(
            r#"
            SELECT product_id, amount
            FROM stock
            WHERE product_id = ?1
            "#,
        )
        .bind(id_to_sql(id)?)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| Ok(StockInfo::new(id_from_sql(r.product_id)?, r.amount)))
            .transpose()
    }

    /// Inserts a product or replaces its title, image and price.
    pub async fn upsert_product(&self, product: &Product) -> DbResult<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO products (id, title, image, price_cents, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (id) DO UPDATE SET
                title = excluded.title,
                image = excluded.image,
                price_cents = excluded.price_cents,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(id_to_sql(product.id)?)
        .bind(&product.title)
        .bind(&product.image)
        .bind(product.price.cents())
        .bind(&now)
        .execute(&self.pool)
        .await?;

        debug!(product_id = %product.id, "Upserted product");
        Ok(())
    }

    /// Sets the available stock for an existing product.
    ///
    /// ## Errors
    /// * `ConstraintViolation` - unknown product or negative amount
    pub async fn set_stock(&self, id: ProductId, amount: i64) -> DbResult<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO stock (product_id, amount, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (product_id) DO UPDATE SET
                amount = excluded.amount,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(id_to_sql(id)?)
        .bind(amount)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        debug!(product_id = %id, amount = amount, "Set stock");
        Ok(())
    }

    /// Number of products in the catalog.
    pub async fn count(&self) -> DbResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
