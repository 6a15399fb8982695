//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! Deletion here is a hard DELETE: sale history references products only
//! through denormalized snapshots, so removing a catalog row never touches
//! a recorded sale. Stock changes driven by sales go through the sale
//! repository's transactions, not through this one; [`adjust_stock`] exists
//! for restocking and manual corrections.
//!
//! [`adjust_stock`]: ProductRepository::adjust_stock

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult, StoreResult};
use mercadito_core::validation::validate_new_product;
use mercadito_core::{NewProduct, Product};

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

const PRODUCT_COLUMNS: &str = "id, name, code, purchase_price, sale_price, quantity";

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists products ordered by name ascending.
    ///
    /// With a filter, returns only products whose name or code contains it
    /// as a case-insensitive substring (SQLite LIKE semantics: ASCII case
    /// folding, no locale rules).
    pub async fn list(&self, filter: Option<&str>) -> DbResult<Vec<Product>> {
        let products = match filter.map(str::trim).filter(|f| !f.is_empty()) {
            Some(filter) => {
                debug!(filter = %filter, "Listing products with filter");
                let pattern = format!("%{}%", filter);
                sqlx::query_as::<_, Product>(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products \
                     WHERE name LIKE ? OR code LIKE ? \
                     ORDER BY name ASC"
                ))
                .bind(&pattern)
                .bind(&pattern)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Product>(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name ASC"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(products)
    }

    /// Gets a product by its id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by exact code match.
    ///
    /// Codes are not guaranteed unique; when duplicates exist the first
    /// match wins, which mirrors how a scanner lookup behaves.
    pub async fn get_by_code(&self, code: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE code = ?"
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product after validating it, returning the new id.
    pub async fn insert(&self, product: &NewProduct) -> StoreResult<i64> {
        validate_new_product(product)?;

        debug!(name = %product.name, "Inserting product");

        let result = sqlx::query(
            "INSERT INTO products (name, code, purchase_price, sale_price, quantity) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(product.name.trim())
        .bind(&product.code)
        .bind(product.purchase_price)
        .bind(product.sale_price)
        .bind(product.quantity)
        .execute(&self.pool)
        .await
        .map_err(DbError::from)?;

        Ok(result.last_insert_rowid())
    }

    /// Fully replaces a product's mutable fields.
    ///
    /// Stock is set to whatever the caller passes; this is the catalog
    /// edit path, not reconciliation.
    pub async fn update(&self, id: i64, product: &NewProduct) -> StoreResult<()> {
        validate_new_product(product)?;

        debug!(id = %id, "Updating product");

        let result = sqlx::query(
            "UPDATE products \
             SET name = ?, code = ?, purchase_price = ?, sale_price = ?, quantity = ? \
             WHERE id = ?",
        )
        .bind(product.name.trim())
        .bind(&product.code)
        .bind(product.purchase_price)
        .bind(product.sale_price)
        .bind(product.quantity)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(DbError::from)?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id).into());
        }

        Ok(())
    }

    /// Deletes a product. Existing sales and their lines are untouched.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Applies a stock delta (positive for restocking, negative for
    /// corrections), outside of any sale.
    pub async fn adjust_stock(&self, id: i64, delta: f64) -> DbResult<()> {
        debug!(id = %id, delta = %delta, "Adjusting stock");

        let result = sqlx::query("UPDATE products SET quantity = quantity + ? WHERE id = ?")
            .bind(delta)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts products (for diagnostics and the seed tool).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
