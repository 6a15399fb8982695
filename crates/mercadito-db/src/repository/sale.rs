//! # Sale Repository
//!
//! Sale recording, editing and deletion, plus the stock reconciliation
//! that goes with them.
//!
//! ## Reconciliation rule
//! ```text
//! recording lines:   stock(product) -= Σ quantity over lines applied
//! reversing lines:   stock(product) += Σ quantity over lines reversed
//! ```
//!
//! Every mutation here runs inside one SQLite transaction: header, lines
//! and stock updates land together or not at all. An edit reverts the old
//! lines' stock impact *before* applying the new set, so a product present
//! in both nets correctly instead of being decremented twice.
//!
//! The store itself does not re-check stock sufficiency — decrements are
//! unconditional and may drive stock negative. Sufficiency is the caller's
//! job before commit (see `checkout`), which is where the operator gets an
//! actionable error instead of a rejected transaction.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult, StoreResult};
use mercadito_core::types::total_of;
use mercadito_core::{CoreError, LineInput, Money, Sale, SaleLine, MISSING_PRODUCT_LABEL};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a sale from a non-empty set of line inputs, returning the
    /// new sale id.
    ///
    /// In one transaction: inserts the header (timestamp now, total = sum
    /// of recomputed subtotals), then for each line resolves the current
    /// product name for the snapshot, inserts the line and decrements the
    /// product's stock.
    pub async fn create(&self, lines: &[LineInput]) -> StoreResult<i64> {
        if lines.is_empty() {
            return Err(CoreError::EmptySale.into());
        }

        debug!(lines = lines.len(), "Recording sale");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let total = total_of(lines);
        let result = sqlx::query("INSERT INTO sales (timestamp, total) VALUES (?, ?)")
            .bind(Utc::now())
            .bind(total)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;
        let sale_id = result.last_insert_rowid();

        for line in lines {
            apply_line(&mut tx, sale_id, line).await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(sale_id, total = %total, "Sale recorded");
        Ok(sale_id)
    }

    /// Replaces a sale's line items wholesale, reconciling stock.
    ///
    /// In one transaction: reverts the old lines' stock impact, discards
    /// them, inserts the new lines exactly as [`create`] would, and
    /// overwrites the total. The sale's timestamp is untouched.
    ///
    /// [`create`]: SaleRepository::create
    pub async fn edit(&self, sale_id: i64, lines: &[LineInput]) -> StoreResult<()> {
        if lines.is_empty() {
            return Err(CoreError::EmptySale.into());
        }

        debug!(sale_id, lines = lines.len(), "Editing sale");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        sale_exists(&mut tx, sale_id).await?;

        // Revert before apply: a product appearing in both the old and new
        // line sets must net out, not double-decrement.
        revert_lines(&mut tx, sale_id).await?;

        sqlx::query("DELETE FROM sale_lines WHERE sale_id = ?")
            .bind(sale_id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

        let mut total = Money::zero();
        for line in lines {
            total += apply_line(&mut tx, sale_id, line).await?;
        }

        sqlx::query("UPDATE sales SET total = ? WHERE id = ?")
            .bind(total)
            .bind(sale_id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(sale_id, total = %total, "Sale edited");
        Ok(())
    }

    /// Deletes a sale, returning its stock to the shelf.
    ///
    /// In one transaction: increments each referenced product's stock by
    /// the line quantity, then removes the lines and the header.
    pub async fn delete(&self, sale_id: i64) -> DbResult<()> {
        debug!(sale_id, "Deleting sale");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        sale_exists(&mut tx, sale_id).await?;

        revert_lines(&mut tx, sale_id).await?;

        sqlx::query("DELETE FROM sale_lines WHERE sale_id = ?")
            .bind(sale_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM sales WHERE id = ?")
            .bind(sale_id)
            .execute(&mut *tx)
            .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(sale_id, "Sale deleted");
        Ok(())
    }

    /// Gets a sale header by id.
    pub async fn get_by_id(&self, sale_id: i64) -> DbResult<Option<Sale>> {
        let sale =
            sqlx::query_as::<_, Sale>("SELECT id, timestamp, total FROM sales WHERE id = ?")
                .bind(sale_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(sale)
    }

    /// Lists sales newest-first, with optional inclusive timestamp bounds.
    ///
    /// Callers pass already-resolved boundaries; mapping a "day/week/month"
    /// style filter to concrete timestamps happens outside the store.
    pub async fn list(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> DbResult<Vec<Sale>> {
        let sql = format!(
            "SELECT id, timestamp, total FROM sales{} ORDER BY timestamp DESC",
            range_clause(from, to)
        );

        let mut query = sqlx::query_as::<_, Sale>(&sql);
        if let Some(from) = from {
            query = query.bind(from);
        }
        if let Some(to) = to {
            query = query.bind(to);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Sum of sale totals over the same range [`list`] covers, for the
    /// "total sold" readout on the records view.
    ///
    /// [`list`]: SaleRepository::list
    pub async fn total_sold(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> DbResult<Money> {
        let sql = format!("SELECT SUM(total) FROM sales{}", range_clause(from, to));

        let mut query = sqlx::query_scalar::<_, Option<i64>>(&sql);
        if let Some(from) = from {
            query = query.bind(from);
        }
        if let Some(to) = to {
            query = query.bind(to);
        }

        let sum = query.fetch_one(&self.pool).await?;
        Ok(Money::from_units(sum.unwrap_or(0)))
    }

    /// Gets a sale's line items in insertion order, with their snapshots
    /// exactly as persisted.
    pub async fn detail(&self, sale_id: i64) -> DbResult<Vec<SaleLine>> {
        let header: Option<i64> = sqlx::query_scalar("SELECT id FROM sales WHERE id = ?")
            .bind(sale_id)
            .fetch_optional(&self.pool)
            .await?;
        if header.is_none() {
            return Err(DbError::not_found("Sale", sale_id));
        }

        let lines = sqlx::query_as::<_, SaleLine>(
            "SELECT id, sale_id, product_id, product_name, quantity, unit_price, subtotal \
             FROM sale_lines WHERE sale_id = ? ORDER BY id",
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }
}

/// Inserts one sale line and decrements the product's stock, returning the
/// recomputed subtotal.
///
/// The name snapshot is resolved against the live catalog; a vanished
/// product falls back to the placeholder label, and its stock update
/// simply matches zero rows.
async fn apply_line(
    tx: &mut SqliteConnection,
    sale_id: i64,
    line: &LineInput,
) -> DbResult<Money> {
    let name: Option<String> = sqlx::query_scalar("SELECT name FROM products WHERE id = ?")
        .bind(line.product_id)
        .fetch_optional(&mut *tx)
        .await?;
    let product_name = name.unwrap_or_else(|| MISSING_PRODUCT_LABEL.to_string());

    let subtotal = line.subtotal();

    sqlx::query(
        "INSERT INTO sale_lines \
         (sale_id, product_id, product_name, quantity, unit_price, subtotal) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(sale_id)
    .bind(line.product_id)
    .bind(&product_name)
    .bind(line.quantity)
    .bind(line.unit_price)
    .bind(subtotal)
    .execute(&mut *tx)
    .await?;

    sqlx::query("UPDATE products SET quantity = quantity - ? WHERE id = ?")
        .bind(line.quantity)
        .bind(line.product_id)
        .execute(&mut *tx)
        .await?;

    Ok(subtotal)
}

/// Returns each referenced product's stock to the shelf for every line of
/// the sale. Lines whose product was deleted match zero rows, which is the
/// intended soft-link behavior.
async fn revert_lines(tx: &mut SqliteConnection, sale_id: i64) -> DbResult<()> {
    let old_lines: Vec<(i64, f64)> =
        sqlx::query_as("SELECT product_id, quantity FROM sale_lines WHERE sale_id = ?")
            .bind(sale_id)
            .fetch_all(&mut *tx)
            .await?;

    for (product_id, quantity) in old_lines {
        sqlx::query("UPDATE products SET quantity = quantity + ? WHERE id = ?")
            .bind(quantity)
            .bind(product_id)
            .execute(&mut *tx)
            .await?;
    }

    Ok(())
}

/// NotFound guard for edit/delete.
async fn sale_exists(tx: &mut SqliteConnection, sale_id: i64) -> DbResult<()> {
    let id: Option<i64> = sqlx::query_scalar("SELECT id FROM sales WHERE id = ?")
        .bind(sale_id)
        .fetch_optional(&mut *tx)
        .await?;

    if id.is_none() {
        return Err(DbError::not_found("Sale", sale_id));
    }
    Ok(())
}

/// WHERE clause for the optional inclusive timestamp range.
fn range_clause(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> &'static str {
    match (from.is_some(), to.is_some()) {
        (true, true) => " WHERE timestamp >= ? AND timestamp <= ?",
        (true, false) => " WHERE timestamp >= ?",
        (false, true) => " WHERE timestamp <= ?",
        (false, false) => "",
    }
}
