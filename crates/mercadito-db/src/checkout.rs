//! # Checkout
//!
//! Commits a staged [`Ticket`] against the ledger store.
//!
//! ## Commit Flow
//! ```text
//! commit_ticket(db, ticket)
//!      │
//!      ├── empty ticket?            → EmptySale, nothing touched
//!      │
//!      ├── for every staged line:
//!      │     re-read product        → Product not found if it vanished
//!      │     live stock < quantity? → InsufficientStock, ticket untouched
//!      │
//!      ├── SaleRepository::create   → one transaction: header + lines
//!      │                              + stock decrements
//!      └── ticket.clear()
//! ```
//!
//! Stock is re-read at commit time, not trusted from staging: between
//! looking a product up and pressing "record sale", another operation may
//! have moved the shelf count. On any failure the ticket is left exactly
//! as staged so the operator can adjust quantities and retry.

use tracing::{debug, info};

use crate::error::{DbError, StoreResult};
use crate::pool::Database;
use mercadito_core::{CoreError, Ticket};

/// Commits the ticket as a new sale, clearing it on success and returning
/// the new sale id.
pub async fn commit_ticket(db: &Database, ticket: &mut Ticket) -> StoreResult<i64> {
    if ticket.is_empty() {
        return Err(CoreError::EmptySale.into());
    }

    debug!(lines = ticket.len(), total = %ticket.total(), "Committing ticket");

    let products = db.products();
    for line in ticket.lines() {
        let product = products
            .get_by_id(line.product_id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", line.product_id))?;

        if !product.can_cover(line.quantity) {
            return Err(CoreError::InsufficientStock {
                name: product.name,
                available: product.quantity,
                requested: line.quantity,
            }
            .into());
        }
    }

    let sale_id = db.sales().create(&ticket.line_inputs()).await?;
    ticket.clear();

    info!(sale_id, "Ticket committed");
    Ok(sale_id)
}
