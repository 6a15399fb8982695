//! # Domain Types
//!
//! Core domain types for the Mercadito ledger.
//!
//! ## Type Overview
//! ```text
//! Product        the catalog + stock record, mutated by reconciliation
//! Sale           a persisted sale header (timestamp fixed at creation)
//! SaleLine       one product entry in a sale, with denormalized snapshots
//! NewProduct     validated input for add/update
//! LineInput      what createSale/editSale consume
//! ```
//!
//! ## Snapshot Pattern
//! A `SaleLine` copies the product name and unit price at time of sale.
//! `product_id` is a soft link: there is no foreign key to `products`, so
//! deleting a product leaves its sale history readable and unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Surrogate integer id, immutable once assigned.
    pub id: i64,

    /// Display name (required, non-empty).
    pub name: String,

    /// Optional barcode/short code used as an alternate lookup key.
    /// Not guaranteed unique.
    pub code: Option<String>,

    /// What the store pays per unit.
    pub purchase_price: Money,

    /// What the customer pays per unit.
    pub sale_price: Money,

    /// Quantity on hand. Real-valued: weighable goods sell in fractions.
    /// May go negative when reconciliation is bypassed.
    pub quantity: f64,
}

impl Product {
    /// Whether current stock covers the requested quantity.
    #[inline]
    pub fn can_cover(&self, quantity: f64) -> bool {
        self.quantity >= quantity
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A persisted sale header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,

    /// Creation time; edits never change it.
    pub timestamp: DateTime<Utc>,

    /// Always equal to the sum of the sale's line subtotals. Recomputed on
    /// every mutation, never trusted as independently entered data.
    pub total: Money,
}

// =============================================================================
// Sale Line
// =============================================================================

/// A line item in a sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleLine {
    pub id: i64,
    pub sale_id: i64,

    /// Soft link to the product; the lookup may legitimately miss after
    /// the product is deleted.
    pub product_id: i64,

    /// Product name at time of sale (frozen).
    pub product_name: String,

    /// Quantity sold.
    pub quantity: f64,

    /// Unit price at time of sale (frozen).
    pub unit_price: Money,

    /// quantity × unit_price, rounded to the nearest unit.
    pub subtotal: Money,
}

// =============================================================================
// Inputs
// =============================================================================

/// Input for adding or fully replacing a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub code: Option<String>,
    pub purchase_price: Money,
    pub sale_price: Money,
    pub quantity: f64,
}

/// One line of a sale to be recorded: what createSale and editSale consume.
/// Subtotals are not part of the input; the store recomputes them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineInput {
    pub product_id: i64,
    pub quantity: f64,
    pub unit_price: Money,
}

impl LineInput {
    /// The recomputed subtotal for this line.
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.unit_price.line_subtotal(self.quantity)
    }
}

/// Total of a set of line inputs, as the store will persist it.
pub fn total_of(lines: &[LineInput]) -> Money {
    lines.iter().map(|l| l.subtotal()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_can_cover() {
        let p = Product {
            id: 1,
            name: "Arroz Granel".to_string(),
            code: None,
            purchase_price: Money::from_units(800),
            sale_price: Money::from_units(1200),
            quantity: 2.5,
        };

        assert!(p.can_cover(2.5));
        assert!(p.can_cover(0.5));
        assert!(!p.can_cover(2.6));
    }

    #[test]
    fn line_input_subtotal_recomputed() {
        let line = LineInput {
            product_id: 7,
            quantity: 3.0,
            unit_price: Money::from_units(500),
        };
        assert_eq!(line.subtotal().units(), 1500);
    }

    #[test]
    fn total_sums_lines() {
        let lines = [
            LineInput {
                product_id: 1,
                quantity: 2.0,
                unit_price: Money::from_units(500),
            },
            LineInput {
                product_id: 2,
                quantity: 0.5,
                unit_price: Money::from_units(990),
            },
        ];
        assert_eq!(total_of(&lines).units(), 1495);
    }
}
