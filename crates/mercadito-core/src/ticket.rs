//! # Ticket (sale-in-progress)
//!
//! The staging buffer for a sale being composed at the till. Lines are
//! accumulated and adjusted here, against the stock the operator saw when
//! the product was looked up; nothing touches the ledger until the ticket
//! is committed (see `mercadito_db::checkout`).
//!
//! ## Lifecycle
//! ```text
//! lookup product ──► add_line() ───► staged lines
//!                    (stock guard)        │
//! double-click ───► set_line_quantity() / remove_line()
//!                                         │
//! "record sale" ──► checkout::commit_ticket(db, ticket)
//!                    └── re-reads live stock, createSale, clear()
//! ```
//!
//! The buffer is ephemeral and owned by one till session. It has no
//! identity in the store until commit materializes it, and cancelling the
//! sale is just dropping (or clearing) the ticket.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{LineInput, Product};
use crate::validation::validate_sale_quantity;

/// One staged line of the sale being composed.
///
/// Name, code and unit price are frozen from the product at the moment it
/// was added, so the ticket keeps displaying consistent data even if the
/// catalog row changes underneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketLine {
    pub product_id: i64,
    pub product_name: String,
    pub code: Option<String>,
    pub unit_price: Money,
    pub quantity: f64,
}

impl TicketLine {
    /// Subtotal for this staged line, recomputed from quantity and price.
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.unit_price.line_subtotal(self.quantity)
    }
}

/// The sale-in-progress staging buffer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    lines: Vec<TicketLine>,
}

impl Ticket {
    /// Creates a new empty ticket.
    pub fn new() -> Self {
        Ticket { lines: Vec::new() }
    }

    /// Stages `quantity` of `product`, at the product's current sale price.
    ///
    /// If the product is already staged its quantity is increased instead
    /// of appending a second line. The change is rejected, with the ticket
    /// untouched, when the combined staged quantity would exceed the
    /// product's currently known stock.
    pub fn add_line(&mut self, product: &Product, quantity: f64) -> CoreResult<()> {
        validate_sale_quantity(quantity)?;

        let staged: f64 = self
            .lines
            .iter()
            .find(|l| l.product_id == product.id)
            .map(|l| l.quantity)
            .unwrap_or(0.0);

        let requested = staged + quantity;
        if !product.can_cover(requested) {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                available: product.quantity,
                requested,
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity = requested;
            return Ok(());
        }

        self.lines.push(TicketLine {
            product_id: product.id,
            product_name: product.name.clone(),
            code: product.code.clone(),
            unit_price: product.sale_price,
            quantity,
        });
        Ok(())
    }

    /// Overwrites the quantity of an existing staged line.
    ///
    /// No upper bound is enforced here; stock sufficiency is re-checked
    /// against live rows at commit time.
    pub fn set_line_quantity(&mut self, index: usize, quantity: f64) -> CoreResult<()> {
        validate_sale_quantity(quantity)?;

        let line = self
            .lines
            .get_mut(index)
            .ok_or(CoreError::LineOutOfRange(index))?;
        line.quantity = quantity;
        Ok(())
    }

    /// Drops a staged line, returning it.
    pub fn remove_line(&mut self, index: usize) -> CoreResult<TicketLine> {
        if index >= self.lines.len() {
            return Err(CoreError::LineOutOfRange(index));
        }
        Ok(self.lines.remove(index))
    }

    /// The staged lines, in insertion order.
    pub fn lines(&self) -> &[TicketLine] {
        &self.lines
    }

    /// Sum of all staged subtotals.
    pub fn total(&self) -> Money {
        self.lines.iter().map(TicketLine::subtotal).sum()
    }

    /// Number of staged lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Discards all staged lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The staged lines as store inputs, for createSale.
    pub fn line_inputs(&self) -> Vec<LineInput> {
        self.lines
            .iter()
            .map(|l| LineInput {
                product_id: l.product_id,
                quantity: l.quantity,
                unit_price: l.unit_price,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, price: i64, stock: f64) -> Product {
        Product {
            id,
            name: name.to_string(),
            code: Some(format!("C-{id}")),
            purchase_price: Money::from_units(price / 2),
            sale_price: Money::from_units(price),
            quantity: stock,
        }
    }

    #[test]
    fn add_line_stages_at_sale_price() {
        let mut ticket = Ticket::new();
        let bread = product(1, "Pan Amasado", 500, 10.0);

        ticket.add_line(&bread, 3.0).unwrap();

        assert_eq!(ticket.len(), 1);
        assert_eq!(ticket.lines()[0].unit_price, Money::from_units(500));
        assert_eq!(ticket.total(), Money::from_units(1500));
    }

    #[test]
    fn add_same_product_accumulates() {
        let mut ticket = Ticket::new();
        let bread = product(1, "Pan Amasado", 500, 10.0);

        ticket.add_line(&bread, 3.0).unwrap();
        ticket.add_line(&bread, 2.0).unwrap();

        assert_eq!(ticket.len(), 1);
        assert_eq!(ticket.lines()[0].quantity, 5.0);
        assert_eq!(ticket.total(), Money::from_units(2500));
    }

    #[test]
    fn add_beyond_known_stock_rejected_without_mutation() {
        let mut ticket = Ticket::new();
        let bread = product(1, "Pan Amasado", 500, 4.0);

        ticket.add_line(&bread, 3.0).unwrap();
        let err = ticket.add_line(&bread, 2.0).unwrap_err();

        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available,
                requested,
                ..
            } if available == 4.0 && requested == 5.0
        ));
        // the rejected call must not have touched the staged quantity
        assert_eq!(ticket.lines()[0].quantity, 3.0);
    }

    #[test]
    fn new_line_beyond_stock_rejected() {
        let mut ticket = Ticket::new();
        let bread = product(1, "Pan Amasado", 500, 2.0);

        assert!(ticket.add_line(&bread, 3.0).is_err());
        assert!(ticket.is_empty());
    }

    #[test]
    fn quantity_must_be_positive() {
        let mut ticket = Ticket::new();
        let bread = product(1, "Pan Amasado", 500, 10.0);

        assert!(matches!(
            ticket.add_line(&bread, 0.0),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            ticket.add_line(&bread, -1.0),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn set_line_quantity_recomputes_subtotal() {
        let mut ticket = Ticket::new();
        let bread = product(1, "Pan Amasado", 500, 10.0);
        ticket.add_line(&bread, 1.0).unwrap();

        // no upper bound at this layer
        ticket.set_line_quantity(0, 40.0).unwrap();

        assert_eq!(ticket.lines()[0].quantity, 40.0);
        assert_eq!(ticket.total(), Money::from_units(20000));
    }

    #[test]
    fn set_line_quantity_bad_index() {
        let mut ticket = Ticket::new();
        assert!(matches!(
            ticket.set_line_quantity(0, 1.0),
            Err(CoreError::LineOutOfRange(0))
        ));
    }

    #[test]
    fn remove_line_drops_only_that_line() {
        let mut ticket = Ticket::new();
        ticket.add_line(&product(1, "Pan", 500, 10.0), 1.0).unwrap();
        ticket.add_line(&product(2, "Leche", 1200, 6.0), 2.0).unwrap();

        let removed = ticket.remove_line(0).unwrap();

        assert_eq!(removed.product_id, 1);
        assert_eq!(ticket.len(), 1);
        assert_eq!(ticket.lines()[0].product_id, 2);
    }

    #[test]
    fn line_inputs_mirror_staged_lines() {
        let mut ticket = Ticket::new();
        ticket.add_line(&product(1, "Pan", 500, 10.0), 3.0).unwrap();

        let inputs = ticket.line_inputs();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].product_id, 1);
        assert_eq!(inputs[0].quantity, 3.0);
        assert_eq!(inputs[0].unit_price, Money::from_units(500));
    }

    #[test]
    fn clear_empties_ticket() {
        let mut ticket = Ticket::new();
        ticket.add_line(&product(1, "Pan", 500, 10.0), 1.0).unwrap();

        ticket.clear();

        assert!(ticket.is_empty());
        assert_eq!(ticket.total(), Money::zero());
    }
}
