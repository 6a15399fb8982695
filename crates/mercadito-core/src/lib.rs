//! # mercadito-core: Pure Business Logic for Mercadito
//!
//! This crate is the heart of the Mercadito ledger. It contains the domain
//! types and the business rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//!   Presentation layer (out of scope here)
//!        │
//!        ▼
//!   mercadito-core (THIS CRATE)
//!   ├── types       Product, Sale, SaleLine
//!   ├── money       integer Money, line subtotals
//!   ├── ticket      sale-in-progress staging buffer
//!   └── validation  field rules
//!        │
//!        ▼
//!   mercadito-db    SQLite queries, transactions, migrations
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: no database, network or file system access here
//! 2. **Integer money**: all monetary values are whole currency units (i64)
//! 3. **Explicit errors**: typed error enums, never strings or panics
//!
//! ## Example
//!
//! ```rust
//! use mercadito_core::{Money, Product, Ticket};
//!
//! let bread = Product {
//!     id: 1,
//!     name: "Pan Amasado".into(),
//!     code: Some("7001".into()),
//!     purchase_price: Money::from_units(300),
//!     sale_price: Money::from_units(500),
//!     quantity: 10.0,
//! };
//!
//! let mut ticket = Ticket::new();
//! ticket.add_line(&bread, 3.0).unwrap();
//! assert_eq!(ticket.total(), Money::from_units(1500));
//! ```

pub mod error;
pub mod money;
pub mod ticket;
pub mod types;
pub mod validation;

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use ticket::{Ticket, TicketLine};
pub use types::{LineInput, NewProduct, Product, Sale, SaleLine};

/// Name recorded on a sale line when the referenced product no longer
/// exists at recording time. Line items keep only a soft link to products,
/// so this label is what sale history shows for vanished references.
pub const MISSING_PRODUCT_LABEL: &str = "[deleted product]";
