//! # mercadito-db: Ledger Store for Mercadito
//!
//! Persistent record of products and sales over SQLite, and the stock
//! reconciliation that keeps the two consistent.
//!
//! ## Architecture Position
//! ```text
//!   mercadito-core          pure domain types and ticket staging
//!        │
//!        ▼
//!   mercadito-db (THIS CRATE)
//!   ├── pool                Database handle + DbConfig
//!   ├── migrations          embedded schema migrations
//!   ├── repository          ProductRepository, SaleRepository
//!   ├── checkout            ticket commit against live stock
//!   └── error               DbError, StoreError
//!        │
//!        ▼
//!   SQLite file (WAL mode) or :memory: for tests
//! ```
//!
//! ## The invariant this crate protects
//!
//! A product's stock always equals its recorded stock minus the quantities
//! in all currently-active sale lines referencing it. Creating a sale
//! decrements stock; editing a sale reverts the old lines' impact before
//! applying the new; deleting a sale reverts it. Each of those is a single
//! SQLite transaction, so a crash mid-operation leaves no partial effect:
//! never a header without its lines, never a decrement without its sale.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mercadito_db::{checkout, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("mercadito.db")).await?;
//!
//! let mut ticket = Ticket::new();
//! let bread = db.products().get_by_code("7001").await?.unwrap();
//! ticket.add_line(&bread, 3.0)?;
//! let sale_id = checkout::commit_ticket(&db, &mut ticket).await?;
//! ```

pub mod checkout;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, StoreError};
pub use pool::{Database, DbConfig};

pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
