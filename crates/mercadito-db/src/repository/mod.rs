//! # Repository Module
//!
//! Database repositories for the Mercadito ledger.
//!
//! Each repository wraps the shared pool behind a focused API; SQL lives
//! only here. The sale repository is also where the reconciliation rule is
//! applied: stock decremented for every line being recorded, incremented
//! for every line being reversed, always inside one transaction.
//!
//! - [`product::ProductRepository`] - product CRUD, lookup and listing
//! - [`sale::SaleRepository`] - sale recording, editing, deletion, queries

pub mod product;
pub mod sale;
