//! # Ecosystem Directory Core
//!
//! Pure list-processing logic for the ecosystem directory: entity models,
//! facet extraction, the query reducer, pagination, the generic data table
//! contract and the listing controller that wires them together.
//!
//! This crate contains no tokio, HTTP, filesystem I/O, or other
//! native-only dependencies. Every function is synchronous and total over
//! well-typed input.
//!
//! ```text
//! entities ──▶ facets (memo on revision)
//!     │
//!     └──────▶ query ──▶ paginate ──▶ table / grid
//! ```

pub mod controller;
pub mod facets;
pub mod grid;
pub mod models;
pub mod nav;
pub mod paginate;
pub mod query;
pub mod table;
