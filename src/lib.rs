//! # Eco Directory
//!
//! Browse and administer the directory listings of a startup ecosystem:
//! accelerators, media outlets and the navigation built from the
//! entity-type lookup.
//!
//! The listing logic (search, category filter, ordering, pagination, facet
//! extraction, the admin data table) lives in the `eco-directory-core`
//! crate and has no I/O. This crate wires it to sources, the terminal and
//! an HTTP API.
//!
//! ```text
//! ┌──────────────┐   ┌────────────────────┐   ┌──────────┐
//! │   Sources    │──▶│ ListingController  │──▶│   CLI    │
//! │ JSON / HTTP  │   │ DataTable (core)   │   │  (eco)   │
//! └──────────────┘   └─────────┬──────────┘   └──────────┘
//!                              ▼
//!                        ┌──────────┐
//!                        │   HTTP   │
//!                        └──────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`source`] | Entity sources (JSON file, HTTP) |
//! | [`lookup`] | Named lookup tables |
//! | [`entities`] | Per-type columns, search key and cards |
//! | [`listing`] | `eco list`, `eco facets` |
//! | [`admin`] | `eco admin` data table with delete |
//! | [`nav_cmd`] | `eco nav` |
//! | [`render`] | Terminal rendering |
//! | [`sources`] | `eco sources` |
//! | [`server`] | JSON HTTP API |
//! | [`logging`] | `tracing` subscriber setup |

pub mod admin;
pub mod config;
pub mod entities;
pub mod listing;
pub mod logging;
pub mod lookup;
pub mod nav_cmd;
pub mod render;
pub mod server;
pub mod source;
pub mod sources;
