//! # homestock-app
//!
//! Application layer: use-cases, session context and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `InventoryApi`: the remote inventory backend (homes, items, reference data)
//!   - `TokenStore`: persistence of the session token
//! - Own the **session context** handed to every API call
//! - Define **driving/inbound ports** as use-case structs:
//!   - `InventoryService`: snapshot loading, dashboard
//!   - `ItemService`: create, update, adjust quantity, delete
//! - Provide the **item list view-model** (filter/sort state → table rows)
//! - Orchestrate domain objects without knowing *how* the backend is reached
//!
//! ## Dependency rule
//! Depends on `homestock-domain` only (plus `tokio` for joining requests).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod item_list;
pub mod ports;
pub mod services;
pub mod session;
