//! # homestock-adapter-snapshot-json
//!
//! Local-file backend standing in for the remote inventory API.
//!
//! ## Responsibilities
//! - Implement the `InventoryApi` port over a JSON snapshot file
//! - Enforce the optional `api_key` carried by the snapshot
//! - Write mutations back to the snapshot file
//! - Implement the `TokenStore` port over a plain text file
//!
//! ## Dependency rule
//! Depends on `homestock-app` (for port traits) and `homestock-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod api;
pub mod error;
pub mod store;
pub mod token_store;

pub use api::JsonInventoryApi;
pub use error::SnapshotError;
pub use store::{Config, SnapshotFile, SnapshotStore};
pub use token_store::FileTokenStore;
