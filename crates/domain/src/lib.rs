//! # homestock-domain
//!
//! Pure domain model for the homestock household inventory.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Define **Homes** (the household an inventory belongs to)
//! - Define **Items** (tracked units with a quantity) and their form rules
//! - Define **Item types** and **Locations** (read-only reference data)
//! - The **view engine**: stats, filtering, sorting and chart series over a
//!   snapshot of items
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod home;
pub mod item;
pub mod item_type;
pub mod location;
pub mod view;
