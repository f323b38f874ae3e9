//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.
//! Services share one [`SessionContext`](crate::session::SessionContext) so that
//! a rejected token observed by any of them logs every service out.

pub mod inventory_service;
pub mod item_service;
