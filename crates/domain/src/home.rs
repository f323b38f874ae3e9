//! Home: the household whose inventory is tracked.

use serde::{Deserialize, Serialize};

use crate::id::{HomeId, UserId};

/// A household. Items, item types and locations all belong to one home.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Home {
    pub id: HomeId,
    pub name: String,
    pub owner_id: UserId,
}

/// Pick the home a dashboard should display when the user has not chosen one.
///
/// Follows the first-home convention: the first home returned by the API.
#[must_use]
pub fn default_home(homes: &[Home]) -> Option<&Home> {
    homes.first()
}
