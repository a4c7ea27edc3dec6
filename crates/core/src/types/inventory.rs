//! Inventory levels per stocking location.

use serde::{Deserialize, Serialize};

use super::id::LocationId;

/// A physical or logical stocking location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Location ID.
    pub id: LocationId,
    /// Location name.
    pub name: String,
}

/// Quantity available for an inventory item at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLevel {
    /// Quantity available for sale.
    pub available: i64,
    /// Where the stock is held. Always present.
    pub location: Location,
}
