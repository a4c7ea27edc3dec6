//! Core types for POS Stocked.
//!
//! This module provides type-safe wrappers for the Shopify objects the
//! scanner proxy passes through.

pub mod id;
pub mod inventory;
pub mod variant;

pub use id::{InventoryItemId, LocationId, ProductId, VariantId};
pub use inventory::{InventoryLevel, Location};
pub use variant::{Image, InventoryItemRef, Product, Variant};
