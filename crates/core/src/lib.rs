//! POS Stocked Core - Shared types library.
//!
//! This crate provides the value types passed between the scanner proxy's
//! Shopify client and its HTTP gateway:
//! - [`Variant`] and its parent [`Product`]
//! - [`InventoryLevel`] and its [`Location`]
//! - Newtype wrappers for Shopify global IDs
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Every value
//! is fetched fresh per request and discarded after the response is sent.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
