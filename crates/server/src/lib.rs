//! POS stocked scanner library.
//!
//! A small HTTP gateway between a browser barcode scanner and the Shopify
//! Admin GraphQL API. Exposed as a library so the router can be exercised
//! from integration tests without binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod shopify;
pub mod state;
