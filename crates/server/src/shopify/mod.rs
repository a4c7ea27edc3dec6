//! Shopify Admin API client for the scanner proxy.
//!
//! # Security
//!
//! This module holds the Shopify Admin API access token. The token is only
//! ever sent in the `X-Shopify-Access-Token` header and never leaves the
//! server in a response body.
//!
//! # Architecture
//!
//! - Operations implement `graphql_client::GraphQLQuery` by hand (see [`queries`])
//! - Every call goes through [`AdminClient::execute`], which retries failed
//!   attempts with a fixed delay ([`RetryPolicy`])
//! - Direct API calls to Shopify (no local state, no caching)
//!
//! # Example
//!
//! ```rust,ignore
//! use pos_stocked_server::shopify::AdminClient;
//!
//! let client = AdminClient::new(&config.shopify)?;
//!
//! if let Some(variant) = client.lookup_variant_by_barcode("0123456789012").await? {
//!     client.add_tag_to_product(&variant.product.id, "STOCKED").await?;
//!     let levels = client.get_inventory_levels(&variant.inventory_item.id).await?;
//! }
//! ```

mod client;
mod conversions;
mod inventory;
mod products;
pub mod queries;
pub mod retry;
pub mod search;

pub use client::AdminClient;
pub use retry::RetryPolicy;

use thiserror::Error;

/// Errors that can occur when interacting with the Shopify Admin API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Shopify answered with a non-success status code.
    #[error("Shopify returned HTTP {status}: {body}")]
    Status {
        /// Response status.
        status: reqwest::StatusCode,
        /// Leading part of the response body.
        body: String,
    },

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<graphql_client::Error>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The response was well-formed but lacked an expected field.
    #[error("Missing {0} in response")]
    MissingData(&'static str),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User error from mutation (e.g., invalid input).
    #[error("User error: {0}")]
    UserError(String),

    /// A required setting is absent, so no request can be made.
    #[error("Shopify client not configured: missing {0}")]
    NotConfigured(&'static str),
}

fn format_graphql_errors(errors: &[graphql_client::Error]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}
