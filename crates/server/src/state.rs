//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ScannerConfig;
use crate::shopify::{AdminClient, ShopifyError};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds only immutable configuration and the
/// Shopify client; no per-request data survives between requests.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ScannerConfig,
    shopify: AdminClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the Shopify HTTP client cannot be built.
    pub fn new(config: ScannerConfig) -> Result<Self, ShopifyError> {
        let shopify = AdminClient::new(&config.shopify)?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, shopify }),
        })
    }

    /// Get a reference to the scanner configuration.
    #[must_use]
    pub fn config(&self) -> &ScannerConfig {
        &self.inner.config
    }

    /// Get a reference to the Shopify Admin API client.
    #[must_use]
    pub fn shopify(&self) -> &AdminClient {
        &self.inner.shopify
    }
}
