//! End-to-end test harness for the scanner gateway.
//!
//! Each [`TestContext`] starts the real router on an ephemeral port and
//! points its Shopify client at an [`httpmock`] server, so tests exercise
//! the full HTTP path without network access or credentials.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pos-stocked-integration-tests
//! ```

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;

use httpmock::MockServer;
use pos_stocked_server::{config::ScannerConfig, routes, state::AppState};
use serde_json::{Value, json};

/// A running scanner plus the mock Shopify it talks to.
pub struct TestContext {
    pub client: reqwest::Client,
    pub base_url: String,
    pub shopify: MockServer,
}

impl TestContext {
    /// Start a scanner against a fresh mock Shopify.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn start() -> Self {
        Self::start_with(&[]).await
    }

    /// Start a scanner with extra environment overrides.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid or the server cannot be started.
    pub async fn start_with(overrides: &[(&str, &str)]) -> Self {
        let shopify = MockServer::start_async().await;

        let public_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../server/public")
            .display()
            .to_string();

        let mut env: HashMap<String, String> = HashMap::from([
            ("SHOPIFY_STORE_DOMAIN".to_string(), shopify.base_url()),
            ("SHOPIFY_ADMIN_TOKEN".to_string(), "shpat_integration".to_string()),
            ("SHOPIFY_RETRY_DELAY_MS".to_string(), "1".to_string()),
            ("SHOPIFY_TIMEOUT_SECS".to_string(), "5".to_string()),
            ("PUBLIC_DIR".to_string(), public_dir),
        ]);
        for (key, value) in overrides {
            env.insert((*key).to_string(), (*value).to_string());
        }

        let config = ScannerConfig::from_lookup(|key| env.get(key).cloned())
            .expect("valid test configuration");
        let state = AppState::new(config).expect("application state");

        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local address");

        tokio::spawn(async move {
            axum::serve(listener, routes::app(state))
                .await
                .expect("server error");
        });

        Self {
            client: reqwest::Client::new(),
            base_url: format!("http://{addr}"),
            shopify,
        }
    }

    /// Full URL for a path on the scanner.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// POST a JSON body and return status plus parsed JSON response.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the response is not JSON.
    pub async fn post_json(&self, path: &str, body: &Value) -> (reqwest::StatusCode, Value) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("request sent");

        let status = resp.status();
        let body = resp.json().await.expect("JSON response");
        (status, body)
    }
}

/// A `productVariants` edge as the Admin API returns it.
#[must_use]
pub fn variant_edge(variant_id: &str, product_id: &str, barcode: &str) -> Value {
    json!({
        "node": {
            "id": variant_id,
            "title": "Default Title",
            "sku": "NP-CHIPS-100",
            "barcode": barcode,
            "price": "4.50",
            "image": null,
            "inventoryItem": { "id": "gid://shopify/InventoryItem/77" },
            "product": {
                "id": product_id,
                "title": "Pineapple Chips",
                "featuredImage": { "url": "https://cdn.shopify.com/chips.png" },
                "tags": ["snacks"]
            }
        }
    })
}

/// GraphQL response body for a barcode search.
#[must_use]
pub fn variant_search_response(edges: Vec<Value>) -> Value {
    json!({ "data": { "productVariants": { "edges": edges } } })
}
