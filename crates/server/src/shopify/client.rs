//! Shopify Admin API GraphQL client.
//!
//! Authenticates with a static access token and retries every failed
//! attempt according to the configured [`RetryPolicy`].

use std::sync::Arc;

use graphql_client::{GraphQLQuery, QueryBody};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::{RetryPolicy, ShopifyError};
use crate::config::ShopifyConfig;

/// Response bodies are truncated to this many characters in errors and logs.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Shopify Admin API GraphQL client.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    /// `None` when the store domain is missing or invalid
    endpoint: Option<Url>,
    access_token: Option<SecretString>,
    retry: RetryPolicy,
}

impl AdminClient {
    /// Create a new Admin API client.
    ///
    /// Missing credentials do not fail construction; calls fail instead.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::Http` if the HTTP client cannot be built.
    pub fn new(config: &ShopifyConfig) -> Result<Self, ShopifyError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            inner: Arc::new(AdminClientInner {
                client,
                endpoint: config.graphql_endpoint(),
                access_token: config.access_token.clone(),
                retry: RetryPolicy::from(config),
            }),
        })
    }

    // =========================================================================
    // GraphQL Execution
    // =========================================================================

    /// Execute a GraphQL operation, retrying failed attempts.
    ///
    /// An attempt fails on a transport error, a non-success status, an
    /// unparseable body, a non-empty `errors` array or a missing `data`
    /// field. All failures are retried alike.
    pub(super) async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, ShopifyError> {
        let body = Q::build_query(variables);
        let body = &body;

        self.inner
            .retry
            .run(body.operation_name, move |_attempt| self.send::<Q>(body))
            .await
    }

    /// Send a single attempt.
    async fn send<Q: GraphQLQuery>(
        &self,
        body: &QueryBody<Q::Variables>,
    ) -> Result<Q::ResponseData, ShopifyError> {
        let endpoint = self
            .inner
            .endpoint
            .as_ref()
            .ok_or(ShopifyError::NotConfigured("SHOPIFY_STORE_DOMAIN"))?;
        let access_token = self
            .inner
            .access_token
            .as_ref()
            .ok_or(ShopifyError::NotConfigured("SHOPIFY_ADMIN_TOKEN"))?;

        let response = self
            .inner
            .client
            .post(endpoint.clone())
            .header("X-Shopify-Access-Token", access_token.expose_secret())
            .json(body)
            .send()
            .await?;

        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(ShopifyError::Status {
                status,
                body: response_text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        parse_response::<Q::ResponseData>(&response_text)
    }
}

/// Parse a GraphQL response envelope, surfacing `errors` before `data`.
///
/// `data` is decoded only after the errors check so that a partial
/// response with nulls is reported as the GraphQL error it is.
fn parse_response<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, ShopifyError> {
    let envelope: graphql_client::Response<serde_json::Value> = serde_json::from_str(text)?;

    if let Some(errors) = envelope.errors
        && !errors.is_empty()
    {
        return Err(ShopifyError::GraphQL(errors));
    }

    let data = envelope
        .data
        .filter(|data| !data.is_null())
        .ok_or(ShopifyError::MissingData("data"))?;

    Ok(serde_json::from_value(data)?)
}
