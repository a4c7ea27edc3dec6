//! Variant lookup and product tagging.

use pos_stocked_core::{ProductId, Variant};
use tracing::instrument;

use super::{
    AdminClient, ShopifyError,
    queries::{AddTag, VARIANT_LOOKUP_PAGE_SIZE, VariantByBarcode, add_tag, variant_by_barcode},
    search::SearchQuery,
};

impl AdminClient {
    /// Find the variant whose barcode equals `barcode` exactly.
    ///
    /// Shopify's search is token based, so candidates are filtered again
    /// locally and the first exact match wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails after all retries.
    #[instrument(skip(self), fields(barcode = %barcode))]
    pub async fn lookup_variant_by_barcode(
        &self,
        barcode: &str,
    ) -> Result<Option<Variant>, ShopifyError> {
        let variables = variant_by_barcode::Variables {
            q: SearchQuery::new().field_equals("barcode", barcode).build(),
            first: VARIANT_LOOKUP_PAGE_SIZE,
        };

        let response = self.execute::<VariantByBarcode>(variables).await?;

        Ok(response
            .product_variants
            .edges
            .into_iter()
            .map(|edge| edge.node)
            .find(|variant| variant.matches_barcode(barcode)))
    }

    /// Add `tag` to a product.
    ///
    /// Not idempotency-guarded; Shopify itself ignores a tag the product
    /// already has.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::UserError` with the JSON-serialized user errors
    /// if the mutation rejects the input, or another error if the API
    /// request fails after all retries.
    #[instrument(skip(self), fields(product_id = %product_id, tag = %tag))]
    pub async fn add_tag_to_product(
        &self,
        product_id: &ProductId,
        tag: &str,
    ) -> Result<(), ShopifyError> {
        let variables = add_tag::Variables {
            id: product_id.to_string(),
            tags: vec![tag.to_string()],
        };

        let response = self.execute::<AddTag>(variables).await?;

        let payload = response
            .tags_add
            .ok_or(ShopifyError::MissingData("tagsAdd"))?;

        if !payload.user_errors.is_empty() {
            return Err(ShopifyError::UserError(serde_json::to_string(
                &payload.user_errors,
            )?));
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use httpmock::prelude::*;
    use secrecy::SecretString;
    use serde_json::json;

    use super::*;
    use crate::config::ShopifyConfig;

    fn client(server: &MockServer) -> AdminClient {
        AdminClient::new(&ShopifyConfig {
            store_domain: Some(server.base_url()),
            access_token: Some(SecretString::from("shpat_test".to_string())),
            api_version: "2024-10".to_string(),
            retry_attempts: 3,
            retry_delay: Duration::from_millis(1),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    fn variant_node(id: u64, barcode: &str) -> serde_json::Value {
        json!({
            "node": {
                "id": format!("gid://shopify/ProductVariant/{id}"),
                "title": "Default Title",
                "sku": null,
                "barcode": barcode,
                "price": "4.00",
                "image": null,
                "inventoryItem": { "id": format!("gid://shopify/InventoryItem/{id}") },
                "product": {
                    "id": "gid://shopify/Product/9",
                    "title": "Pineapple Chips",
                    "featuredImage": null,
                    "tags": []
                }
            }
        })
    }

    #[tokio::test]
    async fn test_lookup_sends_escaped_search_query() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .body_includes(r#""q":"barcode:\"12\\\"34\"""#);
                then.status(200)
                    .json_body(json!({ "data": { "productVariants": { "edges": [] } } }));
            })
            .await;

        let result = client(&server)
            .lookup_variant_by_barcode(r#"12"34"#)
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(mock.calls_async().await, 1);
    }

    #[tokio::test]
    async fn test_lookup_picks_exact_barcode_match() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(json!({
                    "data": { "productVariants": { "edges": [
                        variant_node(1, "0001234"),
                        variant_node(2, "1234"),
                    ] } }
                }));
            })
            .await;

        let variant = client(&server)
            .lookup_variant_by_barcode("1234")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(variant.id.as_str(), "gid://shopify/ProductVariant/2");
    }

    #[tokio::test]
    async fn test_lookup_finds_exact_match_past_tenth_hit() {
        let server = MockServer::start_async().await;
        let mut edges: Vec<_> = (1..=10)
            .map(|id| variant_node(id, &format!("1234{id:02}")))
            .collect();
        edges.push(variant_node(11, "1234"));

        let mock = server
            .mock_async(|when, then| {
                when.method(POST).body_includes(r#""first":50"#);
                then.status(200).json_body(json!({
                    "data": { "productVariants": { "edges": edges } }
                }));
            })
            .await;

        let variant = client(&server)
            .lookup_variant_by_barcode("1234")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(variant.id.as_str(), "gid://shopify/ProductVariant/11");
        assert_eq!(mock.calls_async().await, 1);
    }

    #[tokio::test]
    async fn test_lookup_without_exact_match_is_none() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(json!({
                    "data": { "productVariants": { "edges": [variant_node(1, "99999")] } }
                }));
            })
            .await;

        let result = client(&server)
            .lookup_variant_by_barcode("1234")
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_add_tag_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .body_includes(
                        r#""variables":{"id":"gid://shopify/Product/9","tags":["STOCKED"]}"#,
                    );
                then.status(200)
                    .json_body(json!({ "data": { "tagsAdd": { "userErrors": [] } } }));
            })
            .await;

        client(&server)
            .add_tag_to_product(&ProductId::new("gid://shopify/Product/9"), "STOCKED")
            .await
            .unwrap();

        assert_eq!(mock.calls_async().await, 1);
    }

    #[tokio::test]
    async fn test_add_tag_user_errors_are_not_retried() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(json!({
                    "data": { "tagsAdd": { "userErrors": [
                        { "field": ["id"], "message": "Product does not exist" }
                    ] } }
                }));
            })
            .await;

        let err = client(&server)
            .add_tag_to_product(&ProductId::new("gid://shopify/Product/404"), "STOCKED")
            .await
            .unwrap_err();

        match err {
            ShopifyError::UserError(detail) => {
                assert!(detail.contains("Product does not exist"));
                assert!(detail.starts_with('['));
            }
            other => panic!("expected user error, got {other:?}"),
        }
        assert_eq!(mock.calls_async().await, 1);
    }

    #[tokio::test]
    async fn test_add_tag_missing_payload() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(json!({ "data": { "tagsAdd": null } }));
            })
            .await;

        let err = client(&server)
            .add_tag_to_product(&ProductId::new("gid://shopify/Product/9"), "STOCKED")
            .await
            .unwrap_err();

        assert!(matches!(err, ShopifyError::MissingData("tagsAdd")));
    }
}
