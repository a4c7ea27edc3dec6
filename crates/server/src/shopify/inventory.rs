//! Inventory level queries.

use pos_stocked_core::{InventoryItemId, InventoryLevel};
use tracing::instrument;

use super::{
    AdminClient, ShopifyError,
    conversions::convert_inventory_levels,
    queries::{INVENTORY_LEVELS_PAGE_SIZE, InventoryByItem, inventory_by_item},
};

impl AdminClient {
    /// Get up to 50 inventory levels for an inventory item.
    ///
    /// # Arguments
    ///
    /// * `inventory_item_id` - Shopify inventory item ID (e.g., `gid://shopify/InventoryItem/123`)
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::NotFound` if the inventory item does not exist,
    /// or another error if the API request fails after all retries.
    #[instrument(skip(self), fields(inventory_item_id = %inventory_item_id))]
    pub async fn get_inventory_levels(
        &self,
        inventory_item_id: &InventoryItemId,
    ) -> Result<Vec<InventoryLevel>, ShopifyError> {
        let variables = inventory_by_item::Variables {
            id: inventory_item_id.to_string(),
            first: INVENTORY_LEVELS_PAGE_SIZE,
        };

        let response = self.execute::<InventoryByItem>(variables).await?;

        response
            .inventory_item
            .map(convert_inventory_levels)
            .ok_or_else(|| {
                ShopifyError::NotFound(format!("Inventory item {inventory_item_id} not found"))
            })
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
            retry_attempts: 2,
            retry_delay: Duration::from_millis(1),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_requests_fifty_levels() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).body_includes(
                    r#""variables":{"id":"gid://shopify/InventoryItem/5","first":50}"#,
                );
                then.status(200).json_body(json!({
                    "data": { "inventoryItem": {
                        "id": "gid://shopify/InventoryItem/5",
                        "inventoryLevels": { "edges": [] }
                    } }
                }));
            })
            .await;

        let levels = client(&server)
            .get_inventory_levels(&InventoryItemId::from_numeric(5))
            .await
            .unwrap();

        assert!(levels.is_empty());
        assert_eq!(mock.calls_async().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_item_is_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200)
                    .json_body(json!({ "data": { "inventoryItem": null } }));
            })
            .await;

        let err = client(&server)
            .get_inventory_levels(&InventoryItemId::from_numeric(404))
            .await
            .unwrap_err();

        assert!(matches!(err, ShopifyError::NotFound(_)));
    }
}
