//! Product variant and parent product as returned by a barcode lookup.
//!
//! Field names serialize in camelCase so that a variant fetched from Shopify
//! is handed to the scanning client in the same shape it arrived in.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{InventoryItemId, ProductId, VariantId};

/// An image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Public CDN URL.
    pub url: String,
}

/// Reference to the inventory item tracking a variant's stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItemRef {
    /// Inventory item ID.
    pub id: InventoryItemId,
}

/// The parent catalog entry of a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Featured image.
    pub featured_image: Option<Image>,
    /// Tags currently attached to the product.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A purchasable configuration of a product, identified by barcode/SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// Variant ID.
    pub id: VariantId,
    /// Variant title (e.g. "Large / Blue").
    pub title: String,
    /// Stock keeping unit.
    pub sku: Option<String>,
    /// Barcode (UPC, EAN, ISBN...).
    pub barcode: Option<String>,
    /// Unit price, kept as a decimal string on the wire.
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    /// Variant image.
    pub image: Option<Image>,
    /// Inventory item backing this variant.
    pub inventory_item: InventoryItemRef,
    /// Parent product. Always present.
    pub product: Product,
}

impl Variant {
    /// Whether this variant's barcode equals `barcode` exactly.
    #[must_use]
    pub fn matches_barcode(&self, barcode: &str) -> bool {
        self.barcode.as_deref() == Some(barcode)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn remote_node() -> serde_json::Value {
        json!({
            "id": "gid://shopify/ProductVariant/11",
            "title": "Default Title",
            "sku": "PINE-001",
            "barcode": "0123456789012",
            "price": "12.50",
            "image": null,
            "inventoryItem": { "id": "gid://shopify/InventoryItem/21" },
            "product": {
                "id": "gid://shopify/Product/31",
                "title": "Pineapple Soap",
                "featuredImage": { "url": "https://cdn.shopify.com/soap.png" },
                "tags": ["soap", "STOCKED"]
            }
        })
    }

    #[test]
    fn test_variant_deserializes_remote_shape() {
        let variant: Variant = serde_json::from_value(remote_node()).unwrap();

        assert_eq!(variant.id.as_str(), "gid://shopify/ProductVariant/11");
        assert_eq!(variant.price, Decimal::new(1250, 2));
        assert_eq!(variant.inventory_item.id.numeric_id(), Some(21));
        assert_eq!(variant.product.title, "Pineapple Soap");
        assert!(variant.image.is_none());
    }

    #[test]
    fn test_variant_serializes_camel_case_and_price_string() {
        let variant: Variant = serde_json::from_value(remote_node()).unwrap();
        let value = serde_json::to_value(&variant).unwrap();

        assert_eq!(value["price"], "12.50");
        assert_eq!(value["inventoryItem"]["id"], "gid://shopify/InventoryItem/21");
        assert_eq!(
            value["product"]["featuredImage"]["url"],
            "https://cdn.shopify.com/soap.png"
        );
    }

    #[test]
    fn test_matches_barcode_is_exact() {
        let variant: Variant = serde_json::from_value(remote_node()).unwrap();
        assert!(variant.matches_barcode("0123456789012"));
        assert!(!variant.matches_barcode("123456789012"));
        assert!(!variant.matches_barcode("0123456789012 "));
    }

    #[test]
    fn test_missing_tags_default_to_empty() {
        let product: Product = serde_json::from_value(json!({
            "id": "gid://shopify/Product/1",
            "title": "Untagged",
            "featuredImage": null
        }))
        .unwrap();
        assert!(product.tags.is_empty());
    }
}
