//! GraphQL operation definitions for the Shopify Admin API.
//!
//! Each operation implements `graphql_client::GraphQLQuery` by hand: a unit
//! struct names the operation and a snake-case module holds its query
//! document, `Variables` and `ResponseData`, mirroring what the derive macro
//! would generate. Response types deserialize straight into the core value
//! types where the remote shape already matches.

use graphql_client::{GraphQLQuery, QueryBody};

/// Candidates fetched per barcode lookup before exact-match filtering.
///
/// Only this first page is searched: an exact match that Shopify ranks
/// below it is reported as not found.
pub const VARIANT_LOOKUP_PAGE_SIZE: i64 = 50;

/// Inventory levels fetched per inventory item.
pub const INVENTORY_LEVELS_PAGE_SIZE: i64 = 50;

// =============================================================================
// Variant lookup
// =============================================================================

/// Find product variants matching a search query.
pub struct VariantByBarcode;

pub mod variant_by_barcode {
    use pos_stocked_core::Variant;
    use serde::{Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "VariantByBarcode";
    pub const QUERY: &str = r"query VariantByBarcode($q: String!, $first: Int!) {
  productVariants(first: $first, query: $q) {
    edges {
      node {
        id
        title
        sku
        barcode
        price
        image { url }
        inventoryItem { id }
        product {
          id
          title
          featuredImage { url }
          tags
        }
      }
    }
  }
}";

    #[derive(Debug, Serialize)]
    pub struct Variables {
        /// Search-syntax query, e.g. `barcode:"0123"`.
        pub q: String,
        pub first: i64,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub product_variants: VariantConnection,
    }

    #[derive(Debug, Deserialize)]
    pub struct VariantConnection {
        #[serde(default)]
        pub edges: Vec<VariantEdge>,
    }

    #[derive(Debug, Deserialize)]
    pub struct VariantEdge {
        pub node: Variant,
    }
}

impl GraphQLQuery for VariantByBarcode {
    type Variables = variant_by_barcode::Variables;
    type ResponseData = variant_by_barcode::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: variant_by_barcode::QUERY,
            operation_name: variant_by_barcode::OPERATION_NAME,
        }
    }
}

// =============================================================================
// Tag mutation
// =============================================================================

/// Add tags to a product (or any taggable resource).
pub struct AddTag;

pub mod add_tag {
    use serde::{Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "AddTag";
    pub const QUERY: &str = r"mutation AddTag($id: ID!, $tags: [String!]!) {
  tagsAdd(id: $id, tags: $tags) {
    userErrors {
      field
      message
    }
  }
}";

    #[derive(Debug, Serialize)]
    pub struct Variables {
        pub id: String,
        pub tags: Vec<String>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub tags_add: Option<TagsAddPayload>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TagsAddPayload {
        #[serde(default)]
        pub user_errors: Vec<UserError>,
    }

    /// A field-level error reported by the mutation.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct UserError {
        pub field: Option<Vec<String>>,
        pub message: String,
    }
}

impl GraphQLQuery for AddTag {
    type Variables = add_tag::Variables;
    type ResponseData = add_tag::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: add_tag::QUERY,
            operation_name: add_tag::OPERATION_NAME,
        }
    }
}

// =============================================================================
// Inventory levels
// =============================================================================

/// Inventory levels of one inventory item across locations.
pub struct InventoryByItem;

pub mod inventory_by_item {
    use pos_stocked_core::Location;
    use serde::{Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "InventoryByItem";
    pub const QUERY: &str = r#"query InventoryByItem($id: ID!, $first: Int!) {
  inventoryItem(id: $id) {
    id
    inventoryLevels(first: $first) {
      edges {
        node {
          quantities(names: ["available"]) {
            name
            quantity
          }
          location {
            id
            name
          }
        }
      }
    }
  }
}"#;

    #[derive(Debug, Serialize)]
    pub struct Variables {
        pub id: String,
        pub first: i64,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub inventory_item: Option<InventoryItemNode>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InventoryItemNode {
        pub id: String,
        pub inventory_levels: InventoryLevelConnection,
    }

    #[derive(Debug, Deserialize)]
    pub struct InventoryLevelConnection {
        #[serde(default)]
        pub edges: Vec<InventoryLevelEdge>,
    }

    #[derive(Debug, Deserialize)]
    pub struct InventoryLevelEdge {
        pub node: InventoryLevelNode,
    }

    #[derive(Debug, Deserialize)]
    pub struct InventoryLevelNode {
        #[serde(default)]
        pub quantities: Vec<InventoryQuantity>,
        pub location: Location,
    }

    #[derive(Debug, Deserialize)]
    pub struct InventoryQuantity {
        pub name: String,
        pub quantity: i64,
    }
}

impl GraphQLQuery for InventoryByItem {
    type Variables = inventory_by_item::Variables;
    type ResponseData = inventory_by_item::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: inventory_by_item::QUERY,
            operation_name: inventory_by_item::OPERATION_NAME,
        }
    }
}
