//! Conversions from GraphQL response types to core value types.

use pos_stocked_core::InventoryLevel;

use super::queries::inventory_by_item;

/// Name of the quantity Shopify reports as sellable stock.
const AVAILABLE: &str = "available";

pub fn convert_inventory_levels(
    item: inventory_by_item::InventoryItemNode,
) -> Vec<InventoryLevel> {
    item.inventory_levels
        .edges
        .into_iter()
        .map(|edge| convert_inventory_level(edge.node))
        .collect()
}

fn convert_inventory_level(level: inventory_by_item::InventoryLevelNode) -> InventoryLevel {
    let available = level
        .quantities
        .iter()
        .find(|q| q.name == AVAILABLE)
        .map_or(0, |q| q.quantity);

    InventoryLevel {
        available,
        location: level.location,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_convert_reads_available_quantity() {
        let item: inventory_by_item::InventoryItemNode = serde_json::from_value(json!({
            "id": "gid://shopify/InventoryItem/1",
            "inventoryLevels": { "edges": [
                { "node": {
                    "quantities": [
                        { "name": "on_hand", "quantity": 9 },
                        { "name": "available", "quantity": 7 }
                    ],
                    "location": { "id": "gid://shopify/Location/1", "name": "Shop floor" }
                } },
                { "node": {
                    "quantities": [],
                    "location": { "id": "gid://shopify/Location/2", "name": "Back room" }
                } }
            ] }
        }))
        .unwrap();

        let levels = convert_inventory_levels(item);

        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].available, 7);
        assert_eq!(levels[0].location.name, "Shop floor");
        assert_eq!(levels[1].available, 0);
        assert_eq!(levels[1].location.id.numeric_id(), Some(2));
    }
}
