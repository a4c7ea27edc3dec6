//! Scanner JSON API.
//!
//! Handlers are stateless between requests: each one reads the request
//! body, talks to Shopify through [`AdminClient`](crate::shopify::AdminClient)
//! and maps failures onto [`AppError`].

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use pos_stocked_core::{InventoryItemId, InventoryLevel, ProductId, Variant, VariantId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::state::AppState;

const BARCODE_REQUIRED: &str = "barcode is required";
const INVENTORY_ITEM_ID_REQUIRED: &str = "inventoryItemId required";
const VARIANT_NOT_FOUND: &str = "Variant not found";

/// Body of `/api/scan` and `/api/stock`.
#[derive(Debug, Default, Deserialize)]
pub struct BarcodeRequest {
    #[serde(default)]
    pub barcode: Option<Value>,
}

/// Body of `/api/inventory`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRequest {
    #[serde(default)]
    pub inventory_item_id: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub variant: Variant,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockResponse {
    pub ok: bool,
    pub product_id: ProductId,
    pub variant_id: VariantId,
    pub tag: String,
}

#[derive(Debug, Serialize)]
pub struct InventoryResponse {
    pub ok: bool,
    pub levels: Vec<InventoryLevel>,
}

/// Look up the variant for a scanned barcode.
///
/// POST /api/scan
///
/// # Errors
///
/// 400 for a missing barcode, 404 when nothing matches exactly, 500 when the
/// lookup fails.
pub async fn scan(
    State(state): State<AppState>,
    payload: Result<Json<BarcodeRequest>, JsonRejection>,
) -> Result<Json<ScanResponse>, AppError> {
    let barcode = barcode_from(payload)?;
    let variant = find_variant(&state, &barcode).await?;

    Ok(Json(ScanResponse { variant }))
}

/// Tag the scanned variant's product as stocked.
///
/// POST /api/stock
///
/// # Errors
///
/// Same as [`scan`], plus 500 when tagging fails.
pub async fn stock(
    State(state): State<AppState>,
    payload: Result<Json<BarcodeRequest>, JsonRejection>,
) -> Result<Json<StockResponse>, AppError> {
    let barcode = barcode_from(payload)?;
    let variant = find_variant(&state, &barcode).await?;
    let tag = state.config().tag_name.clone();

    if let Err(e) = state
        .shopify()
        .add_tag_to_product(&variant.product.id, &tag)
        .await
    {
        tracing::warn!(
            product_id = %variant.product.id,
            variant_id = %variant.id,
            tag = %tag,
            error = %e,
            "Variant found but tagging failed"
        );
        return Err(e.into());
    }

    tracing::info!(
        product_id = %variant.product.id,
        variant_id = %variant.id,
        tag = %tag,
        "Product tagged as stocked"
    );

    Ok(Json(StockResponse {
        ok: true,
        product_id: variant.product.id,
        variant_id: variant.id,
        tag,
    }))
}

/// List inventory levels for an inventory item.
///
/// POST /api/inventory
///
/// Accepts a full GID or a bare numeric ID.
///
/// # Errors
///
/// 400 for a missing ID, 500 "Failed to fetch inventory" on any failure.
pub async fn inventory(
    State(state): State<AppState>,
    payload: Result<Json<InventoryRequest>, JsonRejection>,
) -> Result<Json<InventoryResponse>, AppError> {
    let raw = body_or_default(payload)
        .inventory_item_id
        .as_ref()
        .and_then(required_text)
        .ok_or_else(|| AppError::BadRequest(INVENTORY_ITEM_ID_REQUIRED.to_string()))?;

    let inventory_item_id = normalize_inventory_item_id(raw);

    let levels = state
        .shopify()
        .get_inventory_levels(&inventory_item_id)
        .await
        .map_err(AppError::Inventory)?;

    Ok(Json(InventoryResponse { ok: true, levels }))
}

async fn find_variant(state: &AppState, barcode: &str) -> Result<Variant, AppError> {
    state
        .shopify()
        .lookup_variant_by_barcode(barcode)
        .await?
        .ok_or_else(|| AppError::NotFound(VARIANT_NOT_FOUND.to_string()))
}

fn barcode_from(payload: Result<Json<BarcodeRequest>, JsonRejection>) -> Result<String, AppError> {
    body_or_default(payload)
        .barcode
        .as_ref()
        .and_then(required_text)
        .ok_or_else(|| AppError::BadRequest(BARCODE_REQUIRED.to_string()))
}

/// Unparseable or absent bodies are treated as an empty request.
fn body_or_default<T: Default>(payload: Result<Json<T>, JsonRejection>) -> T {
    match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Ignoring unreadable request body");
            T::default()
        }
    }
}

/// Trimmed text of a string or number field.
///
/// Blank strings and a numeric zero count as missing.
fn required_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) if n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON) => return None,
        Value::Number(n) => n.to_string(),
        _ => return None,
    };

    (!text.is_empty()).then_some(text)
}

fn normalize_inventory_item_id(raw: String) -> InventoryItemId {
    raw.parse::<u64>()
        .map_or_else(|_| InventoryItemId::new(raw), InventoryItemId::from_numeric)
}
