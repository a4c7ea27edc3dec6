//! Newtype IDs for Shopify global identifiers.
//!
//! Shopify addresses every object with a GID string such as
//! `gid://shopify/Product/123`. Use the `define_gid!` macro to create
//! type-safe wrappers that prevent accidentally mixing IDs from different
//! resource types.

/// Prefix shared by every Shopify global ID.
pub const GID_PREFIX: &str = "gid://shopify/";

/// Macro to define a type-safe Shopify GID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `numeric_id()`
/// - `From<String>`, `From<&str>` and `Into<String>` implementations
///
/// # Example
///
/// ```rust
/// # use pos_stocked_core::define_gid;
/// define_gid!(ProductId, "Product");
/// define_gid!(VariantId, "ProductVariant");
///
/// let product_id = ProductId::new("gid://shopify/Product/1");
/// assert_eq!(product_id.numeric_id(), Some(1));
///
/// // These are different types, so this won't compile:
/// // let _: VariantId = product_id;
/// ```
#[macro_export]
macro_rules! define_gid {
    ($name:ident, $resource:literal) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a GID string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Build a GID from a bare numeric ID.
            #[must_use]
            pub fn from_numeric(id: u64) -> Self {
                Self(format!("{}{}/{id}", $crate::types::id::GID_PREFIX, $resource))
            }

            /// Get the underlying GID string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Trailing numeric segment of the GID, if it has one.
            #[must_use]
            pub fn numeric_id(&self) -> Option<u64> {
                $crate::types::id::trailing_numeric_id(&self.0)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

/// Extract the numeric segment from a GID like `gid://shopify/Product/123`.
///
/// Query strings (`?inventory_item_id=...`) are ignored.
#[must_use]
pub fn trailing_numeric_id(gid: &str) -> Option<u64> {
    let path = gid.split('?').next().unwrap_or(gid);
    path.rsplit('/').next()?.parse().ok()
}

define_gid!(ProductId, "Product");
define_gid!(VariantId, "ProductVariant");
define_gid!(InventoryItemId, "InventoryItem");
define_gid!(LocationId, "Location");
