//! Partial update input.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use stockroom_core::{DomainError, DomainResult};

/// Partial update of an inventory record.
///
/// Each field is tri-state: `None` means the key was omitted (keep the stored
/// value), `Some(None)` means an explicit `null` (clear it), `Some(Some(v))`
/// overwrites. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InventoryPatch {
    #[serde(default, deserialize_with = "present")]
    pub sku: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub product_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub factory_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub seller_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub url_key: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub available_qty: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub product_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub price_info: Option<Option<String>>,
}

/// Only invoked when the key exists, so a JSON `null` becomes `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl InventoryPatch {
    /// Parse an update body.
    ///
    /// The body must be a JSON object. `sku` may be changed but never nulled.
    pub fn from_json(body: &Value) -> DomainResult<Self> {
        if !body.is_object() {
            return Err(DomainError::validation("Expected a JSON object"));
        }

        let patch = Self::deserialize(body).map_err(|e| DomainError::validation(e.to_string()))?;
        if matches!(patch.sku, Some(None)) {
            return Err(DomainError::validation("sku cannot be null"));
        }

        Ok(patch)
    }
}
