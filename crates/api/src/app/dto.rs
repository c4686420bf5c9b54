use axum::body::Bytes;
use serde_json::{json, Value};

use stockroom_inventory::InventoryFilter;

use crate::app::errors::ApiError;

// -------------------------
// Request DTOs
// -------------------------

/// Query string of `GET /inventory`.
#[derive(Debug, Default)]
pub struct ListInventoryQuery {
    pub sku: Option<String>,
    pub product_name: Option<String>,
}

impl ListInventoryQuery {
    /// Build from decoded query pairs. A repeated key keeps its first value;
    /// unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "sku" => &mut query.sku,
                "product_name" => &mut query.product_name,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }

    pub fn into_filter(self) -> InventoryFilter {
        InventoryFilter::from_query(self.sku.as_deref(), self.product_name.as_deref())
    }
}

/// Parse a raw request body as JSON.
///
/// An empty body reads as `null` so each operation reports its own
/// "what was expected" error instead of a generic parse failure.
pub fn parse_json_body(body: &Bytes) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(|e| ApiError::validation(format!("Invalid JSON body: {e}")))
}

// -------------------------
// Response helpers
// -------------------------

pub fn message(text: impl Into<String>) -> Value {
    json!({ "message": text.into() })
}
