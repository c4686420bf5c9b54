use serde::{Deserialize, Serialize};
use serde_json::Value;

use stockroom_core::{DomainError, DomainResult, InventoryId};

use crate::patch::InventoryPatch;

/// A persisted inventory row.
///
/// Every field is always serialized; absent optionals render as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub id: InventoryId,
    pub sku: String,
    pub name: Option<String>,
    pub product_name: Option<String>,
    pub factory_name: Option<String>,
    pub seller_name: Option<String>,
    pub url_key: Option<String>,
    pub available_qty: Option<f64>,
    pub product_url: Option<String>,
    pub price_info: Option<String>,
}

impl InventoryRecord {
    /// Materialize a record from creation input and a store-assigned id.
    pub fn from_new(id: InventoryId, new: NewInventory) -> Self {
        Self {
            id,
            sku: new.sku,
            name: new.name,
            product_name: new.product_name,
            factory_name: new.factory_name,
            seller_name: new.seller_name,
            url_key: new.url_key,
            available_qty: new.available_qty,
            product_url: new.product_url,
            price_info: new.price_info,
        }
    }

    /// Overwrite every field the patch mentions; leave the rest untouched.
    pub fn apply_patch(&mut self, patch: &InventoryPatch) {
        if let Some(Some(sku)) = &patch.sku {
            self.sku = sku.clone();
        }
        overwrite(&mut self.name, &patch.name);
        overwrite(&mut self.product_name, &patch.product_name);
        overwrite(&mut self.factory_name, &patch.factory_name);
        overwrite(&mut self.seller_name, &patch.seller_name);
        overwrite(&mut self.url_key, &patch.url_key);
        overwrite(&mut self.available_qty, &patch.available_qty);
        overwrite(&mut self.product_url, &patch.product_url);
        overwrite(&mut self.price_info, &patch.price_info);
    }
}

fn overwrite<T: Clone>(slot: &mut Option<T>, change: &Option<Option<T>>) {
    if let Some(value) = change {
        *slot = value.clone();
    }
}

/// Input for creating a record: every field except the id.
///
/// Unknown keys in the source JSON are ignored; missing optionals become `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInventory {
    pub sku: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub factory_name: Option<String>,
    #[serde(default)]
    pub seller_name: Option<String>,
    #[serde(default)]
    pub url_key: Option<String>,
    #[serde(default)]
    pub available_qty: Option<f64>,
    #[serde(default)]
    pub product_url: Option<String>,
    #[serde(default)]
    pub price_info: Option<String>,
}

impl NewInventory {
    /// A creation input carrying only the required `sku`.
    pub fn with_sku(sku: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            name: None,
            product_name: None,
            factory_name: None,
            seller_name: None,
            url_key: None,
            available_qty: None,
            product_url: None,
            price_info: None,
        }
    }

    /// Parse a single-item creation body.
    ///
    /// The body must be an object with a non-null `sku`; otherwise the request
    /// is rejected as missing required fields. Type mismatches on any field are
    /// validation errors.
    pub fn from_create_body(body: &Value) -> DomainResult<Self> {
        let obj = body.as_object().ok_or(DomainError::MissingRequiredFields)?;
        if obj.get("sku").is_none_or(Value::is_null) {
            return Err(DomainError::MissingRequiredFields);
        }

        Self::deserialize(body).map_err(|e| DomainError::validation(e.to_string()))
    }

    /// Map one element of a batch body into creation input.
    ///
    /// No required-field check happens up front; whatever the element cannot
    /// satisfy surfaces as a construction error carrying the underlying message.
    pub fn from_batch_element(element: &Value) -> DomainResult<Self> {
        Self::deserialize(element).map_err(|e| DomainError::construction(e.to_string()))
    }
}
