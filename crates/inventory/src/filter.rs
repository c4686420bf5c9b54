//! List filtering.

use crate::record::InventoryRecord;

/// Which records a list request selects.
///
/// Precedence follows the query: an exact `sku` wins over a `product_name`
/// substring; with neither, everything is returned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InventoryFilter {
    #[default]
    All,
    /// Exact, case-sensitive match on `sku`.
    Sku(String),
    /// Case-insensitive substring match on `product_name`.
    ProductNameContains(String),
}

impl InventoryFilter {
    /// Build a filter from raw query values. Empty strings count as absent.
    pub fn from_query(sku: Option<&str>, product_name: Option<&str>) -> Self {
        match (non_empty(sku), non_empty(product_name)) {
            (Some(sku), _) => Self::Sku(sku.to_string()),
            (None, Some(needle)) => Self::ProductNameContains(needle.to_string()),
            (None, None) => Self::All,
        }
    }

    pub fn matches(&self, record: &InventoryRecord) -> bool {
        match self {
            Self::All => true,
            Self::Sku(sku) => record.sku == *sku,
            Self::ProductNameContains(needle) => record
                .product_name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&needle.to_lowercase())),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
