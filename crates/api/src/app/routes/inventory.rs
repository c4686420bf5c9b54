use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use stockroom_core::InventoryId;
use stockroom_inventory::{InventoryPatch, NewInventory};

use crate::app::dto;
use crate::app::errors::{ApiError, EXPECTED_LIST_MESSAGE};
use crate::app::services::AppServices;

pub async fn list_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<axum::response::Response, ApiError> {
    let query = dto::ListInventoryQuery::from_pairs(pairs);
    let records = services.inventory_list(&query.into_filter()).await?;
    Ok((StatusCode::OK, Json(records)).into_response())
}

pub async fn get_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<axum::response::Response, ApiError> {
    let id: InventoryId = id.parse()?;
    let record = services.inventory_get(id).await?;
    Ok((StatusCode::OK, Json(record)).into_response())
}

pub async fn create_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> Result<axum::response::Response, ApiError> {
    let body = dto::parse_json_body(&body)?;
    let new = NewInventory::from_create_body(&body)?;

    let record = services.inventory_create(new).await?;
    Ok((StatusCode::CREATED, Json(record)).into_response())
}

pub async fn create_inventory_batch(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> Result<axum::response::Response, ApiError> {
    let Value::Array(elements) = dto::parse_json_body(&body)? else {
        return Err(ApiError::validation(EXPECTED_LIST_MESSAGE));
    };

    // First bad element aborts the batch before anything is written.
    let items = elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            NewInventory::from_batch_element(element).inspect_err(|e| {
                tracing::warn!(index, error = %e, "rejecting inventory batch");
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let added = services.inventory_create_batch(items).await?;
    Ok((
        StatusCode::CREATED,
        Json(dto::message(format!("{added} items added"))),
    )
        .into_response())
}

pub async fn update_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<axum::response::Response, ApiError> {
    let id: InventoryId = id.parse()?;
    let body = dto::parse_json_body(&body)?;
    let patch = InventoryPatch::from_json(&body)?;

    let record = services.inventory_update(id, &patch).await?;
    Ok((StatusCode::OK, Json(record)).into_response())
}

pub async fn delete_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<axum::response::Response, ApiError> {
    let id: InventoryId = id.parse()?;
    services.inventory_delete(id).await?;
    Ok((StatusCode::OK, Json(dto::message("Inventory deleted"))).into_response())
}
