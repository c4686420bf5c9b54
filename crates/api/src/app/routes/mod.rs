use axum::{
    routing::{get, post},
    Router,
};

pub mod inventory;
pub mod system;

/// Router for every endpoint the service exposes.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::home))
        .route("/health", get(system::health))
        .route("/inventory", get(inventory::list_inventory).post(inventory::create_inventory))
        .route("/inventory/batch", post(inventory::create_inventory_batch))
        .route(
            "/inventory/:id",
            get(inventory::get_inventory)
                .put(inventory::update_inventory)
                .delete(inventory::delete_inventory),
        )
}
