use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::app::dto;

pub async fn home() -> impl IntoResponse {
    Json(dto::message("This is a fake inventory API"))
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
