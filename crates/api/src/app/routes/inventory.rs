use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use mason_infra::services;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/reorder", get(list_items_needing_reorder))
}

pub async fn create_item(
    Extension(app): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CreateInventoryItemRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match dto::parse_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services::record_inventory_item(
        &*app.storage,
        &body.material_name,
        body.quantity,
        body.reorder_level,
    )
    .await
    {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_items(Extension(app): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services::list_inventory_items(&*app.storage).await {
        Ok(items) => Json(items).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_items_needing_reorder(
    Extension(app): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services::items_needing_reorder(&*app.storage).await {
        Ok(items) => Json(items).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
