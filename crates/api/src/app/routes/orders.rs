use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use mason_infra::services;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/:id/advance", post(advance_order))
}

pub async fn create_order(
    Extension(app): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CreateOrderRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match dto::parse_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let monument_type = match dto::parse_monument_type(&body.monument_type) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let material = match dto::parse_material(&body.material) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services::record_order(
        &*app.storage,
        &body.customer_name,
        monument_type,
        material,
        body.engraving_details,
    )
    .await
    {
        Ok(order) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_orders(Extension(app): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services::list_orders(&*app.storage).await {
        Ok(orders) => Json(orders).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn advance_order(
    Extension(app): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_order_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services::advance_order(&*app.storage, id).await {
        Ok(order) => Json(order).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
