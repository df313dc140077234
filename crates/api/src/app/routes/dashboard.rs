use std::sync::Arc;

use axum::{extract::Extension, response::IntoResponse, Json};

use mason_infra::services;

use crate::app::errors;
use crate::app::services::AppServices;

pub async fn get_dashboard(
    Extension(app): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services::compute_dashboard_metrics(&*app.storage).await {
        Ok(metrics) => Json(metrics).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
