use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::Deserialize;

use mason_core::OrderId;
use mason_orders::{Material, MonumentType};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub monument_type: String,
    pub material: String,
    #[serde(default)]
    pub engraving_details: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateInventoryItemRequest {
    pub material_name: String,
    pub quantity: f64,
    #[serde(default)]
    pub reorder_level: f64,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub role: String,
}

// -------------------------
// Parsing helpers
// -------------------------

pub fn parse_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, axum::response::Response> {
    body.map(|Json(v)| v)
        .map_err(errors::json_rejection_to_response)
}

pub fn parse_monument_type(s: &str) -> Result<MonumentType, axum::response::Response> {
    s.parse().map_err(errors::domain_error_to_response)
}

pub fn parse_material(s: &str) -> Result<Material, axum::response::Response> {
    s.parse().map_err(errors::domain_error_to_response)
}

pub fn parse_order_id(s: &str) -> Result<OrderId, axum::response::Response> {
    s.parse().map_err(errors::domain_error_to_response)
}
