use axum::{routing::get, Router};

pub mod dashboard;
pub mod inventory;
pub mod orders;
pub mod system;
pub mod users;

/// Router for the four screens of the shop front end.
pub fn router() -> Router {
    Router::new()
        .route("/dashboard", get(dashboard::get_dashboard))
        .nest("/orders", orders::router())
        .nest("/inventory", inventory::router())
        .nest("/users", users::router())
}
