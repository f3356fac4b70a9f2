//! HTTP surface: router assembly and handlers.

mod auth;
mod cart;
mod orders;
mod products;

use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/profile", get(auth::profile).put(auth::update_profile))
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/:id",
            get(products::get_one).put(products::update).delete(products::remove),
        )
        .route("/cart", get(cart::get_cart).delete(cart::clear))
        .route("/cart/items", post(cart::add_item))
        .route("/cart/items/:id", put(cart::update_item).delete(cart::remove_item))
        .route("/orders/checkout", post(orders::checkout))
        .route("/orders", get(orders::list_own))
        .route("/orders/:id/items", get(orders::items))
        .route("/orders/:id/cancel", patch(orders::cancel))
        .route("/admin/orders/active", get(orders::admin_active))
        .route("/admin/orders/:id/status", patch(orders::admin_set_status))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "healthy", "service": "pede-pega"}))
}
