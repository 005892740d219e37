use axum::{
    Json, Router,
    routing::{get, patch, put},
};
use serde_json::{Value, json};

use crate::{
    http::handlers::{
        create_order_handler, create_product_handler, delete_product_handler,
        get_order_handler, get_product_handler, list_orders_handler, list_products_handler,
        rate_product_handler, update_order_status_handler, update_product_handler,
    },
    state::AppState,
};

pub fn create_http_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(version_handler))
        .route(
            "/products",
            get(list_products_handler).post(create_product_handler),
        )
        .route(
            "/products/{id}",
            get(get_product_handler)
                .put(update_product_handler)
                .delete(delete_product_handler),
        )
        .route("/products/{id}/rating", put(rate_product_handler))
        .route(
            "/orders",
            get(list_orders_handler).post(create_order_handler),
        )
        .route("/orders/{id}", get(get_order_handler))
        .route("/orders/{id}/status", patch(update_order_status_handler))
        .with_state(state)
}

async fn version_handler() -> Json<Value> {
    Json(json!({ "version": env!("CARGO_PKG_VERSION") }))
}
