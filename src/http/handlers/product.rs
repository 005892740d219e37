use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    auth::AuthClaims,
    models::{NewProduct, Product, ProductQuery, ProductUpdate},
    services::product::{
        create_product, delete_product, get_product, list_products, update_product,
    },
    state::AppState,
};

pub async fn create_product_handler(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<NewProduct>,
) -> Result<Json<Product>, (StatusCode, String)> {
    let product = create_product(state.products.as_ref(), payload)
        .await
        .map_err(|e| {
            tracing::error!("Error creating product: {}", e);
            e.to_response()
        })?;

    tracing::info!("Product {} created by {}", product.id, claims.sub);
    Ok(Json(product))
}

pub async fn list_products_handler(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>, (StatusCode, String)> {
    let products = list_products(state.products.as_ref(), &query)
        .await
        .map_err(|e| {
            tracing::error!("Error listing products: {}", e);
            e.to_response()
        })?;

    tracing::info!("Listed {} products", products.len());
    Ok(Json(products))
}

pub async fn get_product_handler(
    Path(product_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<Product>, (StatusCode, String)> {
    let product = get_product(state.products.as_ref(), product_id)
        .await
        .map_err(|e| {
            tracing::error!("Error retrieving product {}: {}", product_id, e);
            e.to_response()
        })?;

    Ok(Json(product))
}

pub async fn update_product_handler(
    Path(product_id): Path<Uuid>,
    State(state): State<AppState>,
    AuthClaims(_claims): AuthClaims,
    Json(payload): Json<ProductUpdate>,
) -> Result<Json<Product>, (StatusCode, String)> {
    let product = update_product(state.products.as_ref(), product_id, &payload)
        .await
        .map_err(|e| {
            tracing::error!("Error updating product {}: {}", product_id, e);
            e.to_response()
        })?;

    tracing::info!("Product {} updated", product_id);
    Ok(Json(product))
}

pub async fn delete_product_handler(
    Path(product_id): Path<Uuid>,
    State(state): State<AppState>,
    AuthClaims(_claims): AuthClaims,
) -> Result<Json<Product>, (StatusCode, String)> {
    let product = delete_product(state.products.as_ref(), product_id)
        .await
        .map_err(|e| {
            tracing::error!("Error deleting product {}: {}", product_id, e);
            e.to_response()
        })?;

    tracing::info!("Product {} deleted", product_id);
    Ok(Json(product))
}
