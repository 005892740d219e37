use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    auth::AuthClaims,
    errors::AppError,
    models::{Order, OrderItem, OrderStatus},
    services::order::{create_order, get_order, list_user_orders, update_order_status},
    state::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateOrderPayload {
    pub products: Vec<OrderItem>,
    pub payment_intent: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateOrderStatusPayload {
    pub order_status: OrderStatus,
}

pub async fn create_order_handler(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<Json<Order>, (StatusCode, String)> {
    let user_id = claims.user_id().map_err(|e| e.to_response())?;

    let order = create_order(
        state.orders.as_ref(),
        state.products.as_ref(),
        user_id,
        payload.products,
        payload.payment_intent,
    )
    .await
    .map_err(|e| {
        tracing::error!("Error creating order for {}: {}", user_id, e);
        e.to_response()
    })?;

    tracing::info!("Order {} created by {}", order.id, user_id);
    Ok(Json(order))
}

pub async fn list_orders_handler(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
) -> Result<Json<Vec<Order>>, (StatusCode, String)> {
    let user_id = claims.user_id().map_err(|e| e.to_response())?;

    let orders = list_user_orders(state.orders.as_ref(), user_id)
        .await
        .map_err(|e| {
            tracing::error!("Error listing orders for {}: {}", user_id, e);
            e.to_response()
        })?;

    Ok(Json(orders))
}

pub async fn get_order_handler(
    Path(order_id): Path<Uuid>,
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
) -> Result<Json<Order>, (StatusCode, String)> {
    let user_id = claims.user_id().map_err(|e| e.to_response())?;

    let order = get_order(state.orders.as_ref(), order_id)
        .await
        .and_then(|order| {
            // other users' orders look the same as missing ones
            if order.orderby == user_id {
                Ok(order)
            } else {
                Err(AppError::NotFound(format!("Order {} not found", order_id)))
            }
        })
        .map_err(|e| {
            tracing::error!("Error retrieving order {}: {}", order_id, e);
            e.to_response()
        })?;

    Ok(Json(order))
}

pub async fn update_order_status_handler(
    Path(order_id): Path<Uuid>,
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<UpdateOrderStatusPayload>,
) -> Result<Json<Order>, (StatusCode, String)> {
    let order = update_order_status(state.orders.as_ref(), order_id, payload.order_status)
        .await
        .map_err(|e| {
            tracing::error!("Error updating order {}: {}", order_id, e);
            e.to_response()
        })?;

    tracing::info!(
        "Order {} set to {:?} by {}",
        order_id,
        order.order_status,
        claims.sub
    );
    Ok(Json(order))
}
