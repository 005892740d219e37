use serde_json::Value;
use uuid::Uuid;

use crate::{
    db::{OrderStore, ProductStore},
    errors::AppError,
    models::{Order, OrderItem, OrderStatus, order::validate_items},
};

pub async fn create_order(
    orders: &dyn OrderStore,
    products: &dyn ProductStore,
    user_id: Uuid,
    items: Vec<OrderItem>,
    payment_intent: Option<Value>,
) -> Result<Order, AppError> {
    validate_items(&items)?;

    for item in &items {
        if products.find_product(item.product).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "the product with the id {} does not exist",
                item.product
            )));
        }
    }

    let order = Order::new(user_id, items, payment_intent);
    orders.insert_order(&order).await?;
    Ok(order)
}

pub async fn get_order(orders: &dyn OrderStore, order_id: Uuid) -> Result<Order, AppError> {
    orders
        .find_order(order_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {} not found", order_id)))
}

pub async fn list_user_orders(
    orders: &dyn OrderStore,
    user_id: Uuid,
) -> Result<Vec<Order>, AppError> {
    orders.find_orders_by_user(user_id).await
}

pub async fn update_order_status(
    orders: &dyn OrderStore,
    order_id: Uuid,
    status: OrderStatus,
) -> Result<Order, AppError> {
    orders
        .set_order_status(order_id, status)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {} not found", order_id)))
}
