use chrono::Utc;
use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    db::{order::get::read_order, redis_client::get_connection},
    errors::AppError,
    models::{Order, OrderStatus, redis::RedisKey},
    state::RedisClient,
};

pub async fn update_order_status(
    order_id: Uuid,
    status: OrderStatus,
    redis: RedisClient,
) -> Result<Option<Order>, AppError> {
    let mut conn = get_connection(&redis).await?;

    let Some(mut order) = read_order(&mut *conn, order_id).await? else {
        return Ok(None);
    };

    order.order_status = status;
    order.updated_at = Utc::now();

    let order_json =
        serde_json::to_string(&order).map_err(|e| AppError::Serialization(e.to_string()))?;

    let _: () = conn
        .set(RedisKey::order(order_id), order_json)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(Some(order))
}
