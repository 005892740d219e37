use uuid::Uuid;

use crate::{
    db::redis_client::get_connection,
    errors::AppError,
    models::{Order, redis::RedisKey},
    state::RedisClient,
};

pub async fn create_order(order: &Order, redis: RedisClient) -> Result<Uuid, AppError> {
    let mut conn = get_connection(&redis).await?;

    let order_json =
        serde_json::to_string(order).map_err(|e| AppError::Serialization(e.to_string()))?;

    let _: () = redis::pipe()
        .atomic()
        .set(RedisKey::order(order.id), order_json)
        .ignore()
        .sadd(RedisKey::user_orders(order.orderby), order.id.to_string())
        .ignore()
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(order.id)
}
