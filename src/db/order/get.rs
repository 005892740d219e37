use redis::{AsyncCommands, aio::ConnectionLike};
use uuid::Uuid;

use crate::{
    db::redis_client::get_connection,
    errors::AppError,
    models::{Order, redis::RedisKey},
    state::RedisClient,
};

pub async fn get_order(order_id: Uuid, redis: RedisClient) -> Result<Option<Order>, AppError> {
    let mut conn = get_connection(&redis).await?;
    read_order(&mut *conn, order_id).await
}

pub async fn get_user_orders(user_id: Uuid, redis: RedisClient) -> Result<Vec<Order>, AppError> {
    let mut conn = get_connection(&redis).await?;

    let ids: Vec<String> = conn
        .smembers(RedisKey::user_orders(user_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    let mut orders = Vec::new();
    for id_str in ids {
        if let Ok(order_id) = Uuid::parse_str(&id_str) {
            if let Some(order) = read_order(&mut *conn, order_id).await? {
                orders.push(order);
            }
        }
    }

    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(orders)
}

pub(crate) async fn read_order<C: ConnectionLike + Send + Sync>(
    conn: &mut C,
    order_id: Uuid,
) -> Result<Option<Order>, AppError> {
    let json: Option<String> = conn
        .get(RedisKey::order(order_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    json.map(|json| {
        serde_json::from_str(&json)
            .map_err(|e| AppError::Deserialization(format!("Invalid order data: {}", e)))
    })
    .transpose()
}
