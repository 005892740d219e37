use uuid::Uuid;

use crate::{
    db::{product::get::read_product, redis_client::get_connection},
    errors::AppError,
    models::{Product, redis::RedisKey},
    state::RedisClient,
};

pub async fn delete_product(
    product_id: Uuid,
    redis: RedisClient,
) -> Result<Option<Product>, AppError> {
    let mut conn = get_connection(&redis).await?;

    let Some(product) = read_product(&mut *conn, product_id).await? else {
        return Ok(None);
    };

    let _: () = redis::pipe()
        .atomic()
        .del(RedisKey::product(product_id))
        .ignore()
        .del(RedisKey::product_ratings(product_id))
        .ignore()
        .srem(RedisKey::products(), product_id.to_string())
        .ignore()
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    tracing::debug!(
        "Removed product {} and {} ratings",
        product_id,
        product.ratings.len()
    );

    Ok(Some(product))
}
