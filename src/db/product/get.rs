use redis::{AsyncCommands, aio::ConnectionLike};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    db::redis_client::get_connection,
    errors::AppError,
    models::{Product, ProductQuery, Rating, redis::RedisKey},
    state::RedisClient,
};

pub async fn get_product(
    product_id: Uuid,
    redis: RedisClient,
) -> Result<Option<Product>, AppError> {
    let mut conn = get_connection(&redis).await?;
    read_product(&mut *conn, product_id).await
}

/// Returns the requested page of products.
///
/// Filtering and sorting only need the scalar fields, so all hashes are fetched
/// in one pipeline and the ratings lists are loaded for the page alone.
pub async fn get_products(
    query: &ProductQuery,
    redis: RedisClient,
) -> Result<Vec<Product>, AppError> {
    let mut conn = get_connection(&redis).await?;

    let raw_ids: Vec<String> = conn
        .smembers(RedisKey::products())
        .await
        .map_err(AppError::RedisCommandError)?;

    let ids: Vec<Uuid> = raw_ids
        .iter()
        .filter_map(|id_str| match Uuid::parse_str(id_str) {
            Ok(id) => Some(id),
            Err(_) => {
                tracing::warn!("Skipping malformed product id in index: {}", id_str);
                None
            }
        })
        .collect();

    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut pipe = redis::pipe();
    for id in &ids {
        pipe.hgetall(RedisKey::product(*id));
    }
    let maps: Vec<HashMap<String, String>> = pipe
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    let mut products = Vec::with_capacity(maps.len());
    for (id, map) in ids.iter().zip(maps) {
        if map.is_empty() {
            tracing::debug!("Product {} is indexed but has no document", id);
            continue;
        }
        products.push(Product::from_redis_hash(&map, Vec::new())?);
    }

    let mut page = query.apply(products);
    if page.is_empty() {
        return Ok(page);
    }

    let mut pipe = redis::pipe();
    for product in &page {
        pipe.lrange(RedisKey::product_ratings(product.id), 0, -1);
    }
    let raw_ratings: Vec<Vec<String>> = pipe
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    for (product, raw) in page.iter_mut().zip(raw_ratings) {
        product.ratings = parse_ratings(&raw)?;
    }

    Ok(page)
}

/// Reads the product hash and its ratings list in one MULTI block.
pub(crate) async fn read_product<C: ConnectionLike>(
    conn: &mut C,
    product_id: Uuid,
) -> Result<Option<Product>, AppError> {
    let (map, raw_ratings): (HashMap<String, String>, Vec<String>) = redis::pipe()
        .atomic()
        .hgetall(RedisKey::product(product_id))
        .lrange(RedisKey::product_ratings(product_id), 0, -1)
        .query_async(conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    if map.is_empty() {
        return Ok(None);
    }

    let ratings = parse_ratings(&raw_ratings)?;
    Product::from_redis_hash(&map, ratings).map(Some)
}

fn parse_ratings(raw: &[String]) -> Result<Vec<Rating>, AppError> {
    raw.iter()
        .map(|entry| {
            serde_json::from_str::<Rating>(entry)
                .map_err(|e| AppError::Deserialization(format!("Invalid rating entry: {}", e)))
        })
        .collect()
}
