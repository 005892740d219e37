use once_cell::sync::Lazy;
use redis::Script;
use uuid::Uuid;

use crate::{
    db::redis_client::get_connection,
    errors::AppError,
    models::{Product, Rating, redis::RedisKey},
    state::RedisClient,
};

// Adds the rating of ARGV[2] to the product. An entry already posted by the
// same rater is rewritten in place instead, so a rater never holds two entries.
static PUSH_RATING: Lazy<Script> = Lazy::new(|| {
    Script::new(
        r"
        if redis.call('EXISTS', KEYS[1]) == 0 then
            return 0
        end
        local entries = redis.call('LRANGE', KEYS[2], 0, -1)
        for index, raw in ipairs(entries) do
            local entry = cjson.decode(raw)
            if entry.postedBy == ARGV[2] then
                entry.star = tonumber(ARGV[3])
                entry.comment = ARGV[4]
                redis.call('LSET', KEYS[2], index - 1, cjson.encode(entry))
                return 1
            end
        end
        redis.call('RPUSH', KEYS[2], ARGV[1])
        return 1
        ",
    )
});

pub async fn create_product(product: &Product, redis: RedisClient) -> Result<Uuid, AppError> {
    let mut conn = get_connection(&redis).await?;

    let fields: Vec<(String, String)> = product.to_redis_hash().into_iter().collect();

    let _: () = redis::pipe()
        .atomic()
        .hset_multiple(RedisKey::product(product.id), fields.as_slice())
        .ignore()
        .sadd(RedisKey::products(), product.id.to_string())
        .ignore()
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(product.id)
}

/// Appends a rating entry, or updates the rater's existing entry in place.
/// Returns `false` without writing when the product does not exist.
pub async fn push_rating(
    product_id: Uuid,
    rating: &Rating,
    redis: RedisClient,
) -> Result<bool, AppError> {
    let mut conn = get_connection(&redis).await?;

    let entry =
        serde_json::to_string(rating).map_err(|e| AppError::Serialization(e.to_string()))?;

    let pushed: i32 = PUSH_RATING
        .key(RedisKey::product(product_id))
        .key(RedisKey::product_ratings(product_id))
        .arg(entry)
        .arg(rating.posted_by.to_string())
        .arg(rating.star)
        .arg(&rating.comment)
        .invoke_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(pushed == 1)
}
