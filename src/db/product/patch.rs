use chrono::Utc;
use once_cell::sync::Lazy;
use redis::Script;
use uuid::Uuid;

use crate::{
    db::{product::get::read_product, redis_client::get_connection},
    errors::AppError,
    models::{Product, ProductUpdate, redis::RedisKey},
    state::RedisClient,
};

// Rewrites star and comment of the entry posted by ARGV[1], leaving its id and
// list position untouched.
static UPDATE_RATING: Lazy<Script> = Lazy::new(|| {
    Script::new(
        r"
        if redis.call('EXISTS', KEYS[1]) == 0 then
            return 0
        end
        local entries = redis.call('LRANGE', KEYS[2], 0, -1)
        for index, raw in ipairs(entries) do
            local entry = cjson.decode(raw)
            if entry.postedBy == ARGV[1] then
                entry.star = tonumber(ARGV[2])
                entry.comment = ARGV[3]
                redis.call('LSET', KEYS[2], index - 1, cjson.encode(entry))
                return 1
            end
        end
        return 0
        ",
    )
});

// Recomputes total_rating from the stored entries: the mean star rounded half
// to even, 0 for no entries.
static REFRESH_TOTAL_RATING: Lazy<Script> = Lazy::new(|| {
    Script::new(
        r"
        if redis.call('EXISTS', KEYS[1]) == 0 then
            return 0
        end
        local entries = redis.call('LRANGE', KEYS[2], 0, -1)
        local count = #entries
        local total = 0
        if count > 0 then
            local sum = 0
            for _, raw in ipairs(entries) do
                sum = sum + cjson.decode(raw).star
            end
            total = math.floor(sum / count)
            local twice_remainder = 2 * (sum - total * count)
            if twice_remainder > count or (twice_remainder == count and total % 2 ~= 0) then
                total = total + 1
            end
        end
        redis.call('HSET', KEYS[1], 'total_rating', string.format('%d', total), 'updated_at', ARGV[1])
        return 1
        ",
    )
});

static SET_FIELDS_IF_EXISTS: Lazy<Script> = Lazy::new(|| {
    Script::new(
        r"
        if redis.call('EXISTS', KEYS[1]) == 0 then
            return 0
        end
        redis.call('HSET', KEYS[1], unpack(ARGV))
        return 1
        ",
    )
});

pub async fn update_rating(
    product_id: Uuid,
    rater_id: Uuid,
    star: i32,
    comment: &str,
    redis: RedisClient,
) -> Result<bool, AppError> {
    let mut conn = get_connection(&redis).await?;

    let matched: i32 = UPDATE_RATING
        .key(RedisKey::product(product_id))
        .key(RedisKey::product_ratings(product_id))
        .arg(rater_id.to_string())
        .arg(star)
        .arg(comment)
        .invoke_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(matched == 1)
}

/// Recomputes and stores the aggregate in one script run, so it always
/// reflects the ratings present at that moment.
pub async fn refresh_total_rating(
    product_id: Uuid,
    redis: RedisClient,
) -> Result<Option<Product>, AppError> {
    let mut conn = get_connection(&redis).await?;

    let refreshed: i32 = REFRESH_TOTAL_RATING
        .key(RedisKey::product(product_id))
        .key(RedisKey::product_ratings(product_id))
        .arg(Utc::now().to_rfc3339())
        .invoke_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    if refreshed == 0 {
        return Ok(None);
    }

    read_product(&mut *conn, product_id).await
}

pub async fn update_product(
    product_id: Uuid,
    update: &ProductUpdate,
    redis: RedisClient,
) -> Result<Option<Product>, AppError> {
    let fields = update.to_redis_fields(Utc::now());
    set_fields(product_id, &fields, redis).await
}

async fn set_fields(
    product_id: Uuid,
    fields: &[(String, String)],
    redis: RedisClient,
) -> Result<Option<Product>, AppError> {
    let mut conn = get_connection(&redis).await?;

    let mut invocation = SET_FIELDS_IF_EXISTS.prepare_invoke();
    invocation.key(RedisKey::product(product_id));
    for (field, value) in fields {
        invocation.arg(field).arg(value);
    }

    let updated: i32 = invocation
        .invoke_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    if updated == 0 {
        return Ok(None);
    }

    read_product(&mut *conn, product_id).await
}
