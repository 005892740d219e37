use bb8::PooledConnection;
use bb8_redis::RedisConnectionManager;

use crate::{errors::AppError, state::RedisClient};

pub async fn get_connection(
    redis: &RedisClient,
) -> Result<PooledConnection<'_, RedisConnectionManager>, AppError> {
    redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })
}
