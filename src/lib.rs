pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod http;
mod middleware;
pub mod models;
pub mod services;
pub mod state;

use axum::{Router, http::StatusCode, middleware as axum_middleware};
use bb8::Pool;
use bb8_redis::RedisConnectionManager;
use middleware::{cors_layer, create_global_rate_limiter, rate_limit_middleware};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;

use crate::{config::Config, db::RedisStore, errors::AppError, state::AppState};

pub async fn start_server() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    let manager = RedisConnectionManager::new(config.redis_url.clone())?;
    let redis_pool = Pool::builder().build(manager).await?;

    let port = config.port;
    let global_rate_limiter = create_global_rate_limiter(config.rate_limit_per_minute);
    let cors = cors_layer(&config.allowed_origins);
    let state = AppState::new(RedisStore::new(redis_pool), config);

    let app = Router::new()
        .merge(http::create_http_routes(state))
        .layer(axum_middleware::from_fn(move |req, next| {
            rate_limit_middleware(global_rate_limiter.clone(), req, next)
        }))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") });

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .map_err(|e| AppError::Internal(format!("Failed to bind address: {e}")))?;

    tracing::info!("Storefront server running at http://0.0.0.0:{port}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| AppError::Internal(format!("Server error: {e}")))
}
