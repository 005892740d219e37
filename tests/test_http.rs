use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use storefront_be::{
    auth::AuthClaims,
    config::Config,
    db::{MemoryStore, ProductStore},
    errors::AppError,
    http::handlers::{
        get_order_handler, get_product_handler, rating::RateProductPayload, rate_product_handler,
    },
    models::{Claims, NewProduct, OrderItem},
    services::{order::create_order, product::create_product},
    state::AppState,
};
use uuid::Uuid;

const SECRET: &str = "test-secret";

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn test_config() -> Config {
    Config::from_vars(&vars(&[
        ("REDIS_URL", "redis://127.0.0.1/"),
        ("JWT_SECRET", SECRET),
    ]))
    .unwrap()
}

fn claims_for(user_id: Uuid) -> Claims {
    Claims {
        sub: user_id.to_string(),
        exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
    }
}

async fn app_with_product() -> (AppState, MemoryStore, Uuid) {
    let store = MemoryStore::new();
    let product = create_product(
        &store,
        NewProduct {
            title: "Headphones".into(),
            description: "Over-ear".into(),
            price: 120.0,
            category: "audio".into(),
            brand: "Hush".into(),
            quantity: 8,
        },
    )
    .await
    .unwrap();
    let state = AppState::new(store.clone(), test_config());
    (state, store, product.id)
}

#[test]
fn test_config_defaults() {
    let config = test_config();

    assert_eq!(config.port, 3001);
    assert_eq!(config.allowed_origins, vec!["http://localhost:3000".to_string()]);
    assert_eq!(config.rate_limit_per_minute, 1000);
    assert_eq!(config.rating_bounds.min, 1);
    assert_eq!(config.rating_bounds.max, 5);
}

#[test]
fn test_config_overrides() {
    let config = Config::from_vars(&vars(&[
        ("REDIS_URL", "redis://cache:6379/"),
        ("JWT_SECRET", SECRET),
        ("PORT", "8080"),
        ("ALLOWED_ORIGINS", "https://shop.example, https://admin.example"),
        ("RATING_MIN", "0"),
        ("RATING_MAX", "10"),
    ]))
    .unwrap();

    assert_eq!(config.port, 8080);
    assert_eq!(
        config.allowed_origins,
        vec![
            "https://shop.example".to_string(),
            "https://admin.example".to_string()
        ]
    );
    assert_eq!(config.rating_bounds.max, 10);
}

#[test]
fn test_config_errors() {
    let missing = Config::from_vars(&vars(&[("JWT_SECRET", SECRET)]));
    assert!(matches!(missing, Err(AppError::EnvError(_))));

    let bad_port = Config::from_vars(&vars(&[
        ("REDIS_URL", "redis://127.0.0.1/"),
        ("JWT_SECRET", SECRET),
        ("PORT", "eighty"),
    ]));
    assert!(matches!(bad_port, Err(AppError::EnvError(_))));

    let inverted = Config::from_vars(&vars(&[
        ("REDIS_URL", "redis://127.0.0.1/"),
        ("JWT_SECRET", SECRET),
        ("RATING_MIN", "5"),
        ("RATING_MAX", "1"),
    ]));
    assert!(matches!(inverted, Err(AppError::EnvError(_))));
}

#[test]
fn test_error_status_codes() {
    let cases = [
        (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
        (AppError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
        (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
        (AppError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
        (AppError::NoContent("x".into()), StatusCode::NO_CONTENT),
        (AppError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        (
            AppError::RedisPoolError("x".into()),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (error, status) in cases {
        assert_eq!(error.to_response(), (status, "x".to_string()));
    }
}

#[test]
fn test_into_internal_keeps_caller_facing_kinds() {
    assert!(matches!(
        AppError::NotFound("gone".into()).into_internal(),
        AppError::NotFound(_)
    ));
    match AppError::Serialization("bad bytes".into()).into_internal() {
        AppError::Internal(msg) => assert_eq!(msg, "Serialization error: bad bytes"),
        other => panic!("expected internal, got {:?}", other),
    }
}

#[test]
fn test_token_verification() {
    let user = Uuid::new_v4();
    let token = encode(
        &Header::default(),
        &claims_for(user),
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    let AuthClaims(claims) = AuthClaims::from_token(&token, SECRET).unwrap();
    assert_eq!(claims.user_id().unwrap(), user);

    let rejected = AuthClaims::from_token(&token, "another-secret");
    assert_eq!(rejected.err().map(|(status, _)| status), Some(StatusCode::UNAUTHORIZED));
}

#[test]
fn test_expired_token_is_rejected() {
    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        exp: (Utc::now() - Duration::hours(2)).timestamp() as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    assert!(AuthClaims::from_token(&token, SECRET).is_err());
}

#[tokio::test]
async fn test_rate_handler_uses_token_subject() {
    let (state, store, product_id) = app_with_product().await;
    let rater = Uuid::new_v4();

    let Json(product) = rate_product_handler(
        Path(product_id),
        State(state.clone()),
        AuthClaims(claims_for(rater)),
        Json(RateProductPayload {
            star: 5,
            comment: "great".into(),
        }),
    )
    .await
    .unwrap();

    assert_eq!(product.total_rating, 5);
    assert_eq!(product.ratings[0].posted_by, rater);

    let stored = store.find_product(product_id).await.unwrap().unwrap();
    assert_eq!(stored.total_rating, 5);
}

#[tokio::test]
async fn test_rate_handler_error_statuses() {
    let (state, _store, product_id) = app_with_product().await;
    let payload = || {
        Json(RateProductPayload {
            star: 3,
            comment: String::new(),
        })
    };

    let missing = rate_product_handler(
        Path(Uuid::new_v4()),
        State(state.clone()),
        AuthClaims(claims_for(Uuid::new_v4())),
        payload(),
    )
    .await;
    assert_eq!(missing.err().map(|(s, _)| s), Some(StatusCode::NOT_FOUND));

    let out_of_range = rate_product_handler(
        Path(product_id),
        State(state.clone()),
        AuthClaims(claims_for(Uuid::new_v4())),
        Json(RateProductPayload {
            star: 9,
            comment: String::new(),
        }),
    )
    .await;
    assert_eq!(out_of_range.err().map(|(s, _)| s), Some(StatusCode::BAD_REQUEST));

    let bad_subject = rate_product_handler(
        Path(product_id),
        State(state),
        AuthClaims(Claims {
            sub: "not-a-uuid".into(),
            exp: usize::MAX,
        }),
        payload(),
    )
    .await;
    assert_eq!(bad_subject.err().map(|(s, _)| s), Some(StatusCode::UNAUTHORIZED));
}

#[test]
fn test_rate_payload_rejects_extra_fields() {
    let payload: Result<RateProductPayload, _> =
        serde_json::from_value(serde_json::json!({ "star": 4, "postedBy": "someone" }));
    assert!(payload.is_err());

    let payload: RateProductPayload =
        serde_json::from_value(serde_json::json!({ "star": 4 })).unwrap();
    assert_eq!(payload.comment, "");
}

#[tokio::test]
async fn test_get_product_handler_not_found() {
    let (state, _store, product_id) = app_with_product().await;

    let found = get_product_handler(Path(product_id), State(state.clone())).await;
    assert!(found.is_ok());

    let missing = get_product_handler(Path(Uuid::new_v4()), State(state)).await;
    assert_eq!(missing.err().map(|(s, _)| s), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn test_order_is_hidden_from_other_users() {
    let (state, store, product_id) = app_with_product().await;
    let owner = Uuid::new_v4();
    let order = create_order(
        &store,
        &store,
        owner,
        vec![OrderItem {
            product: product_id,
            count: 1,
            color: None,
        }],
        None,
    )
    .await
    .unwrap();

    let own = get_order_handler(
        Path(order.id),
        State(state.clone()),
        AuthClaims(claims_for(owner)),
    )
    .await;
    assert!(own.is_ok());

    let other = get_order_handler(
        Path(order.id),
        State(state),
        AuthClaims(claims_for(Uuid::new_v4())),
    )
    .await;
    assert_eq!(other.err().map(|(s, _)| s), Some(StatusCode::NOT_FOUND));
}
