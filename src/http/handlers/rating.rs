use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::AuthClaims,
    models::Product,
    services::{RatingSubmission, submit_rating},
    state::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RateProductPayload {
    pub star: i32,
    #[serde(default)]
    pub comment: String,
}

pub async fn rate_product_handler(
    Path(product_id): Path<Uuid>,
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<RateProductPayload>,
) -> Result<Json<Product>, (StatusCode, String)> {
    let rater_id = claims.user_id().map_err(|e| e.to_response())?;

    let submission = RatingSubmission {
        product_id,
        rater_id,
        star: payload.star,
        comment: payload.comment,
    };

    let product = submit_rating(
        state.products.as_ref(),
        state.config.rating_bounds,
        submission,
    )
    .await
    .map_err(|e| {
        tracing::error!("Error rating product {}: {}", product_id, e);
        e.to_response()
    })?;

    tracing::info!(
        "User {} rated product {}, total rating now {}",
        rater_id,
        product_id,
        product.total_rating
    );
    Ok(Json(product))
}
