use uuid::Uuid;

use crate::{
    db::ProductStore,
    errors::AppError,
    models::{Product, Rating, RatingBounds},
};

#[derive(Debug, Clone)]
pub struct RatingSubmission {
    pub product_id: Uuid,
    pub rater_id: Uuid,
    pub star: i32,
    pub comment: String,
}

/// Records the rater's single rating on a product and refreshes its
/// `total_rating`.
///
/// An existing entry from the same rater is updated in place; otherwise a new
/// entry is appended. The aggregate is then recomputed from the stored ratings
/// and written back, so the call issues exactly two writes. `NotFound` and
/// `InvalidInput` reach the caller as is and every other failure comes back as
/// `Internal` with the original message.
///
/// Concurrent submissions need no coordination here. The append is an upsert
/// keyed on the rater, so two first submissions from one rater still leave a
/// single entry. The recomputation reads the ratings and stores the result in
/// one atomic store step, so the last refresh to run always reflects every
/// rating written before it.
pub async fn submit_rating(
    store: &dyn ProductStore,
    bounds: RatingBounds,
    submission: RatingSubmission,
) -> Result<Product, AppError> {
    bounds.check(submission.star)?;

    record_rating(store, submission)
        .await
        .map_err(AppError::into_internal)
}

async fn record_rating(
    store: &dyn ProductStore,
    submission: RatingSubmission,
) -> Result<Product, AppError> {
    let RatingSubmission {
        product_id,
        rater_id,
        star,
        comment,
    } = submission;

    let product = store
        .find_product(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;

    let already_rated = product.ratings.iter().any(|r| r.posted_by == rater_id);

    if already_rated {
        let updated = store
            .update_rating(product_id, rater_id, star, &comment)
            .await?;
        if !updated {
            tracing::warn!(
                "Rating by {} on product {} vanished before it could be updated",
                rater_id,
                product_id
            );
        }
    } else {
        let pushed = store
            .push_rating(product_id, &Rating::new(rater_id, star, comment))
            .await?;
        if !pushed {
            tracing::warn!("Product {} disappeared before rating was added", product_id);
        }
    }

    let product = store
        .refresh_total_rating(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Ratings not found".into()))?;

    tracing::debug!(
        "Product {} has {} ratings, total rating {}",
        product_id,
        product.ratings.len(),
        product.total_rating
    );

    Ok(product)
}
