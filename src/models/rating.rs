use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: Uuid,
    pub posted_by: Uuid,
    pub star: i32,
    #[serde(default)]
    pub comment: String,
}

impl Rating {
    pub fn new(posted_by: Uuid, star: i32, comment: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            posted_by,
            star,
            comment,
        }
    }
}

/// Closed range of accepted star values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingBounds {
    pub min: i32,
    pub max: i32,
}

impl Default for RatingBounds {
    fn default() -> Self {
        Self { min: 1, max: 5 }
    }
}

impl RatingBounds {
    pub fn new(min: i32, max: i32) -> Result<Self, AppError> {
        if min > max {
            return Err(AppError::EnvError(format!(
                "Rating bounds are inverted: min {min} > max {max}"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn check(&self, star: i32) -> Result<(), AppError> {
        if (self.min..=self.max).contains(&star) {
            Ok(())
        } else {
            Err(AppError::InvalidInput(format!(
                "star must be between {} and {}, got {star}",
                self.min, self.max
            )))
        }
    }
}

/// Average star value rounded half to even, 0 when nothing has been rated.
///
/// Works on the exact integer sum so ties such as 4.5 are detected without
/// going through floating point.
pub fn aggregate_rating(ratings: &[Rating]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }

    let sum: i64 = ratings.iter().map(|r| i64::from(r.star)).sum();
    let count = ratings.len() as i64;

    let quotient = sum.div_euclid(count);
    let remainder = sum.rem_euclid(count);

    let rounded = match (2 * remainder).cmp(&count) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal if quotient.rem_euclid(2) == 0 => quotient,
        std::cmp::Ordering::Equal => quotient + 1,
    };

    // the mean of i32 values always fits back into i32
    rounded as i32
}
