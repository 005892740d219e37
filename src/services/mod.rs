pub mod order;
pub mod product;
pub mod rating;

pub use rating::{RatingSubmission, submit_rating};
