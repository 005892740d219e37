pub mod delete;
pub mod get;
pub mod patch;
pub mod post;

pub use delete::delete_product;
pub use get::{get_product, get_products};
pub use patch::{refresh_total_rating, update_product, update_rating};
pub use post::{create_product, push_rating};
