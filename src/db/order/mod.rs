pub mod get;
pub mod patch;
pub mod post;

pub use get::{get_order, get_user_orders};
pub use patch::update_order_status;
pub use post::create_order;
