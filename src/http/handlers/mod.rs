pub mod order;
pub mod product;
pub mod rating;

pub use order::{
    create_order_handler, get_order_handler, list_orders_handler, update_order_status_handler,
};
pub use product::{
    create_product_handler, delete_product_handler, get_product_handler, list_products_handler,
    update_product_handler,
};
pub use rating::rate_product_handler;
