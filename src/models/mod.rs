pub mod order;
pub mod product;
pub mod query;
pub mod rating;
pub mod redis;
pub mod user;

pub use order::{Order, OrderItem, OrderStatus};
pub use product::{NewProduct, Product, ProductUpdate};
pub use query::{ProductQuery, SortField, SortOrder};
pub use rating::{Rating, RatingBounds};
pub use user::Claims;
