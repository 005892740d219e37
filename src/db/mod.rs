pub mod memory;
pub mod order;
pub mod product;
pub mod redis_client;
pub mod store;

pub use memory::MemoryStore;
pub use store::{OrderStore, ProductStore, RedisStore};
