use bb8::Pool;
use bb8_redis::RedisConnectionManager;
use std::sync::Arc;

use crate::{
    config::Config,
    db::{OrderStore, ProductStore},
};

#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductStore>,
    pub orders: Arc<dyn OrderStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new<S>(store: S, config: Config) -> Self
    where
        S: ProductStore + OrderStore + 'static,
    {
        let store = Arc::new(store);
        Self {
            products: store.clone(),
            orders: store,
            config: Arc::new(config),
        }
    }
}

pub type RedisClient = Pool<RedisConnectionManager>;
