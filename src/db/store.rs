use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::{order, product},
    errors::AppError,
    models::{Order, OrderStatus, Product, ProductQuery, ProductUpdate, Rating},
    state::RedisClient,
};

/// Document operations on products and their embedded ratings.
///
/// Every method touches a single product document and is atomic for that
/// document. Nothing here spans more than one call.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert_product(&self, product: &Product) -> Result<(), AppError>;

    async fn find_product(&self, product_id: Uuid) -> Result<Option<Product>, AppError>;

    /// The filtered, sorted page described by `query`.
    async fn find_products(&self, query: &ProductQuery) -> Result<Vec<Product>, AppError>;

    async fn update_product(
        &self,
        product_id: Uuid,
        update: &ProductUpdate,
    ) -> Result<Option<Product>, AppError>;

    async fn delete_product(&self, product_id: Uuid) -> Result<Option<Product>, AppError>;

    /// Sets `star` and `comment` on the rating posted by `rater_id`.
    /// Returns `false` when no such entry exists.
    async fn update_rating(
        &self,
        product_id: Uuid,
        rater_id: Uuid,
        star: i32,
        comment: &str,
    ) -> Result<bool, AppError>;

    /// Appends to the ratings sequence. If the rater already has an entry it is
    /// updated in place instead, keeping its id and position. Returns `false`
    /// when the product is gone.
    async fn push_rating(&self, product_id: Uuid, rating: &Rating) -> Result<bool, AppError>;

    /// Recomputes `total_rating` from the ratings stored at that moment and
    /// persists it, as a single atomic step. Returns `None` when the product is
    /// gone.
    async fn refresh_total_rating(&self, product_id: Uuid) -> Result<Option<Product>, AppError>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert_order(&self, order: &Order) -> Result<(), AppError>;

    async fn find_order(&self, order_id: Uuid) -> Result<Option<Order>, AppError>;

    async fn find_orders_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, AppError>;

    async fn set_order_status(
        &self,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, AppError>;
}

#[derive(Clone)]
pub struct RedisStore {
    redis: RedisClient,
}

impl RedisStore {
    pub fn new(redis: RedisClient) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl ProductStore for RedisStore {
    async fn insert_product(&self, product: &Product) -> Result<(), AppError> {
        product::create_product(product, self.redis.clone()).await?;
        Ok(())
    }

    async fn find_product(&self, product_id: Uuid) -> Result<Option<Product>, AppError> {
        product::get_product(product_id, self.redis.clone()).await
    }

    async fn find_products(&self, query: &ProductQuery) -> Result<Vec<Product>, AppError> {
        product::get_products(query, self.redis.clone()).await
    }

    async fn update_product(
        &self,
        product_id: Uuid,
        update: &ProductUpdate,
    ) -> Result<Option<Product>, AppError> {
        product::update_product(product_id, update, self.redis.clone()).await
    }

    async fn delete_product(&self, product_id: Uuid) -> Result<Option<Product>, AppError> {
        product::delete_product(product_id, self.redis.clone()).await
    }

    async fn update_rating(
        &self,
        product_id: Uuid,
        rater_id: Uuid,
        star: i32,
        comment: &str,
    ) -> Result<bool, AppError> {
        product::update_rating(product_id, rater_id, star, comment, self.redis.clone()).await
    }

    async fn push_rating(&self, product_id: Uuid, rating: &Rating) -> Result<bool, AppError> {
        product::push_rating(product_id, rating, self.redis.clone()).await
    }

    async fn refresh_total_rating(&self, product_id: Uuid) -> Result<Option<Product>, AppError> {
        product::refresh_total_rating(product_id, self.redis.clone()).await
    }
}

#[async_trait]
impl OrderStore for RedisStore {
    async fn insert_order(&self, order: &Order) -> Result<(), AppError> {
        order::create_order(order, self.redis.clone()).await?;
        Ok(())
    }

    async fn find_order(&self, order_id: Uuid) -> Result<Option<Order>, AppError> {
        order::get_order(order_id, self.redis.clone()).await
    }

    async fn find_orders_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, AppError> {
        order::get_user_orders(user_id, self.redis.clone()).await
    }

    async fn set_order_status(
        &self,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, AppError> {
        order::update_order_status(order_id, status, self.redis.clone()).await
    }
}
