use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    db::store::{OrderStore, ProductStore},
    errors::AppError,
    models::{
        Order, OrderStatus, Product, ProductQuery, ProductUpdate, Rating, rating::aggregate_rating,
    },
};

pub type SharedProducts = Arc<Mutex<HashMap<Uuid, Product>>>;

pub type SharedOrders = Arc<Mutex<HashMap<Uuid, Order>>>;

/// Process-local store for tests. Each call holds the map lock for its whole
/// duration, matching the per-document atomicity of the Redis scripts.
#[derive(Clone, Default)]
pub struct MemoryStore {
    products: SharedProducts,
    orders: SharedOrders,
    writes: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful mutating calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn insert_product(&self, product: &Product) -> Result<(), AppError> {
        self.products
            .lock()
            .await
            .insert(product.id, product.clone());
        self.record_write();
        Ok(())
    }

    async fn find_product(&self, product_id: Uuid) -> Result<Option<Product>, AppError> {
        Ok(self.products.lock().await.get(&product_id).cloned())
    }

    async fn find_products(&self, query: &ProductQuery) -> Result<Vec<Product>, AppError> {
        let products = self.products.lock().await.values().cloned().collect();
        Ok(query.apply(products))
    }

    async fn update_product(
        &self,
        product_id: Uuid,
        update: &ProductUpdate,
    ) -> Result<Option<Product>, AppError> {
        let mut products = self.products.lock().await;
        let Some(product) = products.get_mut(&product_id) else {
            return Ok(None);
        };

        product.apply(update);
        product.updated_at = Utc::now();
        self.record_write();
        Ok(Some(product.clone()))
    }

    async fn delete_product(&self, product_id: Uuid) -> Result<Option<Product>, AppError> {
        let removed = self.products.lock().await.remove(&product_id);
        if removed.is_some() {
            self.record_write();
        }
        Ok(removed)
    }

    async fn update_rating(
        &self,
        product_id: Uuid,
        rater_id: Uuid,
        star: i32,
        comment: &str,
    ) -> Result<bool, AppError> {
        let mut products = self.products.lock().await;
        let entry = products
            .get_mut(&product_id)
            .and_then(|p| p.ratings.iter_mut().find(|r| r.posted_by == rater_id));

        match entry {
            Some(rating) => {
                rating.star = star;
                rating.comment = comment.to_string();
                self.record_write();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn push_rating(&self, product_id: Uuid, rating: &Rating) -> Result<bool, AppError> {
        let mut products = self.products.lock().await;
        match products.get_mut(&product_id) {
            Some(product) => {
                match product
                    .ratings
                    .iter_mut()
                    .find(|r| r.posted_by == rating.posted_by)
                {
                    Some(existing) => {
                        existing.star = rating.star;
                        existing.comment = rating.comment.clone();
                    }
                    None => product.ratings.push(rating.clone()),
                }
                self.record_write();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn refresh_total_rating(&self, product_id: Uuid) -> Result<Option<Product>, AppError> {
        let mut products = self.products.lock().await;
        let Some(product) = products.get_mut(&product_id) else {
            return Ok(None);
        };

        product.total_rating = aggregate_rating(&product.ratings);
        product.updated_at = Utc::now();
        self.record_write();
        Ok(Some(product.clone()))
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn insert_order(&self, order: &Order) -> Result<(), AppError> {
        self.orders.lock().await.insert(order.id, order.clone());
        self.record_write();
        Ok(())
    }

    async fn find_order(&self, order_id: Uuid) -> Result<Option<Order>, AppError> {
        Ok(self.orders.lock().await.get(&order_id).cloned())
    }

    async fn find_orders_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, AppError> {
        let mut orders: Vec<Order> = self
            .orders
            .lock()
            .await
            .values()
            .filter(|o| o.orderby == user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn set_order_status(
        &self,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, AppError> {
        let mut orders = self.orders.lock().await;
        let Some(order) = orders.get_mut(&order_id) else {
            return Ok(None);
        };

        order.order_status = status;
        order.updated_at = Utc::now();
        self.record_write();
        Ok(Some(order.clone()))
    }
}
