use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "Not Processed")]
    NotProcessed,
    #[serde(rename = "Cash on Delivery")]
    CashOnDelivery,
    Processing,
    Dispatched,
    Cancelled,
    Delivered,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product: Uuid,
    pub count: u32,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub products: Vec<OrderItem>,
    pub payment_intent: Value,
    pub order_status: OrderStatus,
    pub orderby: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn new(orderby: Uuid, products: Vec<OrderItem>, payment_intent: Option<Value>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            products,
            payment_intent: payment_intent.unwrap_or_else(|| Value::Object(Default::default())),
            order_status: OrderStatus::default(),
            orderby,
            created_at: now,
            updated_at: now,
        }
    }
}

pub fn validate_items(items: &[OrderItem]) -> Result<(), AppError> {
    if items.is_empty() {
        return Err(AppError::InvalidInput(
            "An order needs at least one product".into(),
        ));
    }

    if let Some(item) = items.iter().find(|item| item.count == 0) {
        return Err(AppError::InvalidInput(format!(
            "Product {} has a count of 0",
            item.product
        )));
    }

    Ok(())
}
