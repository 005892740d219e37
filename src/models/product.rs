use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{errors::AppError, models::rating::Rating};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub brand: String,
    pub quantity: u32,
    pub sold: u32,
    pub ratings: Vec<Rating>,
    pub total_rating: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(input: NewProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            price: input.price,
            category: input.category,
            brand: input.brand,
            quantity: input.quantity,
            sold: 0,
            ratings: Vec::new(),
            total_rating: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Scalar fields only. Ratings live in their own list.
    pub fn to_redis_hash(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("id".into(), self.id.to_string());
        map.insert("title".into(), self.title.clone());
        map.insert("description".into(), self.description.clone());
        map.insert("price".into(), self.price.to_string());
        map.insert("category".into(), self.category.clone());
        map.insert("brand".into(), self.brand.clone());
        map.insert("quantity".into(), self.quantity.to_string());
        map.insert("sold".into(), self.sold.to_string());
        map.insert("total_rating".into(), self.total_rating.to_string());
        map.insert("created_at".into(), self.created_at.to_rfc3339());
        map.insert("updated_at".into(), self.updated_at.to_rfc3339());
        map
    }

    pub fn from_redis_hash(
        map: &HashMap<String, String>,
        ratings: Vec<Rating>,
    ) -> Result<Self, AppError> {
        let field = |name: &str| {
            map.get(name)
                .ok_or_else(|| AppError::Deserialization(format!("Missing {name}")))
        };

        Ok(Self {
            id: field("id")?
                .parse()
                .map_err(|_| AppError::Deserialization("Invalid UUID for id".into()))?,
            title: field("title")?.clone(),
            description: field("description")?.clone(),
            price: field("price")?
                .parse()
                .map_err(|_| AppError::Deserialization("Invalid price".into()))?,
            category: field("category")?.clone(),
            brand: field("brand")?.clone(),
            quantity: field("quantity")?
                .parse()
                .map_err(|_| AppError::Deserialization("Invalid quantity".into()))?,
            sold: field("sold")?
                .parse()
                .map_err(|_| AppError::Deserialization("Invalid sold".into()))?,
            ratings,
            total_rating: field("total_rating")?
                .parse()
                .map_err(|_| AppError::Deserialization("Invalid total_rating".into()))?,
            created_at: parse_timestamp(field("created_at")?)?,
            updated_at: parse_timestamp(field("updated_at")?)?,
        })
    }

    pub fn apply(&mut self, update: &ProductUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(category) = &update.category {
            self.category = category.clone();
        }
        if let Some(brand) = &update.brand {
            self.brand = brand.clone();
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(sold) = update.sold {
            self.sold = sold;
        }
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::Deserialization(format!("Invalid timestamp {value}: {e}")))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub quantity: u32,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::BadRequest("Product title is required".into()));
        }
        validate_price(self.price)
    }
}

/// Catalog fields a client may change. `ratings` and `totalRating` are derived
/// and are rejected as unknown fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub quantity: Option<u32>,
    pub sold: Option<u32>,
}

impl ProductUpdate {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(AppError::BadRequest("Product title cannot be empty".into()));
            }
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }

    pub fn to_redis_fields(&self, updated_at: DateTime<Utc>) -> Vec<(String, String)> {
        let mut fields = Vec::new();
        if let Some(title) = &self.title {
            fields.push(("title".to_string(), title.clone()));
        }
        if let Some(description) = &self.description {
            fields.push(("description".to_string(), description.clone()));
        }
        if let Some(price) = self.price {
            fields.push(("price".to_string(), price.to_string()));
        }
        if let Some(category) = &self.category {
            fields.push(("category".to_string(), category.clone()));
        }
        if let Some(brand) = &self.brand {
            fields.push(("brand".to_string(), brand.clone()));
        }
        if let Some(quantity) = self.quantity {
            fields.push(("quantity".to_string(), quantity.to_string()));
        }
        if let Some(sold) = self.sold {
            fields.push(("sold".to_string(), sold.to_string()));
        }
        fields.push(("updated_at".to_string(), updated_at.to_rfc3339()));
        fields
    }
}

fn validate_price(price: f64) -> Result<(), AppError> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::BadRequest(format!("Invalid price: {price}")));
    }
    Ok(())
}
