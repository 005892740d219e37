use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{errors::AppError, models::product::Product};

pub const MAX_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Title,
    Price,
    #[default]
    CreatedAt,
    TotalRating,
    Sold,
    Quantity,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Recognised listing options. Anything else in the query string is rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductQuery {
    #[serde(default)]
    pub sort_by: SortField,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default = "default_page")]
    pub page: u32,
    pub category: Option<String>,
    pub brand: Option<String>,
}

fn default_limit() -> u32 {
    10
}

fn default_page() -> u32 {
    1
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
            limit: default_limit(),
            page: default_page(),
            category: None,
            brand: None,
        }
    }
}

impl ProductQuery {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.limit == 0 || self.limit > MAX_PAGE_LIMIT {
            return Err(AppError::InvalidInput(format!(
                "limit must be between 1 and {MAX_PAGE_LIMIT}"
            )));
        }
        if self.page == 0 {
            return Err(AppError::InvalidInput("page starts at 1".into()));
        }
        Ok(())
    }

    pub fn skip(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.limit as usize)
    }

    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = self
            .category
            .as_ref()
            .is_none_or(|category| &product.category == category);
        let brand_ok = self
            .brand
            .as_ref()
            .is_none_or(|brand| &product.brand == brand);
        category_ok && brand_ok
    }

    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let ordering = match self.sort_by {
            SortField::Title => a.title.cmp(&b.title),
            SortField::Price => a.price.total_cmp(&b.price),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::TotalRating => a.total_rating.cmp(&b.total_rating),
            SortField::Sold => a.sold.cmp(&b.sold),
            SortField::Quantity => a.quantity.cmp(&b.quantity),
        };

        match self.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    /// Filters, sorts and cuts out the requested page.
    pub fn apply(&self, mut products: Vec<Product>) -> Vec<Product> {
        products.retain(|p| self.matches(p));
        products.sort_by(|a, b| self.compare(a, b).then_with(|| a.id.cmp(&b.id)));
        products
            .into_iter()
            .skip(self.skip())
            .take(self.limit as usize)
            .collect()
    }
}
