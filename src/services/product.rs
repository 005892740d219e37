use uuid::Uuid;

use crate::{
    db::ProductStore,
    errors::AppError,
    models::{NewProduct, Product, ProductQuery, ProductUpdate},
};

pub async fn create_product(
    store: &dyn ProductStore,
    input: NewProduct,
) -> Result<Product, AppError> {
    input.validate()?;

    let product = Product::new(input);
    store.insert_product(&product).await.map_err(|e| {
        tracing::error!("Product creation failed: {}", e);
        AppError::BadRequest("Product creation failed".into())
    })?;

    Ok(product)
}

pub async fn list_products(
    store: &dyn ProductStore,
    query: &ProductQuery,
) -> Result<Vec<Product>, AppError> {
    query.validate()?;

    let products = store.find_products(query).await?;
    if products.is_empty() {
        return Err(AppError::NoContent("No products found".into()));
    }

    Ok(products)
}

pub async fn get_product(store: &dyn ProductStore, product_id: Uuid) -> Result<Product, AppError> {
    store.find_product(product_id).await?.ok_or_else(|| {
        AppError::NotFound(format!(
            "the product with the id {} does not exist",
            product_id
        ))
    })
}

pub async fn update_product(
    store: &dyn ProductStore,
    product_id: Uuid,
    update: &ProductUpdate,
) -> Result<Product, AppError> {
    update.validate()?;

    store
        .update_product(product_id, update)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "The Product with the id: {} was not found to be updated.",
                product_id
            ))
        })
}

pub async fn delete_product(
    store: &dyn ProductStore,
    product_id: Uuid,
) -> Result<Product, AppError> {
    store.delete_product(product_id).await?.ok_or_else(|| {
        AppError::NotFound(format!(
            "The Product with the id: {} was not found to be deleted",
            product_id
        ))
    })
}
