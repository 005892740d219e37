use serde_json::json;
use storefront_be::{
    db::{MemoryStore, ProductStore},
    errors::AppError,
    models::{NewProduct, Product, ProductQuery, ProductUpdate, SortField, SortOrder},
    services::product::{
        create_product, delete_product, get_product, list_products, update_product,
    },
};
use uuid::Uuid;

fn new_product(title: &str, price: f64, category: &str, brand: &str) -> NewProduct {
    NewProduct {
        title: title.into(),
        description: String::new(),
        price,
        category: category.into(),
        brand: brand.into(),
        quantity: 5,
    }
}

async fn catalog() -> (MemoryStore, Vec<Product>) {
    let store = MemoryStore::new();
    let mut products = Vec::new();
    for input in [
        new_product("Kettle", 25.0, "kitchen", "Brewly"),
        new_product("Toaster", 40.0, "kitchen", "Crisp"),
        new_product("Blender", 60.0, "kitchen", "Brewly"),
        new_product("Armchair", 180.0, "living", "Sitwell"),
    ] {
        products.push(create_product(&store, input).await.unwrap());
    }
    (store, products)
}

fn titles(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.title.as_str()).collect()
}

#[tokio::test]
async fn test_create_product_starts_unrated() {
    let store = MemoryStore::new();

    let product = create_product(&store, new_product("Kettle", 25.0, "kitchen", "Brewly"))
        .await
        .unwrap();

    assert!(product.ratings.is_empty());
    assert_eq!(product.total_rating, 0);
    assert_eq!(product.sold, 0);
    assert_eq!(product.created_at, product.updated_at);
    assert_eq!(store.find_product(product.id).await.unwrap(), Some(product));
}

#[tokio::test]
async fn test_create_product_validation() {
    let store = MemoryStore::new();

    let untitled = create_product(&store, new_product("  ", 10.0, "misc", "none")).await;
    assert!(matches!(untitled, Err(AppError::BadRequest(_))));

    let negative = create_product(&store, new_product("Cup", -1.0, "misc", "none")).await;
    assert!(matches!(negative, Err(AppError::BadRequest(_))));

    assert_eq!(store.write_count(), 0);
}

#[test]
fn test_query_defaults() {
    let query: ProductQuery = serde_json::from_value(json!({})).unwrap();

    assert_eq!(query, ProductQuery::default());
    assert_eq!(query.sort_by, SortField::CreatedAt);
    assert_eq!(query.sort_order, SortOrder::Desc);
    assert_eq!(query.limit, 10);
    assert_eq!(query.page, 1);
    assert_eq!(query.skip(), 0);
}

#[test]
fn test_query_accepts_known_fields() {
    let query: ProductQuery = serde_json::from_value(json!({
        "sortBy": "totalRating",
        "sortOrder": "asc",
        "limit": 5,
        "page": 3,
        "category": "kitchen",
        "brand": "Brewly"
    }))
    .unwrap();

    assert_eq!(query.sort_by, SortField::TotalRating);
    assert_eq!(query.sort_order, SortOrder::Asc);
    assert_eq!(query.skip(), 10);
    assert_eq!(query.category.as_deref(), Some("kitchen"));
}

#[test]
fn test_query_rejects_unknown_fields() {
    let result = serde_json::from_value::<ProductQuery>(json!({ "color": "red" }));
    assert!(result.is_err());

    let result = serde_json::from_value::<ProductQuery>(json!({ "sortBy": "ratings" }));
    assert!(result.is_err());
}

#[tokio::test]
async fn test_list_sorts_by_price() {
    let (store, _) = catalog().await;
    let query = ProductQuery {
        sort_by: SortField::Price,
        sort_order: SortOrder::Asc,
        ..Default::default()
    };

    let products = list_products(&store, &query).await.unwrap();

    assert_eq!(
        titles(&products),
        vec!["Kettle", "Toaster", "Blender", "Armchair"]
    );
}

#[tokio::test]
async fn test_list_filters_by_category_and_brand() {
    let (store, _) = catalog().await;
    let query = ProductQuery {
        sort_by: SortField::Title,
        sort_order: SortOrder::Asc,
        category: Some("kitchen".into()),
        brand: Some("Brewly".into()),
        ..Default::default()
    };

    let products = list_products(&store, &query).await.unwrap();

    assert_eq!(titles(&products), vec!["Blender", "Kettle"]);
}

#[tokio::test]
async fn test_list_paginates() {
    let (store, _) = catalog().await;
    let page = |page| ProductQuery {
        sort_by: SortField::Price,
        sort_order: SortOrder::Desc,
        limit: 3,
        page,
        ..Default::default()
    };

    let first = list_products(&store, &page(1)).await.unwrap();
    let second = list_products(&store, &page(2)).await.unwrap();
    let third = list_products(&store, &page(3)).await;

    assert_eq!(titles(&first), vec!["Armchair", "Blender", "Toaster"]);
    assert_eq!(titles(&second), vec!["Kettle"]);
    assert!(matches!(third, Err(AppError::NoContent(_))));
}

#[tokio::test]
async fn test_list_empty_catalog_is_no_content() {
    let store = MemoryStore::new();

    let result = list_products(&store, &ProductQuery::default()).await;

    assert!(matches!(result, Err(AppError::NoContent(_))));
}

#[tokio::test]
async fn test_list_rejects_bad_paging() {
    let (store, _) = catalog().await;

    let zero_limit = ProductQuery {
        limit: 0,
        ..Default::default()
    };
    let huge_limit = ProductQuery {
        limit: 1000,
        ..Default::default()
    };
    let zero_page = ProductQuery {
        page: 0,
        ..Default::default()
    };

    for query in [zero_limit, huge_limit, zero_page] {
        let result = list_products(&store, &query).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}

#[tokio::test]
async fn test_get_missing_product() {
    let store = MemoryStore::new();
    let id = Uuid::new_v4();

    match get_product(&store, id).await {
        Err(AppError::NotFound(msg)) => {
            assert_eq!(msg, format!("the product with the id {} does not exist", id))
        }
        other => panic!("expected not found, got {:?}", other),
    }
}

#[tokio::test]
async fn test_update_changes_only_given_fields() {
    let (store, products) = catalog().await;
    let kettle = &products[0];

    let update: ProductUpdate =
        serde_json::from_value(json!({ "price": 19.99, "quantity": 2 })).unwrap();
    let updated = update_product(&store, kettle.id, &update).await.unwrap();

    assert_eq!(updated.price, 19.99);
    assert_eq!(updated.quantity, 2);
    assert_eq!(updated.title, kettle.title);
    assert_eq!(updated.brand, kettle.brand);
    assert!(updated.updated_at >= kettle.updated_at);
}

#[test]
fn test_update_rejects_derived_fields() {
    assert!(serde_json::from_value::<ProductUpdate>(json!({ "totalRating": 5 })).is_err());
    assert!(serde_json::from_value::<ProductUpdate>(json!({ "ratings": [] })).is_err());
}

#[tokio::test]
async fn test_update_validation_and_missing() {
    let (store, products) = catalog().await;

    let bad_price = ProductUpdate {
        price: Some(-3.0),
        ..Default::default()
    };
    let result = update_product(&store, products[0].id, &bad_price).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let result = update_product(&store, Uuid::new_v4(), &ProductUpdate::default()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_product() {
    let (store, products) = catalog().await;
    let toaster = &products[1];

    let deleted = delete_product(&store, toaster.id).await.unwrap();
    assert_eq!(deleted.id, toaster.id);

    assert!(matches!(
        get_product(&store, toaster.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        delete_product(&store, toaster.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn test_redis_hash_round_trip_keeps_ratings_separate() {
    let product = Product::new(new_product("Kettle", 25.5, "kitchen", "Brewly"));
    let map = product.to_redis_hash();

    assert!(!map.contains_key("ratings"));
    assert_eq!(map.get("total_rating").map(String::as_str), Some("0"));

    let restored = Product::from_redis_hash(&map, Vec::new()).unwrap();
    assert_eq!(restored.id, product.id);
    assert_eq!(restored.price, 25.5);
    assert_eq!(restored.created_at, product.created_at);
}

#[test]
fn test_redis_hash_missing_field() {
    let product = Product::new(new_product("Kettle", 25.5, "kitchen", "Brewly"));
    let mut map = product.to_redis_hash();
    map.remove("price");

    assert!(matches!(
        Product::from_redis_hash(&map, Vec::new()),
        Err(AppError::Deserialization(_))
    ));
}
