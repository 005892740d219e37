use uuid::Uuid;

pub struct RedisKey;

impl RedisKey {
    pub fn product(id: Uuid) -> String {
        format!("product:{id}")
    }

    pub fn product_ratings(id: Uuid) -> String {
        format!("product:{id}:ratings")
    }

    pub fn products() -> String {
        "products".to_string()
    }

    pub fn order(id: Uuid) -> String {
        format!("order:{id}")
    }

    pub fn user_orders(user_id: Uuid) -> String {
        format!("user:{user_id}:orders")
    }
}
