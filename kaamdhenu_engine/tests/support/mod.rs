#![allow(dead_code)]
use kaamdhenu_engine::{
    db_types::{NewOrder, NewProduct},
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    SqliteDatabase,
};
use kd_common::Rupees;

/// A fresh, migrated, throwaway database for one test.
pub async fn new_test_db() -> SqliteDatabase {
    let url = random_db_path();
    prepare_test_env(&url).await;
    SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating database")
}

pub fn product(name: &str, quantity: i64, district: &str, price: i64) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        quantity,
        district: district.to_string(),
        added_by: "6338398272".to_string(),
        price: Rupees::from(price),
        category: "vegetables".to_string(),
    }
}

pub fn submission(phone: &str, order_details: &str) -> NewOrder {
    NewOrder {
        telegram_id: "user1".to_string(),
        name: "Raj Kumar".to_string(),
        address: "Main Road, Block A".to_string(),
        order_details: order_details.to_string(),
        phone: phone.to_string(),
        district: "SouthDelhi".to_string(),
    }
}
