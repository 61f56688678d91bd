mod support;

use kaamdhenu_engine::{
    db_types::{OrderStatusType, OrderUpdate, PaymentStatus},
    traits::{CatalogError, CatalogManagement, OrderManagement},
    OrderFlowApi,
    OrderFlowError,
};
use kd_common::Rupees;
use support::{new_test_db, product, submission};

#[tokio::test]
async fn intake_computes_total_and_deducts_stock() {
    let db = new_test_db().await;
    let potato = db.create_product(product("Potato", 150, "SouthDelhi", 45)).await.unwrap();
    let tomato = db.create_product(product("Tomato", 23, "CentralDelhi", 80)).await.unwrap();
    let api = OrderFlowApi::new(db.clone());

    let details = "Potato 2 SouthDelhi 6338398272 1\nTomato 1 CentralDelhi 6338398272 1";
    let order = api.place_order(submission("9876543210", details)).await.unwrap();

    assert_eq!(order.total_amount, Rupees::from(45 * 2 + 80));
    assert_eq!(order.product_ids, format!("{},{}", potato.id, tomato.id));
    assert_eq!(order.payment_status, PaymentStatus::Pending);
    assert_eq!(order.order_status, OrderStatusType::Processing);

    assert_eq!(db.fetch_product(potato.id).await.unwrap().unwrap().quantity, 148);
    assert_eq!(db.fetch_product(tomato.id).await.unwrap().unwrap().quantity, 22);
}

#[tokio::test]
async fn product_name_matches_case_insensitively() {
    let db = new_test_db().await;
    db.create_product(product("Potato", 150, "SouthDelhi", 45)).await.unwrap();
    let api = OrderFlowApi::new(db.clone());

    let order = api.place_order(submission("9876543210", "potato 2 SouthDelhi 6338398272 1")).await.unwrap();
    assert_eq!(order.total_amount, Rupees::from(90));
}

#[tokio::test]
async fn unknown_item_rejects_whole_order_and_touches_nothing() {
    let db = new_test_db().await;
    let potato = db.create_product(product("Potato", 150, "SouthDelhi", 45)).await.unwrap();
    let api = OrderFlowApi::new(db.clone());

    let details = "Potato 2 SouthDelhi 6338398272 1\nCaviar 1 SouthDelhi 6338398272 7";
    let err = api.place_order(submission("9876543210", details)).await.unwrap_err();

    assert_eq!(err.to_string(), "Product Caviar not found in SouthDelhi with unique number 7");
    // The valid first line must not have been applied
    assert_eq!(db.fetch_product(potato.id).await.unwrap().unwrap().quantity, 150);
    assert!(db.fetch_orders(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn insufficient_stock_names_available_and_requested() {
    let db = new_test_db().await;
    let potato = db.create_product(product("Potato", 150, "SouthDelhi", 45)).await.unwrap();
    let api = OrderFlowApi::new(db.clone());

    let err = api.place_order(submission("9876543210", "Potato 200 SouthDelhi 6338398272 1")).await.unwrap_err();

    assert_eq!(err.to_string(), "Insufficient stock for Potato in SouthDelhi. Available: 150, Requested: 200");
    assert_eq!(db.fetch_product(potato.id).await.unwrap().unwrap().quantity, 150);
}

#[tokio::test]
async fn duplicate_lines_exceeding_stock_roll_back_entirely() {
    // Each line passes the per-line check, but together they oversell; the conditional deduction inside the
    // commit transaction catches it and nothing is applied.
    let db = new_test_db().await;
    let potato = db.create_product(product("Potato", 150, "SouthDelhi", 45)).await.unwrap();
    let api = OrderFlowApi::new(db.clone());

    let details = "Potato 100 SouthDelhi 6338398272 1\nPotato 100 SouthDelhi 6338398272 1";
    let err = api.place_order(submission("9876543210", details)).await.unwrap_err();

    assert!(matches!(
        err,
        OrderFlowError::Database(kaamdhenu_engine::traits::ConsoleDbError::Catalog(
            CatalogError::InsufficientStock { .. }
        ))
    ));
    assert_eq!(db.fetch_product(potato.id).await.unwrap().unwrap().quantity, 150);
    assert!(db.fetch_orders(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn short_lines_are_skipped_not_fatal() {
    let db = new_test_db().await;
    db.create_product(product("Potato", 150, "SouthDelhi", 45)).await.unwrap();
    let api = OrderFlowApi::new(db.clone());

    let details = "Potato 2 SouthDelhi\nPotato 2 SouthDelhi 6338398272 1";
    let order = api.place_order(submission("9876543210", details)).await.unwrap();

    assert_eq!(order.total_amount, Rupees::from(90));
    assert_eq!(order.product_id_list().len(), 1);
}

#[tokio::test]
async fn no_valid_lines_is_the_manual_entry_fallback() {
    let db = new_test_db().await;
    let api = OrderFlowApi::new(db.clone());

    let order = api.place_order(submission("9876543210", "to be filled in later")).await.unwrap();
    assert_eq!(order.total_amount, Rupees::from(0));
    assert_eq!(order.product_ids, "");
    assert_eq!(order.payment_status, PaymentStatus::Pending);
}

#[tokio::test]
async fn non_positive_quantities_are_rejected() {
    let db = new_test_db().await;
    let potato = db.create_product(product("Potato", 150, "SouthDelhi", 45)).await.unwrap();
    let api = OrderFlowApi::new(db.clone());

    let err = api.place_order(submission("9876543210", "Potato -2 SouthDelhi 6338398272 1")).await.unwrap_err();
    assert!(matches!(err, OrderFlowError::InvalidQuantity { quantity: -2, .. }));
    assert_eq!(db.fetch_product(potato.id).await.unwrap().unwrap().quantity, 150);
}

#[tokio::test]
async fn order_status_walks_forward_only() {
    let db = new_test_db().await;
    db.create_product(product("Potato", 150, "SouthDelhi", 45)).await.unwrap();
    let api = OrderFlowApi::new(db.clone());
    let order = api.place_order(submission("9876543210", "Potato 2 SouthDelhi 6338398272 1")).await.unwrap();

    let update = |os| OrderUpdate { payment_status: None, order_status: Some(os) };

    // Processing -> Delivered skips Packed
    let err = api.modify_order_status(order.id, update(OrderStatusType::Delivered)).await.unwrap_err();
    assert!(matches!(err, OrderFlowError::OrderStatusChangeForbidden { .. }));

    let packed = api.modify_order_status(order.id, update(OrderStatusType::Packed)).await.unwrap();
    assert_eq!(packed.order_status, OrderStatusType::Packed);
    let delivered = api.modify_order_status(order.id, update(OrderStatusType::Delivered)).await.unwrap();
    assert_eq!(delivered.order_status, OrderStatusType::Delivered);

    // Delivered is terminal
    let err = api.modify_order_status(order.id, update(OrderStatusType::Cancelled)).await.unwrap_err();
    assert!(matches!(err, OrderFlowError::OrderStatusChangeForbidden { .. }));
}

#[tokio::test]
async fn cancelling_a_pending_order_fails_its_payment() {
    let db = new_test_db().await;
    db.create_product(product("Potato", 150, "SouthDelhi", 45)).await.unwrap();
    let api = OrderFlowApi::new(db.clone());
    let order = api.place_order(submission("9876543210", "Potato 2 SouthDelhi 6338398272 1")).await.unwrap();

    let cancelled = api
        .modify_order_status(order.id, OrderUpdate {
            payment_status: None,
            order_status: Some(OrderStatusType::Cancelled),
        })
        .await
        .unwrap();

    assert_eq!(cancelled.order_status, OrderStatusType::Cancelled);
    assert_eq!(cancelled.payment_status, PaymentStatus::Failed);
    // Cancellation is a status, not a delete
    assert_eq!(db.fetch_orders(None).await.unwrap().len(), 1);
}
