mod support;

use kaamdhenu_engine::{
    db_types::{PaymentStatus, TransactionStatus},
    traits::{CatalogManagement, LedgerManagement, OrderManagement},
    OrderFlowApi,
    PaymentSmsNotification,
};
use kd_common::Rupees;
use support::{new_test_db, product, submission};

fn sms(amount: i64, phone: &str) -> PaymentSmsNotification {
    PaymentSmsNotification {
        sms_text: format!("Rs.{amount} Credited to A/c XX1234 by {phone}"),
        amount: Rupees::from(amount),
        phone: phone.to_string(),
    }
}

#[tokio::test]
async fn payment_matches_with_prefix_tolerance() {
    let db = new_test_db().await;
    db.create_product(product("Potato", 150, "SouthDelhi", 75)).await.unwrap();
    let api = OrderFlowApi::new(db.clone());
    // Order stored with the +91 prefix, notification arrives without it
    let order = api.place_order(submission("+919876543210", "Potato 2 SouthDelhi 6338398272 1")).await.unwrap();
    assert_eq!(order.total_amount, Rupees::from(150));

    let outcome = api.process_payment_sms(sms(150, "9876543210")).await.unwrap();

    assert!(outcome.is_matched());
    assert_eq!(outcome.order_id(), Some(order.id));
    assert_eq!(outcome.message(), format!("Payment confirmed for Order #{}", order.id));
    let confirmed = db.fetch_order(order.id).await.unwrap().unwrap();
    assert_eq!(confirmed.payment_status, PaymentStatus::Confirmed);

    let ledger = db.fetch_transactions().await.unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].status, TransactionStatus::Matched);
    assert_eq!(ledger[0].order_id, Some(order.id));
    assert_eq!(ledger[0].amount, Rupees::from(150));
}

#[tokio::test]
async fn unmatched_payment_files_an_audit_record_and_mutates_nothing() {
    let db = new_test_db().await;
    db.create_product(product("Potato", 150, "SouthDelhi", 75)).await.unwrap();
    let api = OrderFlowApi::new(db.clone());
    let order = api.place_order(submission("9876543210", "Potato 2 SouthDelhi 6338398272 1")).await.unwrap();

    // Right phone, wrong amount
    let outcome = api.process_payment_sms(sms(151, "9876543210")).await.unwrap();

    assert!(!outcome.is_matched());
    assert_eq!(outcome.order_id(), None);
    assert_eq!(outcome.message(), "No matching order found for Rs.151 from 9876543210");
    assert_eq!(db.fetch_order(order.id).await.unwrap().unwrap().payment_status, PaymentStatus::Pending);

    let unmatched = db.fetch_unmatched_transactions().await.unwrap();
    assert_eq!(unmatched.len(), 1);
    assert_eq!(unmatched[0].status, TransactionStatus::Unmatched);
    assert_eq!(unmatched[0].order_id, None);
}

#[tokio::test]
async fn duplicate_amounts_match_oldest_pending_first() {
    let db = new_test_db().await;
    db.create_product(product("Potato", 150, "SouthDelhi", 75)).await.unwrap();
    let api = OrderFlowApi::new(db.clone());
    let first = api.place_order(submission("9876543210", "Potato 2 SouthDelhi 6338398272 1")).await.unwrap();
    let second = api.place_order(submission("9876543210", "Potato 2 SouthDelhi 6338398272 1")).await.unwrap();

    let outcome = api.process_payment_sms(sms(150, "9876543210")).await.unwrap();
    assert_eq!(outcome.order_id(), Some(first.id));
    assert_eq!(db.fetch_order(second.id).await.unwrap().unwrap().payment_status, PaymentStatus::Pending);

    // The next identical notification settles the second order
    let outcome = api.process_payment_sms(sms(150, "9876543210")).await.unwrap();
    assert_eq!(outcome.order_id(), Some(second.id));
}

#[tokio::test]
async fn confirmed_orders_are_not_matched_again() {
    let db = new_test_db().await;
    db.create_product(product("Potato", 150, "SouthDelhi", 75)).await.unwrap();
    let api = OrderFlowApi::new(db.clone());
    let order = api.place_order(submission("9876543210", "Potato 2 SouthDelhi 6338398272 1")).await.unwrap();

    assert!(api.process_payment_sms(sms(150, "9876543210")).await.unwrap().is_matched());
    let outcome = api.process_payment_sms(sms(150, "9876543210")).await.unwrap();

    assert!(!outcome.is_matched());
    assert_eq!(db.fetch_order(order.id).await.unwrap().unwrap().payment_status, PaymentStatus::Confirmed);
    // One matched + one unmatched record in the ledger
    let ledger = db.fetch_transactions().await.unwrap();
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.iter().filter(|t| t.status == TransactionStatus::Matched).count(), 1);
}

#[tokio::test]
async fn non_positive_amounts_are_malformed_input() {
    let db = new_test_db().await;
    let api = OrderFlowApi::new(db.clone());
    let err = api.process_payment_sms(sms(0, "9876543210")).await.unwrap_err();
    assert!(matches!(err, kaamdhenu_engine::OrderFlowError::InvalidAmount(_)));
    // Malformed input produces no ledger entry
    assert!(db.fetch_transactions().await.unwrap().is_empty());
}
