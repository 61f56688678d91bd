use actix_web::{http::StatusCode, test, test::TestRequest, web, App};
use kaamdhenu_engine::{db_types::Product, CatalogApi};
use kd_common::Rupees;
use serde_json::json;

use crate::{
    endpoint_tests::mocks::MockCatalog,
    routes::{CreateProductRoute, GetProductRoute, ListProductsRoute},
};

fn potato() -> Product {
    Product {
        id: 1,
        name: "Potato".to_string(),
        quantity: 150,
        district: "SouthDelhi".to_string(),
        added_by: "6338398272".to_string(),
        price: Rupees::from(45),
        unique_number: 1,
        category: "vegetables".to_string(),
    }
}

fn app_config(mock: MockCatalog) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(ListProductsRoute::<MockCatalog>::new())
            .service(GetProductRoute::<MockCatalog>::new())
            .service(CreateProductRoute::<MockCatalog>::new())
            .app_data(web::Data::new(CatalogApi::new(mock)));
    }
}

#[actix_web::test]
async fn list_products_serves_the_catalog_in_wire_format() {
    let _ = env_logger::try_init().ok();
    let mut mock = MockCatalog::new();
    mock.expect_fetch_products().returning(|_| Ok(vec![potato()]));
    let app = test::init_service(App::new().configure(app_config(mock))).await;

    let req = TestRequest::get().uri("/products").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body[0]["uniqueNumber"], 1);
    assert_eq!(body[0]["addedBy"], "6338398272");
    assert_eq!(body[0]["price"], 45);
}

#[actix_web::test]
async fn district_filter_is_passed_through() {
    let _ = env_logger::try_init().ok();
    let mut mock = MockCatalog::new();
    mock.expect_fetch_products()
        .withf(|district| district == &Some("Chennai"))
        .returning(|_| Ok(vec![]));
    let app = test::init_service(App::new().configure(app_config(mock))).await;

    let req = TestRequest::get().uri("/products?district=Chennai").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn missing_product_is_a_404_with_json_error() {
    let _ = env_logger::try_init().ok();
    let mut mock = MockCatalog::new();
    mock.expect_fetch_product().returning(|_| Ok(None));
    let app = test::init_service(App::new().configure(app_config(mock))).await;

    let req = TestRequest::get().uri("/products/99").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body, json!({"error": "Product not found"}));
}

#[actix_web::test]
async fn create_product_returns_201() {
    let _ = env_logger::try_init().ok();
    let mut mock = MockCatalog::new();
    mock.expect_create_product().returning(|_| Ok(potato()));
    let app = test::init_service(App::new().configure(app_config(mock))).await;

    let req = TestRequest::post()
        .uri("/products")
        .set_json(json!({
            "name": "Potato",
            "quantity": 150,
            "district": "SouthDelhi",
            "addedBy": "6338398272",
            "price": 45,
            "category": "vegetables"
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn invalid_product_shapes_are_rejected_before_the_store() {
    let _ = env_logger::try_init().ok();
    // No expectations: the validation layer must reject without touching the backend
    let mock = MockCatalog::new();
    let app = test::init_service(App::new().configure(app_config(mock))).await;

    let req = TestRequest::post()
        .uri("/products")
        .set_json(json!({
            "name": "Potato",
            "quantity": -5,
            "district": "SouthDelhi",
            "addedBy": "6338398272",
            "price": 45,
            "category": "vegetables"
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
