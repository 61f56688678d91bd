use actix_web::{http::StatusCode, test, test::TestRequest, web, App};
use kaamdhenu_engine::{capabilities::Role, db_types::RoleAssignment, UserApi};
use serde_json::json;

use crate::{
    endpoint_tests::mocks::MockUsers,
    routes::{AssignRoleRoute, RemoveRoleRoute},
};

fn app_config(mock: MockUsers) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(AssignRoleRoute::<MockUsers>::new())
            .service(RemoveRoleRoute::<MockUsers>::new())
            .app_data(web::Data::new(UserApi::new(mock)));
    }
}

#[actix_web::test]
async fn assign_role_returns_the_stored_assignment() {
    let _ = env_logger::try_init().ok();
    let mut mock = MockUsers::new();
    mock.expect_assign_role().returning(|a| Ok(a));
    let app = test::init_service(App::new().configure(app_config(mock))).await;

    let req = TestRequest::post()
        .uri("/roles")
        .set_json(json!({"telegramId": "5385320149", "role": "district_head", "district": "SouthDelhi"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: RoleAssignment = test::read_body_json(res).await;
    assert_eq!(body.role, Role::DistrictHead);
    assert_eq!(body.district.as_deref(), Some("SouthDelhi"));
}

#[actix_web::test]
async fn district_scoped_roles_without_a_district_are_rejected() {
    let _ = env_logger::try_init().ok();
    // No expectations: the check happens before the backend is involved
    let mock = MockUsers::new();
    let app = test::init_service(App::new().configure(app_config(mock))).await;

    let req = TestRequest::post()
        .uri("/roles")
        .set_json(json!({"telegramId": "5385320149", "role": "supplier"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn removing_an_unheld_role_is_a_404() {
    let _ = env_logger::try_init().ok();
    let mut mock = MockUsers::new();
    mock.expect_remove_role().returning(|_, _| Ok(false));
    let app = test::init_service(App::new().configure(app_config(mock))).await;

    let req = TestRequest::delete()
        .uri("/roles")
        .set_json(json!({"telegramId": "5385320149", "role": "worker"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body, json!({"error": "Role not found"}));
}
