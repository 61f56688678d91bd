use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use kaamdhenu_engine::{CatalogApi, DashboardApi, OrderFlowApi, SettingsApi, SqliteDatabase, UserApi};
use log::info;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    routes::{
        health,
        AssignRoleRoute,
        CreateOrderRoute,
        CreateProductRoute,
        CreateUserRoute,
        DashboardStatsRoute,
        DeleteProductRoute,
        GetProductRoute,
        GetSettingRoute,
        GetUserInfoRoute,
        ListOrdersRoute,
        ListProductsRoute,
        ListTransactionsRoute,
        ListUsersRoute,
        PendingOrdersRoute,
        ProcessSmsRoute,
        PutSettingRoute,
        RemoveRoleRoute,
        StockHistoryRoute,
        UnmatchedTransactionsRoute,
        UpdateOrderRoute,
        UpdateProductRoute,
        UpdateUserRoute,
        UpsertUserInfoRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    info!("🚀️ Database ready at {}", config.database_url);
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let order_flow_api = OrderFlowApi::new(db.clone());
        let catalog_api = CatalogApi::new(db.clone());
        let user_api = UserApi::new(db.clone());
        let dashboard_api = DashboardApi::new(db.clone());
        let settings_api = SettingsApi::new(db.clone());
        let api_scope = web::scope("/api")
            .service(DashboardStatsRoute::<SqliteDatabase>::new())
            .service(ListProductsRoute::<SqliteDatabase>::new())
            .service(GetProductRoute::<SqliteDatabase>::new())
            .service(CreateProductRoute::<SqliteDatabase>::new())
            .service(UpdateProductRoute::<SqliteDatabase>::new())
            .service(DeleteProductRoute::<SqliteDatabase>::new())
            .service(StockHistoryRoute::<SqliteDatabase>::new())
            .service(ListOrdersRoute::<SqliteDatabase>::new())
            .service(PendingOrdersRoute::<SqliteDatabase>::new())
            .service(CreateOrderRoute::<SqliteDatabase>::new())
            .service(UpdateOrderRoute::<SqliteDatabase>::new())
            .service(ProcessSmsRoute::<SqliteDatabase>::new())
            .service(ListTransactionsRoute::<SqliteDatabase>::new())
            .service(UnmatchedTransactionsRoute::<SqliteDatabase>::new())
            .service(ListUsersRoute::<SqliteDatabase>::new())
            .service(CreateUserRoute::<SqliteDatabase>::new())
            .service(UpdateUserRoute::<SqliteDatabase>::new())
            .service(AssignRoleRoute::<SqliteDatabase>::new())
            .service(RemoveRoleRoute::<SqliteDatabase>::new())
            .service(GetSettingRoute::<SqliteDatabase>::new())
            .service(PutSettingRoute::<SqliteDatabase>::new())
            .service(GetUserInfoRoute::<SqliteDatabase>::new())
            .service(UpsertUserInfoRoute::<SqliteDatabase>::new());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("kds::access_log"))
            .app_data(web::Data::new(order_flow_api))
            .app_data(web::Data::new(catalog_api))
            .app_data(web::Data::new(user_api))
            .app_data(web::Data::new(dashboard_api))
            .app_data(web::Data::new(settings_api))
            .service(health)
            .service(api_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
