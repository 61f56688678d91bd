//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! Handlers are generic over the storage traits rather than a concrete backend, so endpoint tests can
//! inject mocks. Since actix cannot register generic handlers directly, each route gets a small
//! `HttpServiceFactory` struct generated by the [`route!`] macro.
use actix_web::{get, web, HttpResponse, Responder};
use kaamdhenu_engine::{
    db_types::{NewOrder, NewProduct, NewUser, NewUserInfo, OrderUpdate, ProductUpdate, RoleAssignment, Setting, UserUpdate},
    helpers::parse_payment_sms,
    traits::{CatalogManagement, ConsoleDatabase, SettingsManagement, UserManagement},
    CatalogApi,
    DashboardApi,
    OrderFlowApi,
    PaymentSmsNotification,
    SettingsApi,
    UserApi,
};
use kd_common::Rupees;
use log::*;

use crate::{
    data_objects::{DistrictFilter, RoleRemoveRequest, SmsIngest, SmsProcessResult},
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------  Dashboard ----------------------------------------------------
route!(dashboard_stats => Get "/dashboard/stats" impl ConsoleDatabase);
/// The four summary counters, read as one snapshot.
pub async fn dashboard_stats<B: ConsoleDatabase>(
    api: web::Data<DashboardApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received dashboard stats request");
    let stats = api.fetch_stats().await?;
    Ok(HttpResponse::Ok().json(stats))
}

//----------------------------------------------  Products  ----------------------------------------------------
route!(list_products => Get "/products" impl CatalogManagement);
pub async fn list_products<B: CatalogManagement>(
    api: web::Data<CatalogApi<B>>,
    query: web::Query<DistrictFilter>,
) -> Result<HttpResponse, ServerError> {
    let products = api.fetch_products(query.district.as_deref()).await?;
    Ok(HttpResponse::Ok().json(products))
}

route!(get_product => Get "/products/{id}" impl CatalogManagement);
pub async fn get_product<B: CatalogManagement>(
    api: web::Data<CatalogApi<B>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ServerError> {
    let product = api
        .fetch_product(path.into_inner())
        .await?
        .ok_or_else(|| ServerError::NoRecordFound("Product not found".to_string()))?;
    Ok(HttpResponse::Ok().json(product))
}

route!(create_product => Post "/products" impl CatalogManagement);
pub async fn create_product<B: CatalogManagement>(
    api: web::Data<CatalogApi<B>>,
    body: web::Json<NewProduct>,
) -> Result<HttpResponse, ServerError> {
    let product = api.create_product(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(product))
}

route!(update_product => Put "/products/{id}" impl CatalogManagement);
pub async fn update_product<B: CatalogManagement>(
    api: web::Data<CatalogApi<B>>,
    path: web::Path<i64>,
    body: web::Json<ProductUpdate>,
) -> Result<HttpResponse, ServerError> {
    let product = api
        .update_product(path.into_inner(), body.into_inner())
        .await?
        .ok_or_else(|| ServerError::NoRecordFound("Product not found".to_string()))?;
    Ok(HttpResponse::Ok().json(product))
}

route!(delete_product => Delete "/products/{id}" impl CatalogManagement);
pub async fn delete_product<B: CatalogManagement>(
    api: web::Data<CatalogApi<B>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ServerError> {
    if api.delete_product(path.into_inner()).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(ServerError::NoRecordFound("Product not found".to_string()))
    }
}

route!(stock_history => Get "/products/{id}/stock-history" impl CatalogManagement);
pub async fn stock_history<B: CatalogManagement>(
    api: web::Data<CatalogApi<B>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ServerError> {
    let history = api.fetch_stock_history(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(history))
}

//----------------------------------------------   Orders   ----------------------------------------------------
route!(list_orders => Get "/orders" impl ConsoleDatabase);
pub async fn list_orders<B: ConsoleDatabase>(
    api: web::Data<OrderFlowApi<B>>,
    query: web::Query<DistrictFilter>,
) -> Result<HttpResponse, ServerError> {
    let orders = api.fetch_orders(query.district.as_deref()).await?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(pending_orders => Get "/orders/pending" impl ConsoleDatabase);
pub async fn pending_orders<B: ConsoleDatabase>(
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let orders = api.fetch_pending_orders().await?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(create_order => Post "/orders" impl ConsoleDatabase);
/// Order intake. The item lines are re-parsed from `orderDetails` server-side; a rejection (unknown item,
/// insufficient stock) is a 400 whose message names the offending line, and has no effect on stock.
pub async fn create_order<B: ConsoleDatabase>(
    api: web::Data<OrderFlowApi<B>>,
    body: web::Json<NewOrder>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received new order submission");
    let order = api.place_order(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(order))
}

route!(update_order => Put "/orders/{id}" impl ConsoleDatabase);
pub async fn update_order<B: ConsoleDatabase>(
    api: web::Data<OrderFlowApi<B>>,
    path: web::Path<i64>,
    body: web::Json<OrderUpdate>,
) -> Result<HttpResponse, ServerError> {
    let order = api.modify_order_status(path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(order))
}

//----------------------------------------------  Payments  ----------------------------------------------------
route!(process_sms => Post "/payments/process-sms" impl ConsoleDatabase);
/// Payment-SMS reconciliation. A business "no match" is still a 200 (`success: false`, with an audit record);
/// non-2xx codes are reserved for malformed input and server faults.
pub async fn process_sms<B: ConsoleDatabase>(
    api: web::Data<OrderFlowApi<B>>,
    body: web::Json<SmsIngest>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received payment SMS");
    let SmsIngest { sms_text, amount, phone } = body.into_inner();
    let required = || ServerError::InvalidRequestBody("SMS text, amount, and phone are required".to_string());
    if sms_text.trim().is_empty() {
        return Err(required());
    }
    let extracted = parse_payment_sms(&sms_text);
    let amount = match amount {
        Some(a) => Rupees::try_from(a).map_err(|e| ServerError::InvalidRequestBody(e.to_string()))?,
        None => extracted.as_ref().map(|p| p.amount).ok_or_else(required)?,
    };
    let phone = phone.or_else(|| extracted.map(|p| p.phone)).ok_or_else(required)?;

    let outcome = api.process_payment_sms(PaymentSmsNotification { sms_text, amount, phone }).await?;
    let result = SmsProcessResult {
        success: outcome.is_matched(),
        message: outcome.message(),
        order_id: outcome.order_id(),
    };
    Ok(HttpResponse::Ok().json(result))
}

//---------------------------------------------- Transactions --------------------------------------------------
route!(list_transactions => Get "/transactions" impl ConsoleDatabase);
pub async fn list_transactions<B: ConsoleDatabase>(
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let transactions = api.fetch_transactions().await?;
    Ok(HttpResponse::Ok().json(transactions))
}

route!(unmatched_transactions => Get "/transactions/unmatched" impl ConsoleDatabase);
pub async fn unmatched_transactions<B: ConsoleDatabase>(
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let transactions = api.fetch_unmatched_transactions().await?;
    Ok(HttpResponse::Ok().json(transactions))
}

//----------------------------------------------    Users   ----------------------------------------------------
route!(list_users => Get "/users" impl UserManagement);
/// Users joined with their role assignments.
pub async fn list_users<B: UserManagement>(api: web::Data<UserApi<B>>) -> Result<HttpResponse, ServerError> {
    let users = api.fetch_users_with_roles().await?;
    Ok(HttpResponse::Ok().json(users))
}

route!(create_user => Post "/users" impl UserManagement);
pub async fn create_user<B: UserManagement>(
    api: web::Data<UserApi<B>>,
    body: web::Json<NewUser>,
) -> Result<HttpResponse, ServerError> {
    let user = api.create_user(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

route!(update_user => Put "/users/{telegram_id}" impl UserManagement);
pub async fn update_user<B: UserManagement>(
    api: web::Data<UserApi<B>>,
    path: web::Path<String>,
    body: web::Json<UserUpdate>,
) -> Result<HttpResponse, ServerError> {
    let user = api
        .update_user(&path.into_inner(), body.into_inner())
        .await?
        .ok_or_else(|| ServerError::NoRecordFound("User not found".to_string()))?;
    Ok(HttpResponse::Ok().json(user))
}

//----------------------------------------------    Roles   ----------------------------------------------------
route!(assign_role => Post "/roles" impl UserManagement);
/// Role assignment. Re-assigning a held role replaces the prior entry rather than duplicating it.
pub async fn assign_role<B: UserManagement>(
    api: web::Data<UserApi<B>>,
    body: web::Json<RoleAssignment>,
) -> Result<HttpResponse, ServerError> {
    let assignment = api.assign_role(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(assignment))
}

route!(remove_role => Delete "/roles" impl UserManagement);
pub async fn remove_role<B: UserManagement>(
    api: web::Data<UserApi<B>>,
    body: web::Json<RoleRemoveRequest>,
) -> Result<HttpResponse, ServerError> {
    let RoleRemoveRequest { telegram_id, role } = body.into_inner();
    if api.remove_role(&telegram_id, role).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(ServerError::NoRecordFound("Role not found".to_string()))
    }
}

//----------------------------------------------  Settings  ----------------------------------------------------
route!(get_setting => Get "/settings/{key}" impl SettingsManagement);
pub async fn get_setting<B: SettingsManagement>(
    api: web::Data<SettingsApi<B>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServerError> {
    let setting = api
        .fetch_setting(&path.into_inner())
        .await?
        .ok_or_else(|| ServerError::NoRecordFound("Setting not found".to_string()))?;
    Ok(HttpResponse::Ok().json(setting))
}

route!(put_setting => Put "/settings" impl SettingsManagement);
pub async fn put_setting<B: SettingsManagement>(
    api: web::Data<SettingsApi<B>>,
    body: web::Json<Setting>,
) -> Result<HttpResponse, ServerError> {
    let setting = api.set_setting(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(setting))
}

//----------------------------------------------  User info ----------------------------------------------------
route!(get_user_info => Get "/user-info/{telegram_id}" impl UserManagement);
pub async fn get_user_info<B: UserManagement>(
    api: web::Data<UserApi<B>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServerError> {
    let info = api
        .fetch_user_info(&path.into_inner())
        .await?
        .ok_or_else(|| ServerError::NoRecordFound("User info not found".to_string()))?;
    Ok(HttpResponse::Ok().json(info))
}

route!(upsert_user_info => Post "/user-info" impl UserManagement);
pub async fn upsert_user_info<B: UserManagement>(
    api: web::Data<UserApi<B>>,
    body: web::Json<NewUserInfo>,
) -> Result<HttpResponse, ServerError> {
    let info = api.upsert_user_info(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(info))
}
