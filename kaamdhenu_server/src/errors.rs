use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use kaamdhenu_engine::{
    traits::{CatalogError, ConsoleDbError, LedgerError, OrderError, SettingsError, UserApiError},
    OrderFlowError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    /// Malformed submission shape. Never partially applied.
    #[error("{0}")]
    InvalidRequestBody(String),
    /// Business-rule rejection (unknown item, insufficient stock, duplicate registration). The message is
    /// specific enough for the caller to self-correct; the request has had no effect.
    #[error("{0}")]
    BusinessRuleRejection(String),
    /// A state-machine violation on an order status change.
    #[error("{0}")]
    InvalidStatusChange(String),
    /// Referencing an entity that does not exist, as distinct from a validation error.
    #[error("{0}")]
    NoRecordFound(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::BusinessRuleRejection(_) => StatusCode::BAD_REQUEST,
            Self::InvalidStatusChange(_) => StatusCode::BAD_REQUEST,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

impl From<CatalogError> for ServerError {
    fn from(e: CatalogError) -> Self {
        let msg = e.to_string();
        match e {
            CatalogError::DatabaseError(_) => Self::BackendError(msg),
            CatalogError::ProductNotFound(_) => Self::NoRecordFound("Product not found".to_string()),
            CatalogError::ProductNotInCatalog { .. } | CatalogError::InsufficientStock { .. } => {
                Self::BusinessRuleRejection(msg)
            },
            CatalogError::InvalidProduct(_) => Self::InvalidRequestBody(msg),
        }
    }
}

impl From<OrderError> for ServerError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::DatabaseError(_) => Self::BackendError(e.to_string()),
            OrderError::OrderNotFound(_) => Self::NoRecordFound("Order not found".to_string()),
        }
    }
}

impl From<LedgerError> for ServerError {
    fn from(e: LedgerError) -> Self {
        Self::BackendError(e.to_string())
    }
}

impl From<SettingsError> for ServerError {
    fn from(e: SettingsError) -> Self {
        Self::BackendError(e.to_string())
    }
}

impl From<UserApiError> for ServerError {
    fn from(e: UserApiError) -> Self {
        let msg = e.to_string();
        match e {
            UserApiError::DatabaseError(_) => Self::BackendError(msg),
            UserApiError::UserAlreadyExists(_) => Self::BusinessRuleRejection(msg),
            UserApiError::UserNotFound(_) => Self::NoRecordFound("User not found".to_string()),
            UserApiError::DistrictRequired(_) => Self::InvalidRequestBody(msg),
        }
    }
}

impl From<ConsoleDbError> for ServerError {
    fn from(e: ConsoleDbError) -> Self {
        match e {
            ConsoleDbError::Catalog(c) => c.into(),
            ConsoleDbError::Order(o) => o.into(),
            ConsoleDbError::Ledger(l) => l.into(),
            ConsoleDbError::User(u) => u.into(),
            ConsoleDbError::Settings(s) => s.into(),
            ConsoleDbError::OrderNotPending(_) => Self::BusinessRuleRejection(e.to_string()),
            ConsoleDbError::DatabaseError(_) => Self::BackendError(e.to_string()),
        }
    }
}

impl From<OrderFlowError> for ServerError {
    fn from(e: OrderFlowError) -> Self {
        let msg = e.to_string();
        match e {
            OrderFlowError::Catalog(c) => c.into(),
            OrderFlowError::InvalidQuantity { .. } => Self::BusinessRuleRejection(msg),
            OrderFlowError::InvalidAmount(_) => Self::InvalidRequestBody(msg),
            OrderFlowError::OrderNotFound(_) => Self::NoRecordFound("Order not found".to_string()),
            OrderFlowError::OrderStatusChangeForbidden { .. }
            | OrderFlowError::PaymentStatusChangeForbidden { .. }
            | OrderFlowError::StatusChangeNoOp => Self::InvalidStatusChange(msg),
            OrderFlowError::Order(o) => o.into(),
            OrderFlowError::Ledger(l) => l.into(),
            OrderFlowError::Database(d) => d.into(),
        }
    }
}
