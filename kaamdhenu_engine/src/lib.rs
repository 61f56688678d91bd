//! KaamDhenu Engine
//!
//! The core library for the KaamDhenu distribution console: catalog, order intake, payment reconciliation
//! and dashboard aggregation for a small multi-district goods operation. It is HTTP-framework-agnostic.
//!
//! The library is divided into two main sections:
//! 1. Storage management ([`mod@traits`] and the SQLite backend). You should never need to touch the
//!    database directly; use the public APIs instead. The exception is the data types, which are defined in
//!    the [`db_types`] module and are public.
//! 2. The engine public API: [`OrderFlowApi`] (order intake, payment-SMS matching and the order state
//!    machine), [`CatalogApi`], [`UserApi`], [`SettingsApi`] and [`DashboardApi`]. Backends implement the
//!    traits in [`mod@traits`] to drive these.
//!
//! The invariants worth knowing about live in the order flow: stock never goes negative (deduction is an
//! atomic conditional update), order totals are always computed server-side, and intake is all-or-nothing:
//! a rejected line rolls back every earlier deduction.
mod console_api;

pub mod capabilities;
pub mod db_types;
pub mod helpers;
pub mod traits;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
mod sqlite;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;

pub use console_api::{
    catalog_api::CatalogApi,
    dashboard_api::DashboardApi,
    errors::OrderFlowError,
    objects::{PaymentSmsNotification, SmsMatchOutcome, UserProfile},
    order_flow_api::OrderFlowApi,
    settings_api::{SettingsApi, LOW_STOCK_THRESHOLD_KEY},
    user_api::UserApi,
};
