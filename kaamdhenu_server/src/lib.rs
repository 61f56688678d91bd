//! # KaamDhenu server
//! The HTTP surface for the KaamDhenu distribution console. It is a thin shell over
//! [`kaamdhenu_engine`]: handlers deserialize, call an engine API, and map errors to status codes.
//! Nothing in this crate computes a total, checks stock, or decides a payment match.
//!
//! ## Configuration
//! The server is configured via environment variables (`KD_HOST`, `KD_PORT`, `KD_DATABASE_URL`).
//! See [config](config/index.html).
//!
//! ## Routes
//! Everything lives under `/api` (plus a bare `/health` liveness probe): the dashboard snapshot, catalog
//! CRUD, order intake and status updates, payment-SMS processing, users/roles, the transaction ledger,
//! settings, and the address book. See [routes](routes/index.html).

pub mod config;
pub mod data_objects;
pub mod errors;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
