//! The public engine APIs. Each is a thin struct over a backend `B` implementing the relevant storage
//! trait(s); all business rules (totals, state machines, match heuristics) live here, never in handlers.
pub mod catalog_api;
pub mod dashboard_api;
pub mod errors;
pub mod objects;
pub mod order_flow_api;
pub mod settings_api;
pub mod user_api;
