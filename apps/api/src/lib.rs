//! Live Plus hospital administration backend.
//!
//! The server half (`routes`, `ledger`, `tenants`, `store`) exposes the JSON
//! API; the `client` half holds the headless sidebar and resource-manager
//! view models that consume it.

pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod ledger;
pub mod models;
pub mod navigation;
pub mod routes;
pub mod state;
pub mod store;
pub mod tenants;
