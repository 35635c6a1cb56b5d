pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ledger::handlers::ledger_routes;
use crate::models::ledger::LedgerKind;
use crate::state::AppState;
use crate::tenants::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Financial records, default tenant
        .merge(ledger_routes("/api/bills", LedgerKind::Bill))
        .merge(ledger_routes("/api/income", LedgerKind::Income))
        // Financial records, tenant-scoped
        .merge(ledger_routes("/api/:tenant/bills", LedgerKind::Bill))
        .merge(ledger_routes("/api/:tenant/income", LedgerKind::Income))
        // Tenant directory
        .route(
            "/api/:tenant/patients",
            get(handlers::handle_list_patients),
        )
        .route(
            "/api/:tenant/auth/verify-role",
            get(handlers::handle_verify_role),
        )
        .route(
            "/api/:tenant/subscription",
            get(handlers::handle_subscription),
        )
        .route("/api/auth/logout", post(handlers::handle_logout))
        .with_state(state)
}
