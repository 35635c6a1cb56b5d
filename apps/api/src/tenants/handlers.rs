use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::errors::AppError;
use crate::models::tenant::{SubscriptionResponse, TenantId};
use crate::models::user::PublicUser;
use crate::state::AppState;
use crate::tenants::identity::CallerId;

/// Cookie cleared on logout. Issued by the upstream authentication layer.
pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoleResponse {
    pub role: String,
}

fn parse_tenant(raw: &str) -> Result<TenantId, AppError> {
    TenantId::new(raw).ok_or_else(|| AppError::BadRequest(format!("Invalid tenant '{raw}'")))
}

/// GET /api/:tenant/patients
pub async fn handle_list_patients(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
) -> Result<Json<Vec<PublicUser>>, AppError> {
    let tenant = parse_tenant(&tenant)?;
    let users = state
        .store
        .list_users(&tenant)
        .await
        .map_err(AppError::store("Failed to fetch users"))?;
    Ok(Json(users))
}

/// GET /api/:tenant/auth/verify-role
pub async fn handle_verify_role(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
    CallerId(user_id): CallerId,
) -> Result<Json<RoleResponse>, AppError> {
    let tenant = parse_tenant(&tenant)?;
    let user = state
        .store
        .find_user(&tenant, user_id)
        .await
        .map_err(AppError::store("Failed to verify role"))?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found in {tenant}")))?;
    Ok(Json(RoleResponse { role: user.role }))
}

/// GET /api/:tenant/subscription
pub async fn handle_subscription(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
) -> Result<Json<SubscriptionResponse>, AppError> {
    let tenant = parse_tenant(&tenant)?;
    let row = state
        .store
        .find_tenant(&tenant)
        .await
        .map_err(AppError::store("Failed to fetch subscription"))?
        .ok_or_else(|| AppError::NotFound(format!("Tenant {tenant} not found")))?;
    Ok(Json(SubscriptionResponse {
        plan_type: row.plan_type,
    }))
}

/// POST /api/auth/logout
pub async fn handle_logout() -> impl IntoResponse {
    info!("Session cookie cleared");
    (
        [(
            header::SET_COOKIE,
            format!("{SESSION_COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax"),
        )],
        Json(json!({ "message": "Logged out" })),
    )
}
