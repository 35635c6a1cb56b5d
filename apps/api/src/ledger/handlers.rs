use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, AppJson};
use crate::ledger::validation::validate_payload;
use crate::models::ledger::{LedgerEntry, LedgerKind, LedgerUpdatePayload};
use crate::models::tenant::TenantId;
use crate::state::AppState;

/// Path parameters are optional: the default-tenant collection route has none.
type PathParams = Option<Path<HashMap<String, String>>>;

fn params_of(params: PathParams) -> HashMap<String, String> {
    params.map(|Path(p)| p).unwrap_or_default()
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// Routes for one ledger collection mounted at `prefix`, e.g. `/api/bills` or
/// `/api/:tenant/income`. A `:tenant` segment selects the tenant; without
/// one the configured default tenant is used.
pub fn ledger_routes(prefix: &str, kind: LedgerKind) -> Router<AppState> {
    Router::new()
        .route(
            prefix,
            get(move |state: State<AppState>, params: PathParams| {
                handle_list(state, params, kind)
            })
            .post(
                move |state: State<AppState>,
                      params: PathParams,
                      body: AppJson<LedgerUpdatePayload>| {
                    handle_create(state, params, kind, body)
                },
            )
            .put(
                move |state: State<AppState>,
                      params: PathParams,
                      body: AppJson<LedgerUpdatePayload>| {
                    handle_update(state, params, kind, body)
                },
            ),
        )
        .route(
            &format!("{prefix}/:id"),
            get(move |state: State<AppState>, params: PathParams| {
                handle_get(state, params, kind)
            })
            .put(
                move |state: State<AppState>,
                      params: PathParams,
                      body: AppJson<LedgerUpdatePayload>| {
                    handle_update(state, params, kind, body)
                },
            )
            .delete(move |state: State<AppState>, params: PathParams| {
                handle_delete(state, params, kind)
            }),
        )
}

fn tenant_scope(state: &AppState, params: &HashMap<String, String>) -> Result<TenantId, AppError> {
    match params.get("tenant") {
        Some(raw) => TenantId::new(raw.as_str())
            .ok_or_else(|| AppError::BadRequest(format!("Invalid tenant '{raw}'"))),
        None => Ok(state.config.default_tenant.clone()),
    }
}

fn path_id(params: &HashMap<String, String>) -> Result<Option<Uuid>, AppError> {
    params
        .get("id")
        .map(|raw| {
            Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid id '{raw}'")))
        })
        .transpose()
}

fn not_found(kind: LedgerKind, id: Uuid) -> AppError {
    AppError::NotFound(format!("No {} with id {id}", kind.as_str()))
}

/// GET /api/{bills,income}
pub async fn handle_list(
    State(state): State<AppState>,
    params: PathParams,
    kind: LedgerKind,
) -> Result<Json<Vec<LedgerEntry>>, AppError> {
    let params = params_of(params);
    let tenant = tenant_scope(&state, &params)?;
    let entries = state
        .store
        .list_entries(&tenant, kind)
        .await
        .map_err(AppError::store(format!("Failed to fetch {}", kind.plural_noun())))?;
    Ok(Json(entries))
}

/// GET /api/{bills,income}/:id
pub async fn handle_get(
    State(state): State<AppState>,
    params: PathParams,
    kind: LedgerKind,
) -> Result<Json<LedgerEntry>, AppError> {
    let params = params_of(params);
    let tenant = tenant_scope(&state, &params)?;
    let id = path_id(&params)?.ok_or_else(|| AppError::BadRequest("Missing id".to_string()))?;
    let entry = state
        .store
        .get_entry(&tenant, kind, id)
        .await
        .map_err(AppError::store(format!("Failed to fetch {}", kind.as_str())))?
        .ok_or_else(|| not_found(kind, id))?;
    Ok(Json(entry))
}

/// POST /api/{bills,income}
pub async fn handle_create(
    State(state): State<AppState>,
    params: PathParams,
    kind: LedgerKind,
    AppJson(body): AppJson<LedgerUpdatePayload>,
) -> Result<(StatusCode, Json<LedgerEntry>), AppError> {
    let params = params_of(params);
    let tenant = tenant_scope(&state, &params)?;
    let fields = validate_payload(kind, &body.fields)?;
    let entry = state
        .store
        .insert_entry(&tenant, kind, &fields)
        .await
        .map_err(AppError::store(format!("Failed to create {}", kind.as_str())))?;
    info!("Created {kind} {} for tenant {tenant}", entry.id);
    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /api/{bills,income} (id in body) and PUT /api/{bills,income}/:id
pub async fn handle_update(
    State(state): State<AppState>,
    params: PathParams,
    kind: LedgerKind,
    AppJson(body): AppJson<LedgerUpdatePayload>,
) -> Result<Json<LedgerEntry>, AppError> {
    let params = params_of(params);
    let tenant = tenant_scope(&state, &params)?;
    let id = match (path_id(&params)?, body.id) {
        (Some(path), Some(in_body)) if path != in_body => {
            return Err(AppError::BadRequest(
                "Id in body does not match id in path".to_string(),
            ))
        }
        (Some(id), _) | (None, Some(id)) => id,
        (None, None) => return Err(AppError::BadRequest("Missing id".to_string())),
    };
    let fields = validate_payload(kind, &body.fields)?;
    let entry = state
        .store
        .update_entry(&tenant, kind, id, &fields)
        .await
        .map_err(AppError::store(format!("Failed to update {}", kind.as_str())))?
        .ok_or_else(|| not_found(kind, id))?;
    info!("Updated {kind} {id} for tenant {tenant}");
    Ok(Json(entry))
}

/// DELETE /api/{bills,income}/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    params: PathParams,
    kind: LedgerKind,
) -> Result<Json<DeleteResponse>, AppError> {
    let params = params_of(params);
    let tenant = tenant_scope(&state, &params)?;
    let id = path_id(&params)?.ok_or_else(|| AppError::BadRequest("Missing id".to_string()))?;
    let removed = state
        .store
        .delete_entry(&tenant, kind, id)
        .await
        .map_err(AppError::store(format!("Failed to delete {}", kind.as_str())))?;
    if !removed {
        return Err(not_found(kind, id));
    }
    info!("Deleted {kind} {id} for tenant {tenant}");
    Ok(Json(DeleteResponse {
        message: format!("Deleted {} {id}", kind.as_str()),
    }))
}
