//! Data access layer.
//!
//! Handlers only see `Arc<dyn Store>`. Production uses [`postgres::PgStore`]
//! over the process-wide pool; tests use the in-memory store.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::ledger::{LedgerEntry, LedgerFields, LedgerKind};
use crate::models::tenant::{TenantId, TenantRow};
use crate::models::user::PublicUser;

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap round-trip used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Entries of one collection, newest first.
    async fn list_entries(
        &self,
        tenant: &TenantId,
        kind: LedgerKind,
    ) -> Result<Vec<LedgerEntry>, StoreError>;

    async fn get_entry(
        &self,
        tenant: &TenantId,
        kind: LedgerKind,
        id: Uuid,
    ) -> Result<Option<LedgerEntry>, StoreError>;

    async fn insert_entry(
        &self,
        tenant: &TenantId,
        kind: LedgerKind,
        fields: &LedgerFields,
    ) -> Result<LedgerEntry, StoreError>;

    /// Replaces all fields. Returns `None` when no such entry exists.
    async fn update_entry(
        &self,
        tenant: &TenantId,
        kind: LedgerKind,
        id: Uuid,
        fields: &LedgerFields,
    ) -> Result<Option<LedgerEntry>, StoreError>;

    /// Returns whether a row was removed.
    async fn delete_entry(
        &self,
        tenant: &TenantId,
        kind: LedgerKind,
        id: Uuid,
    ) -> Result<bool, StoreError>;

    /// Users of a tenant without credentials, newest first.
    async fn list_users(&self, tenant: &TenantId) -> Result<Vec<PublicUser>, StoreError>;

    async fn find_user(
        &self,
        tenant: &TenantId,
        id: Uuid,
    ) -> Result<Option<PublicUser>, StoreError>;

    async fn find_tenant(&self, tenant: &TenantId) -> Result<Option<TenantRow>, StoreError>;
}
