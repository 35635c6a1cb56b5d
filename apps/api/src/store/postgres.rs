use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::ledger::{LedgerEntry, LedgerFields, LedgerKind, LedgerRow};
use crate::models::tenant::{TenantId, TenantRow};
use crate::models::user::{PublicUser, UserRow};
use crate::store::{Store, StoreError};

/// [`Store`] backed by the shared PostgreSQL pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_entries(
        &self,
        tenant: &TenantId,
        kind: LedgerKind,
    ) -> Result<Vec<LedgerEntry>, StoreError> {
        let rows = sqlx::query_as::<_, LedgerRow>(
            r#"
            SELECT * FROM ledger_entries
            WHERE tenant = $1 AND kind = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(tenant.as_str())
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(LedgerEntry::from).collect())
    }

    async fn get_entry(
        &self,
        tenant: &TenantId,
        kind: LedgerKind,
        id: Uuid,
    ) -> Result<Option<LedgerEntry>, StoreError> {
        let row = sqlx::query_as::<_, LedgerRow>(
            "SELECT * FROM ledger_entries WHERE id = $1 AND tenant = $2 AND kind = $3",
        )
        .bind(id)
        .bind(tenant.as_str())
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(LedgerEntry::from))
    }

    async fn insert_entry(
        &self,
        tenant: &TenantId,
        kind: LedgerKind,
        fields: &LedgerFields,
    ) -> Result<LedgerEntry, StoreError> {
        let row = sqlx::query_as::<_, LedgerRow>(
            r#"
            INSERT INTO ledger_entries (id, tenant, kind, name, amount, date, category)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(tenant.as_str())
        .bind(kind.as_str())
        .bind(&fields.name)
        .bind(fields.amount)
        .bind(fields.date)
        .bind(&fields.category)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update_entry(
        &self,
        tenant: &TenantId,
        kind: LedgerKind,
        id: Uuid,
        fields: &LedgerFields,
    ) -> Result<Option<LedgerEntry>, StoreError> {
        let row = sqlx::query_as::<_, LedgerRow>(
            r#"
            UPDATE ledger_entries
            SET name = $4, amount = $5, date = $6, category = $7, updated_at = NOW()
            WHERE id = $1 AND tenant = $2 AND kind = $3
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(tenant.as_str())
        .bind(kind.as_str())
        .bind(&fields.name)
        .bind(fields.amount)
        .bind(fields.date)
        .bind(&fields.category)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(LedgerEntry::from))
    }

    async fn delete_entry(
        &self,
        tenant: &TenantId,
        kind: LedgerKind,
        id: Uuid,
    ) -> Result<bool, StoreError> {
        let result =
            sqlx::query("DELETE FROM ledger_entries WHERE id = $1 AND tenant = $2 AND kind = $3")
                .bind(id)
                .bind(tenant.as_str())
                .bind(kind.as_str())
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_users(&self, tenant: &TenantId) -> Result<Vec<PublicUser>, StoreError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT * FROM users WHERE tenant = $1 ORDER BY created_at DESC",
        )
        .bind(tenant.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(PublicUser::from).collect())
    }

    async fn find_user(
        &self,
        tenant: &TenantId,
        id: Uuid,
    ) -> Result<Option<PublicUser>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1 AND tenant = $2")
            .bind(id)
            .bind(tenant.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(PublicUser::from))
    }

    async fn find_tenant(&self, tenant: &TenantId) -> Result<Option<TenantRow>, StoreError> {
        Ok(
            sqlx::query_as::<_, TenantRow>("SELECT * FROM tenants WHERE slug = $1")
                .bind(tenant.as_str())
                .fetch_optional(&self.pool)
                .await?,
        )
    }
}
