use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::ledger::{LedgerEntry, LedgerFields, LedgerKind};
use crate::models::tenant::{TenantId, TenantRow};
use crate::models::user::{PublicUser, UserRow};
use crate::store::{Store, StoreError};

#[derive(Default)]
struct Tables {
    entries: Vec<(String, LedgerKind, LedgerEntry)>,
    users: Vec<UserRow>,
    tenants: HashMap<String, TenantRow>,
}

/// In-memory [`Store`] for tests. `fail` makes every call return an error.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store set to fail".to_string()));
        }
        Ok(())
    }

    pub async fn add_tenant(&self, slug: &str, plan_type: &str) {
        self.tables.write().await.tenants.insert(
            slug.to_string(),
            TenantRow {
                slug: slug.to_string(),
                name: slug.to_uppercase(),
                plan_type: plan_type.to_string(),
                created_at: Utc::now(),
            },
        );
    }

    /// Adds a user created `age_minutes` ago.
    pub async fn add_user(&self, tenant: &str, email: &str, role: &str, age_minutes: i64) -> Uuid {
        let id = Uuid::new_v4();
        self.tables.write().await.users.push(UserRow {
            id,
            tenant: tenant.to_string(),
            email: email.to_string(),
            name: email.split('@').next().unwrap_or(email).to_string(),
            password_hash: "$argon2id$v=19$not-a-real-hash".to_string(),
            role: role.to_string(),
            created_at: Utc::now() - Duration::minutes(age_minutes),
        });
        id
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.check()
    }

    async fn list_entries(
        &self,
        tenant: &TenantId,
        kind: LedgerKind,
    ) -> Result<Vec<LedgerEntry>, StoreError> {
        self.check()?;
        let tables = self.tables.read().await;
        let mut entries: Vec<LedgerEntry> = tables
            .entries
            .iter()
            .filter(|(t, k, _)| t == tenant.as_str() && *k == kind)
            .map(|(_, _, e)| e.clone())
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    async fn get_entry(
        &self,
        tenant: &TenantId,
        kind: LedgerKind,
        id: Uuid,
    ) -> Result<Option<LedgerEntry>, StoreError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .entries
            .iter()
            .find(|(t, k, e)| t == tenant.as_str() && *k == kind && e.id == id)
            .map(|(_, _, e)| e.clone()))
    }

    async fn insert_entry(
        &self,
        tenant: &TenantId,
        kind: LedgerKind,
        fields: &LedgerFields,
    ) -> Result<LedgerEntry, StoreError> {
        self.check()?;
        let mut tables = self.tables.write().await;
        // Keep creation order strict even when the clock does not move.
        let now = tables
            .entries
            .iter()
            .map(|(_, _, e)| e.created_at + Duration::microseconds(1))
            .max()
            .map_or_else(Utc::now, |next| next.max(Utc::now()));
        let entry = LedgerEntry {
            id: Uuid::new_v4(),
            name: fields.name.clone(),
            amount: fields.amount,
            date: fields.date,
            category: fields.category.clone(),
            created_at: now,
            updated_at: now,
        };
        tables
            .entries
            .push((tenant.as_str().to_string(), kind, entry.clone()));
        Ok(entry)
    }

    async fn update_entry(
        &self,
        tenant: &TenantId,
        kind: LedgerKind,
        id: Uuid,
        fields: &LedgerFields,
    ) -> Result<Option<LedgerEntry>, StoreError> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let Some((_, _, entry)) = tables
            .entries
            .iter_mut()
            .find(|(t, k, e)| t == tenant.as_str() && *k == kind && e.id == id)
        else {
            return Ok(None);
        };
        entry.name = fields.name.clone();
        entry.amount = fields.amount;
        entry.date = fields.date;
        entry.category = fields.category.clone();
        entry.updated_at = Utc::now();
        Ok(Some(entry.clone()))
    }

    async fn delete_entry(
        &self,
        tenant: &TenantId,
        kind: LedgerKind,
        id: Uuid,
    ) -> Result<bool, StoreError> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let before = tables.entries.len();
        tables
            .entries
            .retain(|(t, k, e)| !(t == tenant.as_str() && *k == kind && e.id == id));
        Ok(tables.entries.len() < before)
    }

    async fn list_users(&self, tenant: &TenantId) -> Result<Vec<PublicUser>, StoreError> {
        self.check()?;
        let tables = self.tables.read().await;
        let mut users: Vec<UserRow> = tables
            .users
            .iter()
            .filter(|u| u.tenant == tenant.as_str())
            .cloned()
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users.into_iter().map(PublicUser::from).collect())
    }

    async fn find_user(
        &self,
        tenant: &TenantId,
        id: Uuid,
    ) -> Result<Option<PublicUser>, StoreError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.id == id && u.tenant == tenant.as_str())
            .cloned()
            .map(PublicUser::from))
    }

    async fn find_tenant(&self, tenant: &TenantId) -> Result<Option<TenantRow>, StoreError> {
        self.check()?;
        Ok(self.tables.read().await.tenants.get(tenant.as_str()).cloned())
    }
}
