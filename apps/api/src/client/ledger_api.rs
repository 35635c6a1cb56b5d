use async_trait::async_trait;
use reqwest::Method;
use uuid::Uuid;

use crate::client::{ApiClient, ClientError};
use crate::models::ledger::{LedgerEntry, LedgerKind, LedgerPayload, LedgerUpdatePayload};
use crate::models::tenant::TenantId;

/// Operations a resource manager needs from the ledger endpoints.
#[async_trait]
pub trait LedgerApi: Send + Sync {
    async fn list(&self) -> Result<Vec<LedgerEntry>, ClientError>;

    async fn create(&self, payload: &LedgerPayload) -> Result<LedgerEntry, ClientError>;

    async fn update(&self, id: Uuid, payload: &LedgerPayload) -> Result<LedgerEntry, ClientError>;

    async fn delete(&self, id: Uuid) -> Result<(), ClientError>;
}

/// [`LedgerApi`] over HTTP. Without a tenant it talks to the default-tenant
/// routes (`/api/bills`), otherwise to `/api/{tenant}/bills`.
#[derive(Clone)]
pub struct HttpLedgerApi {
    client: ApiClient,
    kind: LedgerKind,
    tenant: Option<TenantId>,
}

impl HttpLedgerApi {
    pub fn new(client: ApiClient, kind: LedgerKind, tenant: Option<TenantId>) -> Self {
        Self {
            client,
            kind,
            tenant,
        }
    }

    fn collection_path(&self) -> String {
        match &self.tenant {
            Some(tenant) => format!("/api/{tenant}/{}", self.kind.collection()),
            None => format!("/api/{}", self.kind.collection()),
        }
    }
}

#[async_trait]
impl LedgerApi for HttpLedgerApi {
    async fn list(&self) -> Result<Vec<LedgerEntry>, ClientError> {
        self.client.get_json(&self.collection_path()).await
    }

    async fn create(&self, payload: &LedgerPayload) -> Result<LedgerEntry, ClientError> {
        self.client
            .send_json(Method::POST, &self.collection_path(), payload)
            .await
    }

    async fn update(&self, id: Uuid, payload: &LedgerPayload) -> Result<LedgerEntry, ClientError> {
        // The collection-level PUT carries the id in the body.
        let body = LedgerUpdatePayload {
            id: Some(id),
            fields: payload.clone(),
        };
        self.client
            .send_json(Method::PUT, &self.collection_path(), &body)
            .await
    }

    async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        let path = format!("{}/{id}", self.collection_path());
        self.client.send_empty(Method::DELETE, &path).await
    }
}
