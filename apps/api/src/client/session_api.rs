use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;

use crate::client::{ApiClient, ClientError};
use crate::models::tenant::TenantId;

/// Endpoints the sidebar consults before it can build navigation.
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// Role of the calling user in `tenant`.
    async fn verify_role(&self, tenant: &TenantId) -> Result<String, ClientError>;

    /// Plan tier of `tenant`. `None` when the response carries no plan.
    async fn plan_type(&self, tenant: &TenantId) -> Result<Option<String>, ClientError>;

    async fn logout(&self) -> Result<(), ClientError>;
}

#[derive(Deserialize)]
struct RoleBody {
    role: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubscriptionBody {
    plan_type: Option<String>,
}

#[derive(Clone)]
pub struct HttpSessionApi {
    client: ApiClient,
}

impl HttpSessionApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SessionApi for HttpSessionApi {
    async fn verify_role(&self, tenant: &TenantId) -> Result<String, ClientError> {
        let body: RoleBody = self
            .client
            .get_json(&format!("/api/{tenant}/auth/verify-role"))
            .await?;
        Ok(body.role)
    }

    async fn plan_type(&self, tenant: &TenantId) -> Result<Option<String>, ClientError> {
        let body: SubscriptionBody = self
            .client
            .get_json(&format!("/api/{tenant}/subscription"))
            .await?;
        Ok(body.plan_type.filter(|p| !p.trim().is_empty()))
    }

    async fn logout(&self) -> Result<(), ClientError> {
        self.client.send_empty(Method::POST, "/api/auth/logout").await
    }
}
