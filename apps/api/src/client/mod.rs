//! Client side of the dashboard: a thin HTTP client plus the headless view
//! models (sidebar, bill/income managers) that drive the UI.
//!
//! Every failure mode (network error, non-2xx status, undecodable body)
//! surfaces as a [`ClientError`]. View models log it and turn it into one
//! generic message per action; nothing is retried.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::tenants::identity::USER_ID_HEADER;

pub mod ledger_api;
pub mod manager;
pub mod preferences;
pub mod session_api;
pub mod sidebar;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client bound to one API base URL, e.g. `http://localhost:8080`.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    user_id: Option<Uuid>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_id: None,
        })
    }

    /// Identifies requests as coming from `user_id`.
    pub fn with_user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{path}", self.base_url));
        match self.user_id {
            Some(id) => builder.header(USER_ID_HEADER, id.to_string()),
            None => builder,
        }
    }

    /// Turns a non-2xx response into `ClientError::Api`, reading the
    /// `{ "error": ... }` body when there is one.
    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.request(Method::GET, path).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self.request(method, path).json(body).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Sends a body-less request and discards the response body.
    pub async fn send_empty(&self, method: Method, path: &str) -> Result<(), ClientError> {
        let response = self.request(method, path).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}
