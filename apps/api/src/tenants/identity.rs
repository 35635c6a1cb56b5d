use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;

/// Header set by the authentication layer in front of this service.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller. Session handling lives upstream; this service
/// only trusts the user id it is handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;
        let id = Uuid::parse_str(raw.trim()).map_err(|_| AppError::Unauthorized)?;
        Ok(CallerId(id))
    }
}
