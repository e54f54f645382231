use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::session;
use crate::error::AppError;

pub const SESSION_HEADER: &str = "X-Session-Token";

/// Extracts the authenticated account from the opaque session header.
#[derive(Debug, Clone)]
pub struct CurrentAccount {
    pub account: entity::account::Model,
    pub token_hash: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentAccount
where
    S: Send + Sync + AsRef<crate::AppState>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state: &crate::AppState = state.as_ref();

        let token = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthenticated)?;

        let (account, token_hash) = session::resolve(&app_state.db, token).await?;

        Ok(CurrentAccount {
            account,
            token_hash,
        })
    }
}
