use axum::{extract::State, Json};
use rand::Rng;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::middleware::CurrentAccount;
use crate::auth::password::{hash_password, validate_password, verify_password};
use crate::auth::{normalize_phone, session, Identifier};
use crate::db::queries;
use crate::error::AppError;
use crate::policy;
use crate::AppState;

use super::AccountSummary;

// --- Request / Response types ---

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct OauthCallbackRequest {
    pub assertion: String,
}

#[derive(Debug, Deserialize)]
pub struct SendCodeRequest {
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyCodeRequest {
    pub phone: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_token: String,
    pub account: AccountSummary,
}

#[derive(Debug, Serialize)]
pub struct SendCodeResponse {
    pub code_id: String,
}

// --- Handlers ---

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    validate_password(&req.password)?;

    let email = req
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_ascii_lowercase);

    let phone = match req.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        Some(raw) => Some(normalize_phone(raw).ok_or(AppError::InvalidPhone)?),
        None => None,
    };

    // At least one contact is required, even though the client form also
    // enforces it.
    if email.is_none() && phone.is_none() {
        return Err(AppError::MissingContact);
    }

    if let Some(ref email) = email {
        if queries::accounts::find_by_email(&state.db, email).await?.is_some() {
            return Err(AppError::DuplicateContact);
        }
    }
    if let Some(ref phone) = phone {
        if queries::accounts::find_by_phone(&state.db, phone).await?.is_some() {
            return Err(AppError::DuplicateContact);
        }
    }

    let now = chrono::Utc::now().naive_utc();
    let password_hash = hash_password(&req.password)?;

    let account = queries::accounts::insert(
        &state.db,
        entity::account::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(req.name.trim().to_string()),
            email: Set(email),
            phone: Set(phone),
            password_hash: Set(Some(password_hash)),
            oauth_subject: Set(None),
            picture_url: Set(None),
            balance_cents: Set(0),
            total_earned_cents: Set(0),
            clicks_today: Set(0),
            videos_today: Set(0),
            last_reset_date: Set(policy::local_today()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        },
    )
    .await?;

    let session_token =
        session::create(&state.db, &account.id, state.config.session_ttl_days).await?;

    Ok(Json(SessionResponse {
        session_token,
        account: AccountSummary::from(&account),
    }))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    // Failures stay uniform so callers cannot probe which contacts exist.
    let identifier = Identifier::parse(&req.identifier).ok_or(AppError::InvalidCredentials)?;

    let account = queries::accounts::find_by_identifier(&state.db, &identifier)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let password_hash = account
        .password_hash
        .as_deref()
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(&req.password, password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    if !account.is_active {
        return Err(AppError::AccountDisabled);
    }

    let session_token =
        session::create(&state.db, &account.id, state.config.session_ttl_days).await?;

    Ok(Json(SessionResponse {
        session_token,
        account: AccountSummary::from(&account),
    }))
}

pub async fn oauth_callback(
    State(state): State<AppState>,
    Json(req): Json<OauthCallbackRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let identity = state.provider.verify_assertion(&req.assertion).await?;

    // Match by the provider's stable subject id, never by email: a reused
    // or changed email at the provider must not take over another account.
    let existing = queries::accounts::find_by_oauth_subject(&state.db, &identity.subject).await?;

    let account = match existing {
        Some(account) => {
            if !account.is_active {
                return Err(AppError::AccountDisabled);
            }
            account
        }
        None => {
            let now = chrono::Utc::now().naive_utc();
            let name = identity
                .name
                .clone()
                .or_else(|| identity.email.clone())
                .unwrap_or_else(|| "Member".to_string());

            queries::accounts::insert(
                &state.db,
                entity::account::ActiveModel {
                    id: Set(Uuid::new_v4().to_string()),
                    name: Set(name),
                    email: Set(identity.email.map(|e| e.to_ascii_lowercase())),
                    phone: Set(None),
                    password_hash: Set(None),
                    oauth_subject: Set(Some(identity.subject)),
                    picture_url: Set(identity.picture),
                    balance_cents: Set(0),
                    total_earned_cents: Set(0),
                    clicks_today: Set(0),
                    videos_today: Set(0),
                    last_reset_date: Set(policy::local_today()),
                    is_active: Set(true),
                    created_at: Set(now),
                    updated_at: Set(now),
                },
            )
            .await?
        }
    };

    let session_token =
        session::create(&state.db, &account.id, state.config.session_ttl_days).await?;

    Ok(Json(SessionResponse {
        session_token,
        account: AccountSummary::from(&account),
    }))
}

pub async fn logout(
    current: CurrentAccount,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    session::revoke(&state.db, &current.token_hash).await?;
    Ok(Json(serde_json::json!({"status": "ok"})))
}

pub async fn send_verification_code(
    State(state): State<AppState>,
    Json(req): Json<SendCodeRequest>,
) -> Result<Json<SendCodeResponse>, AppError> {
    let phone = normalize_phone(&req.phone).ok_or(AppError::InvalidPhone)?;

    let code = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000u32));

    let record = queries::verification_codes::insert(
        &state.db,
        &phone,
        &code,
        state.config.verification_code_ttl_secs,
    )
    .await?;

    // Hand-off to the SMS channel. The code itself is never part of the
    // API response.
    tracing::info!(phone = %phone, code_id = %record.id, "dispatching verification code over SMS");

    Ok(Json(SendCodeResponse { code_id: record.id }))
}

pub async fn verify_code(
    State(state): State<AppState>,
    Json(req): Json<VerifyCodeRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    // A malformed phone can't match a stored code; keep the failure
    // uniform with every other mismatch.
    let phone = normalize_phone(&req.phone).ok_or(AppError::InvalidOrExpiredCode)?;

    let consumed = queries::verification_codes::consume(&state.db, &phone, &req.code).await?;
    if !consumed {
        return Err(AppError::InvalidOrExpiredCode);
    }

    Ok(Json(serde_json::json!({"status": "ok"})))
}
