//! Opaque bearer sessions. Tokens are 32 random bytes, handed to the
//! client hex-encoded; only their SHA-256 hash touches the database.

use chrono::{Duration, Utc};
use rand::Rng;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, ModelTrait, Set};
use sha2::{Digest, Sha256};

use crate::error::AppError;

/// Generate a cryptographically random session token.
pub fn generate_session_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    hex::encode(bytes)
}

/// Hash a token with SHA-256 for storage.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Create a session for an account and return the raw token.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    account_id: &str,
    ttl_days: i64,
) -> Result<String, AppError> {
    let token = generate_session_token();
    let now = Utc::now().naive_utc();

    let model = entity::session::ActiveModel {
        token_hash: Set(hash_token(&token)),
        account_id: Set(account_id.to_string()),
        created_at: Set(now),
        expires_at: Set(now + Duration::days(ttl_days)),
    };
    model.insert(db).await?;

    Ok(token)
}

/// Resolve a raw token to its account. Unknown, expired, and orphaned
/// tokens are all `Unauthenticated`; expired rows are removed on sight.
pub async fn resolve<C: ConnectionTrait>(
    db: &C,
    token: &str,
) -> Result<(entity::account::Model, String), AppError> {
    let token_hash = hash_token(token);

    let session = entity::session::Entity::find_by_id(&token_hash)
        .one(db)
        .await?
        .ok_or(AppError::Unauthenticated)?;

    let now = Utc::now().naive_utc();
    if session.expires_at < now {
        session.delete(db).await?;
        return Err(AppError::Unauthenticated);
    }

    let account = entity::account::Entity::find_by_id(&session.account_id)
        .one(db)
        .await?
        .ok_or(AppError::Unauthenticated)?;

    if !account.is_active {
        return Err(AppError::AccountDisabled);
    }

    Ok((account, token_hash))
}

/// Revoke a session by its stored hash.
pub async fn revoke<C: ConnectionTrait>(db: &C, token_hash: &str) -> Result<(), AppError> {
    entity::session::Entity::delete_by_id(token_hash)
        .exec(db)
        .await?;
    Ok(())
}
