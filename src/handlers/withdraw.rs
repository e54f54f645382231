use axum::{extract::State, Json};
use sea_orm::TransactionTrait;
use serde::{Deserialize, Serialize};

use crate::auth::middleware::CurrentAccount;
use crate::db::queries;
use crate::error::AppError;
use crate::payout;
use crate::policy;
use crate::AppState;

// --- Request / Response types ---

#[derive(Debug, Deserialize)]
pub struct WithdrawRequest {
    pub amount_cents: i64,
    pub destination: String,
}

#[derive(Debug, Serialize)]
pub struct WithdrawResponse {
    pub message: String,
    pub withdrawal_id: String,
    pub new_balance_cents: i64,
}

#[derive(Debug, Serialize)]
pub struct WithdrawHistoryResponse {
    pub withdrawals: Vec<entity::withdrawal::Model>,
}

// --- Handlers ---

pub async fn request_withdrawal(
    current: CurrentAccount,
    State(state): State<AppState>,
    Json(req): Json<WithdrawRequest>,
) -> Result<Json<WithdrawResponse>, AppError> {
    if req.amount_cents < policy::MIN_WITHDRAWAL_CENTS {
        return Err(AppError::BelowMinimum);
    }

    let destination = req.destination.trim().to_string();
    if destination.is_empty() {
        return Err(AppError::BadRequest("Destination is required".to_string()));
    }

    // Debit and request row commit together; a crash between them cannot
    // lose money. The payout hand-off happens strictly after commit.
    let txn = state.db.begin().await?;

    let debited = queries::accounts::debit(&txn, &current.account.id, req.amount_cents).await?;
    if !debited {
        return Err(AppError::InsufficientBalance);
    }

    let withdrawal = queries::withdrawals::insert_pending(
        &txn,
        &current.account.id,
        req.amount_cents,
        &destination,
    )
    .await?;

    let account = queries::accounts::find_by_id(&txn, &current.account.id)
        .await?
        .ok_or(AppError::Unauthenticated)?;

    txn.commit().await?;

    tracing::info!(
        account_id = %account.id,
        withdrawal_id = %withdrawal.id,
        amount_cents = withdrawal.amount_cents,
        "withdrawal recorded"
    );

    payout::dispatch(&state, withdrawal.clone());

    Ok(Json(WithdrawResponse {
        message: format!(
            "Withdrawal request for {} cents submitted. Processing within 24h.",
            withdrawal.amount_cents
        ),
        withdrawal_id: withdrawal.id,
        new_balance_cents: account.balance_cents,
    }))
}

pub async fn withdraw_history(
    current: CurrentAccount,
    State(state): State<AppState>,
) -> Result<Json<WithdrawHistoryResponse>, AppError> {
    let withdrawals =
        queries::withdrawals::list_for_account(&state.db, &current.account.id).await?;
    Ok(Json(WithdrawHistoryResponse { withdrawals }))
}
