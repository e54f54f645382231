use axum::{extract::State, Json};
use sea_orm::TransactionTrait;
use serde::{Deserialize, Serialize};

use crate::auth::middleware::CurrentAccount;
use crate::catalog;
use crate::db::queries;
use crate::error::AppError;
use crate::policy;
use crate::AppState;

// --- Request / Response types ---

#[derive(Debug, Deserialize)]
pub struct ClickRequest {
    pub content_id: String,
}

#[derive(Debug, Deserialize)]
pub struct VideoCompletionRequest {
    pub video_id: String,
    pub watch_duration_seconds: u32,
}

#[derive(Debug, Serialize)]
pub struct RewardResponse {
    pub message: String,
    pub credited_cents: i64,
    pub new_balance_cents: i64,
    pub clicks_remaining: i32,
    pub videos_remaining: i32,
}

#[derive(Debug, Serialize)]
pub struct ContentListResponse {
    pub content: &'static [catalog::ContentItem],
}

#[derive(Debug, Serialize)]
pub struct VideoListResponse {
    pub videos: &'static [catalog::VideoAd],
}

// --- Handlers ---

pub async fn list_content() -> Json<ContentListResponse> {
    Json(ContentListResponse {
        content: catalog::content_items(),
    })
}

pub async fn list_videos() -> Json<VideoListResponse> {
    Json(VideoListResponse {
        videos: catalog::video_ads(),
    })
}

pub async fn register_click(
    current: CurrentAccount,
    State(state): State<AppState>,
    Json(req): Json<ClickRequest>,
) -> Result<Json<RewardResponse>, AppError> {
    let item = catalog::find_content(&req.content_id).ok_or(AppError::UnknownContent)?;

    let today = policy::local_today();
    queries::accounts::normalize_day(&state.db, &current.account.id, today).await?;

    // Credit and activity row commit together; a credited balance can
    // never exist without its event.
    let txn = state.db.begin().await?;

    let credited =
        queries::accounts::credit_click(&txn, &current.account.id, item.reward_cents, today)
            .await?;
    if !credited {
        return Err(AppError::QuotaExceeded);
    }

    queries::reward_events::record(
        &txn,
        &current.account.id,
        "click",
        item.id,
        item.reward_cents,
    )
    .await?;

    let account = queries::accounts::find_by_id(&txn, &current.account.id)
        .await?
        .ok_or(AppError::Unauthenticated)?;

    txn.commit().await?;

    tracing::debug!(
        account_id = %account.id,
        content_id = %item.id,
        credited_cents = item.reward_cents,
        "click credited"
    );

    Ok(Json(RewardResponse {
        message: format!("Valid click! {} cents added to your balance.", item.reward_cents),
        credited_cents: item.reward_cents,
        new_balance_cents: account.balance_cents,
        clicks_remaining: policy::clicks_remaining(&account),
        videos_remaining: policy::videos_remaining(&account),
    }))
}

pub async fn register_video_completion(
    current: CurrentAccount,
    State(state): State<AppState>,
    Json(req): Json<VideoCompletionRequest>,
) -> Result<Json<RewardResponse>, AppError> {
    let video = catalog::find_video(&req.video_id).ok_or(AppError::UnknownContent)?;

    let today = policy::local_today();
    queries::accounts::normalize_day(&state.db, &current.account.id, today).await?;

    // Quota exhaustion outranks a short watch: the caller must not see a
    // retryable rejection for a day that is already spent.
    let snapshot = queries::accounts::find_by_id(&state.db, &current.account.id)
        .await?
        .ok_or(AppError::Unauthenticated)?;
    if !policy::can_watch_video(&snapshot) {
        return Err(AppError::QuotaExceeded);
    }

    if req.watch_duration_seconds < video.minimum_watch_seconds {
        return Err(AppError::WatchTooShort);
    }

    let txn = state.db.begin().await?;

    let credited =
        queries::accounts::credit_video(&txn, &current.account.id, video.reward_cents, today)
            .await?;
    if !credited {
        return Err(AppError::QuotaExceeded);
    }

    queries::reward_events::record(
        &txn,
        &current.account.id,
        "video",
        video.id,
        video.reward_cents,
    )
    .await?;

    let account = queries::accounts::find_by_id(&txn, &current.account.id)
        .await?
        .ok_or(AppError::Unauthenticated)?;

    txn.commit().await?;

    tracing::debug!(
        account_id = %account.id,
        video_id = %video.id,
        credited_cents = video.reward_cents,
        "video completion credited"
    );

    Ok(Json(RewardResponse {
        message: format!(
            "Video watched! {} cents added to your balance.",
            video.reward_cents
        ),
        credited_cents: video.reward_cents,
        new_balance_cents: account.balance_cents,
        clicks_remaining: policy::clicks_remaining(&account),
        videos_remaining: policy::videos_remaining(&account),
    }))
}
