use axum::{extract::State, Json};
use serde::Serialize;

use crate::auth::middleware::CurrentAccount;
use crate::db::queries;
use crate::error::AppError;
use crate::policy;
use crate::AppState;

use super::AccountSummary;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub account: AccountSummary,
    pub balance_cents: i64,
    pub total_earned_cents: i64,
    pub clicks_today: i32,
    pub videos_today: i32,
    pub clicks_remaining: i32,
    pub videos_remaining: i32,
    pub today_earnings_cents: i64,
    pub recent_activity: Vec<entity::reward_event::Model>,
}

pub async fn get_dashboard(
    current: CurrentAccount,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let today = policy::local_today();

    // The extractor's snapshot may predate the day boundary; normalize
    // and re-read so the counters shown match the quota actually applied.
    queries::accounts::normalize_day(&state.db, &current.account.id, today).await?;
    let account = queries::accounts::find_by_id(&state.db, &current.account.id)
        .await?
        .ok_or(AppError::Unauthenticated)?;

    let today_earnings_cents =
        queries::reward_events::earned_on_day(&state.db, &account.id, today).await?;
    let recent_activity = queries::reward_events::recent(&state.db, &account.id, 10).await?;

    Ok(Json(DashboardResponse {
        balance_cents: account.balance_cents,
        total_earned_cents: account.total_earned_cents,
        clicks_today: account.clicks_today,
        videos_today: account.videos_today,
        clicks_remaining: policy::clicks_remaining(&account),
        videos_remaining: policy::videos_remaining(&account),
        today_earnings_cents,
        recent_activity,
        account: AccountSummary::from(&account),
    }))
}
