//! Daily-quota policy and the monetary floor for withdrawals.
//!
//! The decision helpers are pure over normalized counters; the
//! day-boundary normalization itself is a conditional UPDATE in
//! `db::queries::accounts` so the reset and the permission check share
//! one serialization point.

use chrono::NaiveDate;
use entity::account;

pub const DAILY_CLICK_LIMIT: i32 = 20;
pub const DAILY_VIDEO_LIMIT: i32 = 10;
pub const MIN_WITHDRAWAL_CENTS: i64 = 1_000;

/// The calendar day counters apply to. Quota days roll over at the local
/// midnight.
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn can_click(account: &account::Model) -> bool {
    account.clicks_today < DAILY_CLICK_LIMIT
}

pub fn can_watch_video(account: &account::Model) -> bool {
    account.videos_today < DAILY_VIDEO_LIMIT
}

pub fn clicks_remaining(account: &account::Model) -> i32 {
    (DAILY_CLICK_LIMIT - account.clicks_today).max(0)
}

pub fn videos_remaining(account: &account::Model) -> i32 {
    (DAILY_VIDEO_LIMIT - account.videos_today).max(0)
}
