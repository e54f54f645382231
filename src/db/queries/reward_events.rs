use chrono::{Local, NaiveDate, TimeZone, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use entity::reward_event::{ActiveModel, Column, Entity, Model};

use crate::error::AppError;

pub async fn record<C: ConnectionTrait>(
    db: &C,
    account_id: &str,
    source: &str,
    item_id: &str,
    amount_cents: i64,
) -> Result<Model, AppError> {
    let model = ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        account_id: Set(account_id.to_string()),
        source: Set(source.to_string()),
        item_id: Set(item_id.to_string()),
        amount_cents: Set(amount_cents),
        created_at: Set(Utc::now().naive_utc()),
    };
    Ok(model.insert(db).await?)
}

/// Total credited to an account on the given quota day. Timestamps are
/// stored in UTC while quota days roll at local midnight, so the day
/// start is converted before the comparison.
pub async fn earned_on_day<C: ConnectionTrait>(
    db: &C,
    account_id: &str,
    day: NaiveDate,
) -> Result<i64, AppError> {
    let local_midnight = day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| AppError::Internal("invalid day start".to_string()))?;
    let day_start = Local
        .from_local_datetime(&local_midnight)
        .earliest()
        .map(|dt| dt.naive_utc())
        .unwrap_or(local_midnight);

    let events = Entity::find()
        .filter(Column::AccountId.eq(account_id))
        .filter(Column::CreatedAt.gte(day_start))
        .all(db)
        .await?;

    Ok(events.iter().map(|e| e.amount_cents).sum())
}

pub async fn recent<C: ConnectionTrait>(
    db: &C,
    account_id: &str,
    limit: u64,
) -> Result<Vec<Model>, AppError> {
    Ok(Entity::find()
        .filter(Column::AccountId.eq(account_id))
        .order_by_desc(Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await?)
}
