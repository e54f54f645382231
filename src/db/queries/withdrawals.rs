use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use entity::withdrawal::{ActiveModel, Column, Entity, Model};

use crate::error::AppError;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_FAILED: &str = "failed";

pub async fn insert_pending<C: ConnectionTrait>(
    db: &C,
    account_id: &str,
    amount_cents: i64,
    destination: &str,
) -> Result<Model, AppError> {
    let model = ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        account_id: Set(account_id.to_string()),
        amount_cents: Set(amount_cents),
        destination: Set(destination.to_string()),
        status: Set(STATUS_PENDING.to_string()),
        created_at: Set(Utc::now().naive_utc()),
        processed_at: Set(None),
    };
    Ok(model.insert(db).await?)
}

pub async fn mark_status<C: ConnectionTrait>(
    db: &C,
    id: &str,
    status: &str,
) -> Result<(), AppError> {
    let model = ActiveModel {
        id: Set(id.to_string()),
        status: Set(status.to_string()),
        processed_at: Set(Some(Utc::now().naive_utc())),
        ..Default::default()
    };
    model.update(db).await?;
    Ok(())
}

pub async fn list_for_account<C: ConnectionTrait>(
    db: &C,
    account_id: &str,
) -> Result<Vec<Model>, AppError> {
    Ok(Entity::find()
        .filter(Column::AccountId.eq(account_id))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await?)
}
