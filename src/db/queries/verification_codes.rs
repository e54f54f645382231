use chrono::{Duration, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use entity::verification_code::{ActiveModel, Column, Entity, Model};

use crate::error::AppError;

pub async fn insert<C: ConnectionTrait>(
    db: &C,
    phone: &str,
    code: &str,
    ttl_secs: i64,
) -> Result<Model, AppError> {
    let now = Utc::now().naive_utc();

    let model = ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        phone: Set(phone.to_string()),
        code: Set(code.to_string()),
        expires_at: Set(now + Duration::seconds(ttl_secs)),
        consumed: Set(false),
        created_at: Set(now),
    };
    Ok(model.insert(db).await?)
}

/// Consume a matching live code. The consume is a guarded UPDATE so two
/// concurrent verifies of the same code cannot both succeed. Returns
/// false when no unconsumed, unexpired match exists.
pub async fn consume<C: ConnectionTrait>(
    db: &C,
    phone: &str,
    code: &str,
) -> Result<bool, AppError> {
    let now = Utc::now().naive_utc();

    let result = Entity::update_many()
        .col_expr(Column::Consumed, Expr::value(true))
        .filter(Column::Phone.eq(phone))
        .filter(Column::Code.eq(code))
        .filter(Column::Consumed.eq(false))
        .filter(Column::ExpiresAt.gt(now))
        .exec(db)
        .await?;

    Ok(result.rows_affected >= 1)
}
