//! Account lookups and the ledger mutations.
//!
//! Every mutation that the daily quota or the balance guards is a single
//! conditional UPDATE whose row count decides the outcome. That makes the
//! check-and-increment serializable per account without any in-process
//! lock: two concurrent submissions both hit the same row, and at most
//! the permitted number of them can match the guard.

use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, SqlErr};

use entity::account::{ActiveModel, Column, Entity, Model};

use crate::auth::Identifier;
use crate::error::AppError;

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<Model>, AppError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn find_by_email<C: ConnectionTrait>(
    db: &C,
    email: &str,
) -> Result<Option<Model>, AppError> {
    Ok(Entity::find()
        .filter(Column::Email.eq(email))
        .one(db)
        .await?)
}

pub async fn find_by_phone<C: ConnectionTrait>(
    db: &C,
    phone: &str,
) -> Result<Option<Model>, AppError> {
    Ok(Entity::find()
        .filter(Column::Phone.eq(phone))
        .one(db)
        .await?)
}

pub async fn find_by_identifier<C: ConnectionTrait>(
    db: &C,
    identifier: &Identifier,
) -> Result<Option<Model>, AppError> {
    match identifier {
        Identifier::Email(email) => find_by_email(db, email).await,
        Identifier::Phone(phone) => find_by_phone(db, phone).await,
    }
}

pub async fn find_by_oauth_subject<C: ConnectionTrait>(
    db: &C,
    subject: &str,
) -> Result<Option<Model>, AppError> {
    Ok(Entity::find()
        .filter(Column::OauthSubject.eq(subject))
        .one(db)
        .await?)
}

/// The unique keys on email, phone, and oauth_subject have the last
/// word; a registration racing past the handler's pre-checks surfaces
/// here as a duplicate, not as an internal error.
pub async fn insert<C: ConnectionTrait>(db: &C, model: ActiveModel) -> Result<Model, AppError> {
    model.insert(db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::DuplicateContact,
        _ => e.into(),
    })
}

/// Zeroes both daily counters when the row's quota day is not `today`.
/// Runs before any quota evaluation; the reset is visible to the caller.
pub async fn normalize_day<C: ConnectionTrait>(
    db: &C,
    id: &str,
    today: NaiveDate,
) -> Result<(), AppError> {
    Entity::update_many()
        .col_expr(Column::ClicksToday, Expr::value(0))
        .col_expr(Column::VideosToday, Expr::value(0))
        .col_expr(Column::LastResetDate, Expr::value(today))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now().naive_utc()))
        .filter(Column::Id.eq(id))
        .filter(Column::LastResetDate.ne(today))
        .exec(db)
        .await?;
    Ok(())
}

/// Guarded credit: increments the given daily counter and credits both
/// balance and lifetime earnings, but only while the counter is under its
/// limit for today's quota day. Returns false when the guard fails, i.e.
/// the quota is exhausted.
async fn credit_guarded<C: ConnectionTrait>(
    db: &C,
    id: &str,
    counter: Column,
    limit: i32,
    amount_cents: i64,
    today: NaiveDate,
) -> Result<bool, AppError> {
    let result = Entity::update_many()
        .col_expr(counter, Expr::col(counter).add(1))
        .col_expr(
            Column::BalanceCents,
            Expr::col(Column::BalanceCents).add(amount_cents),
        )
        .col_expr(
            Column::TotalEarnedCents,
            Expr::col(Column::TotalEarnedCents).add(amount_cents),
        )
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now().naive_utc()))
        .filter(Column::Id.eq(id))
        .filter(counter.lt(limit))
        .filter(Column::LastResetDate.eq(today))
        .exec(db)
        .await?;

    Ok(result.rows_affected == 1)
}

pub async fn credit_click<C: ConnectionTrait>(
    db: &C,
    id: &str,
    amount_cents: i64,
    today: NaiveDate,
) -> Result<bool, AppError> {
    credit_guarded(
        db,
        id,
        Column::ClicksToday,
        crate::policy::DAILY_CLICK_LIMIT,
        amount_cents,
        today,
    )
    .await
}

pub async fn credit_video<C: ConnectionTrait>(
    db: &C,
    id: &str,
    amount_cents: i64,
    today: NaiveDate,
) -> Result<bool, AppError> {
    credit_guarded(
        db,
        id,
        Column::VideosToday,
        crate::policy::DAILY_VIDEO_LIMIT,
        amount_cents,
        today,
    )
    .await
}

/// Guarded debit: reduces the balance only while it covers the amount.
/// Lifetime earnings are never touched by a debit. Returns false when the
/// balance falls short.
pub async fn debit<C: ConnectionTrait>(
    db: &C,
    id: &str,
    amount_cents: i64,
) -> Result<bool, AppError> {
    let result = Entity::update_many()
        .col_expr(
            Column::BalanceCents,
            Expr::col(Column::BalanceCents).sub(amount_cents),
        )
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now().naive_utc()))
        .filter(Column::Id.eq(id))
        .filter(Column::BalanceCents.gte(amount_cents))
        .exec(db)
        .await?;

    Ok(result.rows_affected == 1)
}
