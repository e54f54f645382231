use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An earning account. Monetary columns are integer cents; the floating
/// dollar rendering is a client concern.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub oauth_subject: Option<String>,
    pub picture_url: Option<String>,
    pub balance_cents: i64,
    pub total_earned_cents: i64,
    pub clicks_today: i32,
    pub videos_today: i32,
    pub last_reset_date: chrono::NaiveDate,
    pub is_active: bool,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::session::Entity")]
    Sessions,
    #[sea_orm(has_many = "super::reward_event::Entity")]
    RewardEvents,
    #[sea_orm(has_many = "super::withdrawal::Entity")]
    Withdrawals,
}

impl Related<super::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl Related<super::reward_event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RewardEvents.def()
    }
}

impl Related<super::withdrawal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Withdrawals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
