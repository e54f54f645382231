pub mod auth;
pub mod dashboard;
pub mod rewards;
pub mod withdraw;

use serde::Serialize;

/// The account fields every authenticated response may carry. Never
/// includes the password hash or counters; those belong to the dashboard.
#[derive(Debug, Serialize)]
pub struct AccountSummary {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub picture_url: Option<String>,
    pub balance_cents: i64,
    pub total_earned_cents: i64,
}

impl From<&entity::account::Model> for AccountSummary {
    fn from(account: &entity::account::Model) -> Self {
        Self {
            id: account.id.clone(),
            name: account.name.clone(),
            email: account.email.clone(),
            phone: account.phone.clone(),
            picture_url: account.picture_url.clone(),
            balance_cents: account.balance_cents,
            total_earned_cents: account.total_earned_cents,
        }
    }
}
