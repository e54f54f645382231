pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod payout;
pub mod policy;
pub mod rate_limit;
pub mod routes;

use sea_orm::DatabaseConnection;

use auth::provider::IdentityProvider;
use config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Config,
    pub provider: IdentityProvider,
}

impl AsRef<AppState> for AppState {
    fn as_ref(&self) -> &AppState {
        self
    }
}
