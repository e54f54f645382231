use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub session_ttl_days: i64,
    pub verification_code_ttl_secs: i64,
    /// Identity-provider endpoint that exchanges a login assertion for
    /// profile data.
    pub oauth_userinfo_url: String,
    /// Payment rail endpoint withdrawals are forwarded to. Unset means
    /// requests are recorded and stay pending.
    pub payout_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8001".to_string())
                .parse()
                .unwrap_or(8001),
            session_ttl_days: env::var("SESSION_TTL_DAYS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .unwrap_or(7),
            verification_code_ttl_secs: env::var("VERIFICATION_CODE_TTL_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .unwrap_or(300),
            oauth_userinfo_url: env::var("OAUTH_USERINFO_URL").unwrap_or_else(|_| {
                "https://demobackend.emergentagent.com/auth/v1/env/oauth/session-data".to_string()
            }),
            payout_url: env::var("PAYOUT_URL").ok(),
        })
    }
}
