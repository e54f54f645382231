//! External identity provider. The service never runs the OAuth redirect
//! dance itself; it receives a provider-issued assertion from the client
//! and exchanges it for profile data over HTTPS.

use serde::Deserialize;

use crate::config::Config;
use crate::error::AppError;

/// Profile data vouched for by the provider. `subject` is the provider's
/// stable identifier for the user and the only field accounts are matched
/// by.
#[derive(Debug, Clone)]
pub struct ProviderIdentity {
    pub subject: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserInfoResponse {
    id: String,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

#[derive(Clone)]
pub struct IdentityProvider {
    endpoint: String,
    http_client: reqwest::Client,
}

impl IdentityProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            endpoint: config.oauth_userinfo_url.clone(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Verify an assertion with the provider. A provider-side rejection is
    /// `InvalidAssertion`; transport failures surface as gateway errors.
    pub async fn verify_assertion(&self, assertion: &str) -> Result<ProviderIdentity, AppError> {
        let response = self
            .http_client
            .get(&self.endpoint)
            .header("X-Session-ID", assertion)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "identity provider rejected assertion");
            return Err(AppError::InvalidAssertion);
        }

        let info: UserInfoResponse = response
            .json()
            .await
            .map_err(|_| AppError::InvalidAssertion)?;

        if info.id.is_empty() {
            return Err(AppError::InvalidAssertion);
        }

        Ok(ProviderIdentity {
            subject: info.id,
            email: info.email,
            name: info.name,
            picture: info.picture,
        })
    }
}
