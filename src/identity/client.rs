use reqwest::Client;
use std::time::Duration;

use super::error::IdentityError;
use super::types::ProviderUser;
use crate::config::ProviderConfig;

/// Typed client for the hosted identity provider REST API. Lookups are bulk
/// and by email; nothing is cached or stored.
pub struct IdentityClient {
    client: Client,
    base_url: String,
    secret_key: String,
    timeout: Duration,
}

impl IdentityClient {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_url.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Bulk lookup by email address. The provider returns matches in its own
    /// order; callers re-sort against the queried list.
    pub async fn users_by_email(&self, emails: &[String]) -> Result<Vec<ProviderUser>, IdentityError> {
        if emails.is_empty() {
            return Ok(Vec::new());
        }

        let query: Vec<(&str, &str)> = emails
            .iter()
            .map(|email| ("email_address", email.as_str()))
            .collect();

        let response = self
            .client
            .get(format!("{}/v1/users", self.base_url))
            .query(&query)
            .bearer_auth(&self.secret_key)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(IdentityError::Status { status, body });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| IdentityError::InvalidResponse(e.to_string()))
    }
}
