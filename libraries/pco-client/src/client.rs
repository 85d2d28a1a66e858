//! Main Planning Center client.

use crate::error::{ClientError, Result};
use crate::services::ServicesClient;
use crate::types::ClientConfig;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Client for the Planning Center Services API.
///
/// Holds the connection pool and base URL only. Credentials are supplied per
/// call through [`PlanningCenterClient::services`], so one client can be
/// shared by concurrent requests for different users.
///
/// # Example
///
/// ```ignore
/// use pco_client::{ClientConfig, PlanningCenterClient};
///
/// let client = PlanningCenterClient::new(ClientConfig::default())?;
/// let me = client.services(&access_token)?.current_user().await?;
/// println!("Hello {}", me.first_name);
/// ```
#[derive(Debug, Clone)]
pub struct PlanningCenterClient {
    http: Client,
    base_url: String,
}

impl PlanningCenterClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        // Validate URL
        if config.base_url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        // Create HTTP client with reasonable defaults
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("PcoSkill/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        debug!(base_url = %base_url, "Planning Center client created");

        Ok(Self { http, base_url })
    }

    /// Get the API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Scope the client to one user's access token.
    ///
    /// Returns `AuthRequired` if the token is empty.
    pub fn services<'a>(&'a self, access_token: &'a str) -> Result<ServicesClient<'a>> {
        if access_token.trim().is_empty() {
            return Err(ClientError::AuthRequired);
        }
        Ok(ServicesClient::new(&self.http, &self.base_url, access_token))
    }
}
