use async_trait::async_trait;
use reqwest::Client;

use platformd_core::Platform;

use super::{CommandClient, CommandClientError};

/// HTTP implementation of [`CommandClient`].
///
/// Holds one long-lived `reqwest::Client` (connection reuse) and the full
/// endpoint URL configured at startup.
pub struct HttpCommandClient {
    client: Client,
    endpoint: String,
}

impl HttpCommandClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl CommandClient for HttpCommandClient {
    async fn send_platform(&self, platform: &Platform) -> Result<(), CommandClientError> {
        tracing::debug!(id = platform.id, endpoint = %self.endpoint, "sending platform to command service");

        let response = self.client.post(&self.endpoint).json(platform).send().await?;
        response.error_for_status()?;

        Ok(())
    }
}
