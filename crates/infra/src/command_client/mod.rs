use async_trait::async_trait;
use thiserror::Error;

use platformd_core::Platform;

mod http;

pub use http::HttpCommandClient;

/// Outbound notification error. Callers on the creation path treat this as
/// non-fatal: the failure is logged and swallowed, never surfaced.
#[derive(Debug, Error)]
pub enum CommandClientError {
    #[error("command service request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Client informing the downstream command service of new platforms.
///
/// One attempt per platform, no retry queue. Delivery is at-most-once and
/// best-effort; the platform exists locally whether or not the send lands.
#[async_trait]
pub trait CommandClient: Send + Sync {
    /// POST the platform read view (`{id, name, publisher, cost}`) to the
    /// command service. Succeeds on a 2xx response.
    async fn send_platform(&self, platform: &Platform) -> Result<(), CommandClientError>;
}
