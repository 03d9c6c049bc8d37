//! Graceful-stop request to the backend's control endpoint.

use std::time::Duration;

use serde_json::json;
use tracing::{info, warn};

/// How the backend answered the shutdown request.
///
/// Every variant means "shutdown requested, proceed"; none of them
/// hold up application teardown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownAck {
    Acknowledged { status: u16 },
    Rejected { status: u16 },
    Unreachable { reason: String },
}

impl ShutdownAck {
    pub fn is_acknowledged(&self) -> bool {
        matches!(self, Self::Acknowledged { .. })
    }
}

pub struct ShutdownCoordinator {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl ShutdownCoordinator {
    pub fn new(host: &str, port: u16, path: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .no_proxy()
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {e}");
                reqwest::Client::new()
            });

        Self {
            client,
            url: shutdown_url(host, port, path),
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST `{"success": true}` to the control endpoint, bounded by the timeout.
    ///
    /// Failures are logged and reported in the returned [`ShutdownAck`];
    /// the request is never retried.
    pub async fn request_shutdown(&self) -> ShutdownAck {
        let result = self
            .client
            .post(&self.url)
            .timeout(self.timeout)
            .json(&json!({ "success": true }))
            .send()
            .await;

        match result {
            Ok(resp) if resp.status().is_success() => {
                info!("Backend acknowledged shutdown request");
                ShutdownAck::Acknowledged {
                    status: resp.status().as_u16(),
                }
            }
            Ok(resp) => {
                warn!("Shutdown request returned HTTP {}", resp.status());
                ShutdownAck::Rejected {
                    status: resp.status().as_u16(),
                }
            }
            Err(e) => {
                warn!("Failed to send shutdown request to {}: {e}", self.url);
                ShutdownAck::Unreachable {
                    reason: e.to_string(),
                }
            }
        }
    }
}

pub(crate) fn shutdown_url(host: &str, port: u16, path: &str) -> String {
    if host.contains(':') {
        format!("http://[{host}]:{port}{path}")
    } else {
        format!("http://{host}:{port}{path}")
    }
}
