//! Reachability check by transport-level connection attempt.

use std::time::Duration;

use tokio::net::TcpStream;
use tracing::debug;

/// Result of a single connection attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// A listener accepted the connection
    Reachable,
    /// The connection attempt failed (refused, unresolvable host, ...)
    Refused { reason: String },
    /// No answer within the probe timeout
    TimedOut,
}

impl ProbeOutcome {
    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Reachable)
    }
}

pub struct PortProbe;

impl PortProbe {
    /// Attempt one connection to `host:port`.
    ///
    /// The connection is dropped as soon as it is established; no
    /// application data is sent and nothing is retried.
    pub async fn probe(host: &str, port: u16, timeout: Duration) -> ProbeOutcome {
        let outcome = match tokio::time::timeout(timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(stream)) => {
                drop(stream);
                ProbeOutcome::Reachable
            }
            Ok(Err(e)) => ProbeOutcome::Refused {
                reason: e.to_string(),
            },
            Err(_) => ProbeOutcome::TimedOut,
        };

        debug!("Probe {host}:{port} -> {outcome:?}");
        outcome
    }

    /// Refusals and timeouts both mean "nothing usable is listening".
    pub async fn is_reachable(host: &str, port: u16, timeout: Duration) -> bool {
        Self::probe(host, port, timeout).await.is_reachable()
    }
}
