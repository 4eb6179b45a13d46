use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Classification of a single connect attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortStatus {
    /// The TCP handshake completed.
    Open,
    /// The connect was refused, reset, unreachable or timed out.
    Closed,
    /// Something other than the connection itself prevented a classification.
    Error,
}

/// Outcome of probing one port.
///
/// `response_time` is present for [`PortStatus::Open`] and [`PortStatus::Closed`],
/// `error` only for [`PortStatus::Error`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub port: u16,
    pub status: PortStatus,
    /// Milliseconds, rounded to two decimal places.
    pub response_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeResult {
    pub fn open(port: u16, elapsed: Duration) -> Self {
        Self {
            port,
            status: PortStatus::Open,
            response_time: Some(round_millis(elapsed)),
            error: None,
        }
    }

    pub fn closed(port: u16, elapsed: Duration) -> Self {
        Self {
            port,
            status: PortStatus::Closed,
            response_time: Some(round_millis(elapsed)),
            error: None,
        }
    }

    pub fn error(port: u16, detail: impl Into<String>) -> Self {
        Self {
            port,
            status: PortStatus::Error,
            response_time: None,
            error: Some(detail.into()),
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == PortStatus::Open
    }
}

/// Converts a duration to milliseconds rounded to two decimals.
pub fn round_millis(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 100_000.0).round() / 100.0
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
