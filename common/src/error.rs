use thiserror::Error;

/// Request-level failures of a probe or range scan.
///
/// Per-port problems are never reported through this type; they are recorded
/// as [`PortStatus::Error`](crate::network::probe::PortStatus::Error) entries
/// inside the report instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// Malformed or out-of-bounds port range. Raised before any network I/O.
    #[error("invalid port range {start}-{end}: ports must satisfy 1 <= start <= end <= 65535")]
    InvalidRange { start: u32, end: u32 },

    /// Any other malformed input (empty host, zero timeout, zero concurrency).
    #[error("invalid scan request: {0}")]
    InvalidRequest(String),

    /// The worker pool itself failed; the scan could not produce a report.
    #[error("scan aborted: {0}")]
    Systemic(String),
}

impl ScanError {
    /// True for errors caused by the caller's input.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidRange { .. } | Self::InvalidRequest(_))
    }
}
