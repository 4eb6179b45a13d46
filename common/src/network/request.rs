//! # Scan Request Model
//!
//! The input of a range scan, before validation.

use std::time::Duration;

use crate::error::ScanError;
use crate::network::range::PortRange;

/// Connect timeout used for a single-port probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);
/// Connect timeout used for each probe of a range scan.
pub const DEFAULT_RANGE_TIMEOUT: Duration = Duration::from_secs(1);
/// Maximum number of probes in flight during a range scan.
pub const DEFAULT_CONCURRENCY: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub host: String,
    pub start_port: u32,
    pub end_port: u32,
    pub timeout: Duration,
    pub concurrency: usize,
    /// Overall budget for the scan. `None` lets it run to completion.
    pub deadline: Option<Duration>,
}

impl ScanRequest {
    pub fn new(host: impl Into<String>, start_port: u32, end_port: u32) -> Self {
        Self {
            host: host.into(),
            start_port,
            end_port,
            timeout: DEFAULT_RANGE_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
            deadline: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Checks every field and returns the validated port range.
    pub fn validate(&self) -> Result<PortRange, ScanError> {
        validate_host(&self.host)?;
        validate_timeout(self.timeout)?;
        if self.concurrency == 0 {
            return Err(ScanError::InvalidRequest(
                "concurrency must be at least 1".into(),
            ));
        }
        if self.deadline.is_some_and(|d| d.is_zero()) {
            return Err(ScanError::InvalidRequest(
                "deadline must be greater than zero".into(),
            ));
        }
        PortRange::new(self.start_port, self.end_port)
    }
}

pub fn validate_host(host: &str) -> Result<(), ScanError> {
    if host.trim().is_empty() {
        return Err(ScanError::InvalidRequest("host must not be empty".into()));
    }
    Ok(())
}

pub fn validate_timeout(timeout: Duration) -> Result<(), ScanError> {
    if timeout.is_zero() {
        return Err(ScanError::InvalidRequest(
            "timeout must be greater than zero".into(),
        ));
    }
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
