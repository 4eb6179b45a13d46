use serde::{Deserialize, Serialize};

use super::probe::{PortStatus, ProbeResult};
use super::range::PortRange;

/// Bucket sizes of a [`RangeReport`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub open_count: usize,
    pub closed_count: usize,
    pub error_count: usize,
}

impl ScanSummary {
    pub fn total(&self) -> usize {
        self.open_count + self.closed_count + self.error_count
    }
}

/// Final result of a range scan.
///
/// Every port of `scan_range` appears in exactly one of the three buckets,
/// and each bucket is sorted by port ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeReport {
    pub host: String,
    pub scan_range: PortRange,
    pub total_scanned: usize,
    pub open_ports: Vec<ProbeResult>,
    pub closed_ports: Vec<ProbeResult>,
    pub error_ports: Vec<ProbeResult>,
    pub summary: ScanSummary,
    /// Wall-clock duration of the whole scan in milliseconds.
    pub elapsed_ms: f64,
    /// Set when a stop signal or deadline cut the scan short.
    #[serde(default)]
    pub cancelled: bool,
}

impl RangeReport {
    pub fn bucket(&self, status: PortStatus) -> &[ProbeResult] {
        match status {
            PortStatus::Open => &self.open_ports,
            PortStatus::Closed => &self.closed_ports,
            PortStatus::Error => &self.error_ports,
        }
    }

    /// Open port numbers in ascending order.
    pub fn open_port_numbers(&self) -> Vec<u16> {
        self.open_ports.iter().map(|r| r.port).collect()
    }

    /// Iterates over every result, bucket by bucket.
    pub fn results(&self) -> impl Iterator<Item = &ProbeResult> {
        self.open_ports
            .iter()
            .chain(&self.closed_ports)
            .chain(&self.error_ports)
    }
}
