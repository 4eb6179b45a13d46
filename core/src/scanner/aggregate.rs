//! Folds collected probe results into a [`RangeReport`].

use std::time::Duration;

use sweep_common::error::ScanError;
use sweep_common::network::probe::{PortStatus, ProbeResult, round_millis};
use sweep_common::network::range::PortRange;
use sweep_common::network::report::{RangeReport, ScanSummary};

/// Detail recorded for ports a cancelled scan never classified.
pub const CANCELLED_DETAIL: &str = "scan cancelled";

/// Sorts `results` by port, checks they cover `range` exactly once and
/// partitions them into the three report buckets.
///
/// Ports missing from a cancelled scan are filled in as errors. Missing,
/// duplicated or stray ports in a scan that ran to completion mean results
/// were lost on the way, which is a [`ScanError::Systemic`] failure.
pub(crate) fn build_report(
    host: &str,
    range: PortRange,
    mut results: Vec<ProbeResult>,
    cancelled: bool,
    elapsed: Duration,
) -> Result<RangeReport, ScanError> {
    results.sort_unstable_by_key(|r| r.port);

    if let Some(pair) = results.windows(2).find(|w| w[0].port == w[1].port) {
        return Err(ScanError::Systemic(format!(
            "port {} was reported more than once",
            pair[0].port
        )));
    }
    if let Some(stray) = results.iter().find(|r| !range.contains(r.port)) {
        return Err(ScanError::Systemic(format!(
            "port {} is outside the scanned range {range}",
            stray.port
        )));
    }

    let mut complete: Vec<ProbeResult> = Vec::with_capacity(range.size());
    let mut sorted = results.into_iter().peekable();
    for port in range.to_iter() {
        match sorted.next_if(|r| r.port == port) {
            Some(result) => complete.push(result),
            None if cancelled => complete.push(ProbeResult::error(port, CANCELLED_DETAIL)),
            None => {
                return Err(ScanError::Systemic(format!(
                    "no result was collected for port {port}"
                )));
            }
        }
    }

    let (open_ports, rest): (Vec<_>, Vec<_>) = complete
        .into_iter()
        .partition(|r| r.status == PortStatus::Open);
    let (closed_ports, error_ports): (Vec<_>, Vec<_>) = rest
        .into_iter()
        .partition(|r| r.status == PortStatus::Closed);

    let summary = ScanSummary {
        open_count: open_ports.len(),
        closed_count: closed_ports.len(),
        error_count: error_ports.len(),
    };

    Ok(RangeReport {
        host: host.to_string(),
        scan_range: range,
        total_scanned: range.size(),
        open_ports,
        closed_ports,
        error_ports,
        summary,
        elapsed_ms: round_millis(elapsed),
        cancelled,
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
