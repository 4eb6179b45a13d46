#![cfg(test)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use sweep_common::network::probe::{PortStatus, ProbeResult};
use sweep_common::network::report::RangeReport;
use sweep_core::Prober;
use tokio::net::TcpListener;

/// A listener bound to an ephemeral loopback port for the lifetime of the value.
pub struct LoopbackListener {
    _listener: TcpListener,
    pub port: u16,
}

impl LoopbackListener {
    pub async fn bind() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        Ok(Self {
            _listener: listener,
            port,
        })
    }
}

/// A loopback port that was free a moment ago.
pub async fn closed_port() -> anyhow::Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    Ok(listener.local_addr()?.port())
}

/// Simulated host with random response latency.
pub struct JitteryHost {
    pub open: HashSet<u16>,
    pub faulty: HashSet<u16>,
    pub max_latency_ms: u64,
    pub in_flight: AtomicUsize,
    pub peak_in_flight: AtomicUsize,
}

impl JitteryHost {
    pub fn new(open: impl IntoIterator<Item = u16>, max_latency_ms: u64) -> Self {
        Self {
            open: open.into_iter().collect(),
            faulty: HashSet::new(),
            max_latency_ms,
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn peak(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Prober for JitteryHost {
    async fn probe(&self, _host: &str, port: u16, _timeout: Duration) -> ProbeResult {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = rand::random_range(0..=self.max_latency_ms);
        tokio::time::sleep(Duration::from_millis(delay)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let elapsed = Duration::from_millis(delay);
        if self.faulty.contains(&port) {
            ProbeResult::error(port, "simulated resource exhaustion")
        } else if self.open.contains(&port) {
            ProbeResult::open(port, elapsed)
        } else {
            ProbeResult::closed(port, elapsed)
        }
    }
}

/// Checks the report invariants: exact coverage, sorted buckets, consistent counts.
pub fn assert_well_formed(report: &RangeReport) {
    let range = report.scan_range;
    assert_eq!(report.total_scanned, range.size());
    assert_eq!(report.summary.total(), report.total_scanned);
    assert_eq!(report.summary.open_count, report.open_ports.len());
    assert_eq!(report.summary.closed_count, report.closed_ports.len());
    assert_eq!(report.summary.error_count, report.error_ports.len());

    let mut ports: Vec<u16> = report.results().map(|r| r.port).collect();
    ports.sort_unstable();
    let expected: Vec<u16> = range.to_iter().collect();
    assert_eq!(ports, expected, "ports missing or duplicated");

    for status in [PortStatus::Open, PortStatus::Closed, PortStatus::Error] {
        let bucket = report.bucket(status);
        assert!(
            bucket.windows(2).all(|w| w[0].port < w[1].port),
            "{status:?} bucket is not sorted"
        );
        assert!(bucket.iter().all(|r| r.status == status));
    }

    for result in report.results() {
        match result.status {
            PortStatus::Error => {
                assert!(result.response_time.is_none());
                assert!(result.error.is_some());
            }
            _ => {
                assert!(result.response_time.is_some_and(|ms| ms >= 0.0));
                assert!(result.error.is_none());
            }
        }
    }
}
