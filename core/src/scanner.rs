//! The central **abstraction** for port scanning operations.
//!
//! A scan is driven by a [`RangeScanner`], which owns the bounded worker pool
//! and the aggregation of results, and delegates every individual connect
//! attempt to a [`Prober`]. [`TcpProber`] is the real implementation; tests
//! swap in simulated ones.
//!
//! **Lifecycle of a scan:**
//! `Pending → Dispatching → Collecting → Aggregating → Complete`.
//! A completed [`RangeReport`] is never touched again.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use sweep_common::error::ScanError;
use sweep_common::network::probe::ProbeResult;
use sweep_common::network::range::PortRange;
use sweep_common::network::report::RangeReport;
use sweep_common::network::request::{self, ScanRequest};
use tracing::debug;

use crate::network::tcp::TcpProber;

mod aggregate;
mod pool;
mod signal;

pub use aggregate::CANCELLED_DETAIL;
pub use signal::StopSignal;

/// Invoked with the number of probes finished so far.
pub type ProgressCallback = Arc<dyn Fn(usize) + Send + Sync>;

/// Defines the strategy for probing one transport-layer port.
///
/// Implementations must classify every attempt themselves: failures are
/// expressed as [`PortStatus::Error`](sweep_common::network::probe::PortStatus::Error)
/// results, never as panics or errors.
#[async_trait]
pub trait Prober: Send + Sync + 'static {
    async fn probe(&self, host: &str, port: u16, timeout: Duration) -> ProbeResult;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Pending,
    Dispatching,
    Collecting,
    Aggregating,
    Complete,
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScanPhase::Pending => "pending",
            ScanPhase::Dispatching => "dispatching",
            ScanPhase::Collecting => "collecting",
            ScanPhase::Aggregating => "aggregating",
            ScanPhase::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// Bounded-concurrency scanner for a range of ports on one host.
pub struct RangeScanner<P = TcpProber> {
    prober: Arc<P>,
    stop: StopSignal,
    on_progress: Option<ProgressCallback>,
}

impl RangeScanner<TcpProber> {
    pub fn new() -> Self {
        Self::with_prober(TcpProber)
    }
}

impl Default for RangeScanner<TcpProber> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Prober> RangeScanner<P> {
    pub fn with_prober(prober: P) -> Self {
        Self {
            prober: Arc::new(prober),
            stop: StopSignal::new(),
            on_progress: None,
        }
    }

    /// Uses `stop` as this scanner's cancellation flag.
    pub fn with_stop_signal(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }

    pub fn on_progress(mut self, callback: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Arc::new(callback));
        self
    }

    /// A handle that cancels scans run by this scanner.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    pub fn prober(&self) -> &P {
        &self.prober
    }

    /// Probes every port of `request` and returns the sorted report.
    ///
    /// Fails only for invalid input, before any probe is sent, or when the
    /// worker pool itself breaks down. Individual probe failures end up in
    /// the report's error bucket.
    pub async fn scan(&self, request: &ScanRequest) -> Result<RangeReport, ScanError> {
        debug!(phase = %ScanPhase::Pending, host = %request.host);
        let range: PortRange = request.validate()?;

        let started = Instant::now();
        let workers = request.concurrency.min(range.size());
        debug!(phase = %ScanPhase::Dispatching, %range, workers);

        let scan_stop = StopSignal::new();
        if self.stop.is_stopped() {
            scan_stop.stop();
        }
        let watcher = tokio::spawn(forward_stop(
            self.stop.clone(),
            scan_stop.clone(),
            request.deadline,
        ));

        let job = pool::ProbeJob {
            prober: self.prober.clone(),
            host: Arc::from(request.host.as_str()),
            range,
            timeout: request.timeout,
        };

        let output = pool::run(job, workers, scan_stop, self.on_progress.clone()).await;
        watcher.abort();
        let output = output?;

        debug!(phase = %ScanPhase::Aggregating, collected = output.results.len());
        let report = aggregate::build_report(
            &request.host,
            range,
            output.results,
            output.interrupted,
            started.elapsed(),
        )?;

        debug!(
            phase = %ScanPhase::Complete,
            open = report.summary.open_count,
            closed = report.summary.closed_count,
            errors = report.summary.error_count,
            cancelled = report.cancelled,
        );
        Ok(report)
    }
}

/// Raises `inner` once `outer` is raised or `deadline` has passed.
async fn forward_stop(outer: StopSignal, inner: StopSignal, deadline: Option<Duration>) {
    let expiry = async {
        match deadline {
            Some(d) => tokio::time::sleep(d).await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        _ = outer.stopped() => debug!("scan stopped by caller"),
        _ = expiry => debug!("scan deadline reached"),
    }
    inner.stop();
}

/// Scans `start_port..=end_port` on `host` with real TCP probes.
pub async fn scan_range(
    host: &str,
    start_port: u32,
    end_port: u32,
    timeout: Duration,
    concurrency: usize,
) -> Result<RangeReport, ScanError> {
    let request = ScanRequest::new(host, start_port, end_port)
        .with_timeout(timeout)
        .with_concurrency(concurrency);
    RangeScanner::new().scan(&request).await
}

/// Probes a single port after validating the input.
pub async fn probe_single_port(
    host: &str,
    port: u16,
    timeout: Duration,
) -> Result<ProbeResult, ScanError> {
    request::validate_host(host)?;
    request::validate_timeout(timeout)?;
    PortRange::single(port)?;
    Ok(crate::network::tcp::handshake_probe(host, port, timeout).await)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
