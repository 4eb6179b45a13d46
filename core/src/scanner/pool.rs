//! Fixed-size worker pool driving the probes of one range scan.
//!
//! The queue is the range itself: workers claim the next port through a
//! shared atomic cursor, so no per-port task or buffer is ever allocated.
//! Each worker publishes its results onto a channel that a single collector
//! drains in completion order.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::FutureExt;
use sweep_common::error::ScanError;
use sweep_common::network::probe::ProbeResult;
use sweep_common::network::range::PortRange;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinSet;
use tracing::{debug, trace, warn};

use super::{ProgressCallback, Prober, ScanPhase, StopSignal};

/// Everything a worker needs, shared read-only across the pool.
pub(crate) struct ProbeJob<P> {
    pub prober: Arc<P>,
    pub host: Arc<str>,
    pub range: PortRange,
    pub timeout: Duration,
}

/// What the pool hands back to the aggregation step.
pub(crate) struct PoolOutput {
    pub results: Vec<ProbeResult>,
    /// At least one port was skipped or abandoned because of the stop signal.
    pub interrupted: bool,
}

/// Runs `workers` workers over `job` and gathers every result they publish.
pub(crate) async fn run<P: Prober>(
    job: ProbeJob<P>,
    workers: usize,
    stop: StopSignal,
    on_progress: Option<ProgressCallback>,
) -> Result<PoolOutput, ScanError> {
    let job = Arc::new(job);
    let cursor = Arc::new(AtomicUsize::new(0));
    let (tx, mut rx) = mpsc::unbounded_channel::<ProbeResult>();

    let mut set: JoinSet<bool> = JoinSet::new();
    for id in 0..workers {
        set.spawn(worker(id, job.clone(), cursor.clone(), stop.clone(), tx.clone()));
    }
    // The collector ends once every worker has dropped its sender.
    drop(tx);
    debug!(phase = %ScanPhase::Collecting, workers);

    let mut results: Vec<ProbeResult> = Vec::with_capacity(job.range.size());
    while let Some(result) = rx.recv().await {
        results.push(result);
        if let Some(cb) = &on_progress {
            cb(results.len());
        }
    }

    let mut interrupted = false;
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(worker_interrupted) => interrupted |= worker_interrupted,
            Err(e) => {
                set.abort_all();
                return Err(ScanError::Systemic(format!("worker failed: {e}")));
            }
        }
    }

    Ok(PoolOutput {
        results,
        interrupted,
    })
}

/// Claims ports until the range is exhausted or the scan is stopped.
///
/// Returns `true` if it left a claimed port unclassified.
async fn worker<P: Prober>(
    id: usize,
    job: Arc<ProbeJob<P>>,
    cursor: Arc<AtomicUsize>,
    stop: StopSignal,
    tx: UnboundedSender<ProbeResult>,
) -> bool {
    loop {
        let Some(port) = job.range.nth(cursor.fetch_add(1, Ordering::Relaxed)) else {
            trace!(worker = id, "queue drained");
            return false;
        };

        if stop.is_stopped() {
            return true;
        }

        let probe = AssertUnwindSafe(job.prober.probe(&job.host, port, job.timeout)).catch_unwind();

        // Dropping the probe future on stop closes its socket.
        let outcome = tokio::select! {
            biased;
            _ = stop.stopped() => return true,
            outcome = probe => outcome,
        };

        let result = match outcome {
            Ok(result) if result.port == port => result,
            Ok(result) => ProbeResult::error(
                port,
                format!("prober answered for port {} instead", result.port),
            ),
            Err(panic) => {
                let detail = panic_message(panic.as_ref());
                warn!(port, %detail, "probe panicked");
                ProbeResult::error(port, format!("probe panicked: {detail}"))
            }
        };

        if tx.send(result).is_err() {
            return false;
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
