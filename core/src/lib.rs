//! # Sweep Core
//!
//! Bounded-concurrency TCP port scanning.
//!
//! * **[`network::tcp`]**: one connect attempt against one port (the probe unit).
//! * **[`scanner`]**: the range scanner. It fans probes out over a fixed worker
//!   pool and folds the results into a sorted
//!   [`RangeReport`](sweep_common::network::report::RangeReport).
//!
//! The crate consumes plain values and returns plain values. It reads no
//! configuration and knows nothing about how reports are rendered.

pub mod network;
pub mod scanner;

pub use scanner::{
    Prober, RangeScanner, ScanPhase, StopSignal, probe_single_port, scan_range,
};
pub use sweep_common::services::service_name;
