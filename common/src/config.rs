use std::time::Duration;

use crate::network::request::{DEFAULT_CONCURRENCY, DEFAULT_PROBE_TIMEOUT, DEFAULT_RANGE_TIMEOUT};

/// Largest range the command line accepts unless told otherwise.
pub const DEFAULT_MAX_PORTS: usize = 1000;

/// Settings owned by the front end. The scanning core never reads this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Connect timeout for `port` probes.
    pub single_timeout: Duration,
    /// Connect timeout per port for `range` scans.
    pub range_timeout: Duration,
    pub concurrency: usize,
    /// Ranges above this size are rejected before scanning.
    pub max_ports: usize,
    pub quiet: u8,
    pub no_banner: bool,
    /// Print results as JSON instead of the tree view.
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            single_timeout: DEFAULT_PROBE_TIMEOUT,
            range_timeout: DEFAULT_RANGE_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
            max_ports: DEFAULT_MAX_PORTS,
            quiet: 0,
            no_banner: false,
            json: false,
        }
    }
}
