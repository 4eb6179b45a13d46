pub mod port;
pub mod range;
pub mod service;

use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use sweep_common::config::{Config, DEFAULT_MAX_PORTS};
use sweep_common::network::range::PortRange;
use sweep_common::network::request::DEFAULT_CONCURRENCY;

#[derive(Parser)]
#[command(name = "sweep")]
#[command(version, about = "A bounded-concurrency TCP port scanner.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Print results as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Reduce output; repeat for less (-qq)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Largest port range accepted by `range`
    #[arg(long, env = "SWEEP_MAX_PORTS", default_value_t = DEFAULT_MAX_PORTS, global = true)]
    pub max_ports: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe a single TCP port
    #[command(alias = "p")]
    Port {
        host: String,
        port: u16,
        /// Connect timeout in milliseconds
        #[arg(long, env = "SWEEP_DEFAULT_TIMEOUT_MS", default_value_t = 3_000)]
        timeout_ms: u64,
    },
    /// Scan a range of TCP ports, e.g. `1-1024`
    #[command(alias = "r")]
    Range {
        host: String,
        ports: PortRange,
        /// Connect timeout per port in milliseconds
        #[arg(long, env = "SWEEP_RANGE_TIMEOUT_MS", default_value_t = 1_000)]
        timeout_ms: u64,
        /// Maximum number of probes in flight
        #[arg(short, long, env = "SWEEP_CONCURRENCY", default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,
        /// Stop the whole scan after this many milliseconds
        #[arg(long)]
        deadline_ms: Option<u64>,
    },
    /// Show the well-known service for a port
    #[command(alias = "s")]
    Service { port: u16 },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        let mut cfg = Config {
            max_ports: self.max_ports,
            quiet: self.quiet,
            no_banner: self.no_banner,
            json: self.json,
            ..Config::default()
        };

        match self.command {
            Commands::Port { timeout_ms, .. } => {
                cfg.single_timeout = Duration::from_millis(timeout_ms);
            }
            Commands::Range {
                timeout_ms,
                concurrency,
                ..
            } => {
                cfg.range_timeout = Duration::from_millis(timeout_ms);
                cfg.concurrency = concurrency;
            }
            Commands::Service { .. } => {}
        }
        cfg
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
