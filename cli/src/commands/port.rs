use std::time::Instant;

use anyhow::Context;
use colored::*;
use sweep_common::config::Config;
use sweep_common::network::probe::ProbeResult;
use sweep_core::probe_single_port;
use tracing::{Instrument, debug, info_span};

use crate::terminal::format::{self, Detail};
use crate::terminal::{colors, print};

pub async fn probe(host: &str, port: u16, cfg: &Config) -> anyhow::Result<()> {
    let start = Instant::now();
    let result: ProbeResult = probe_single_port(host, port, cfg.single_timeout)
        .instrument(info_span!("probe", %host, port))
        .await
        .with_context(|| format!("probing {host}:{port}"))?;
    debug!(elapsed = ?start.elapsed(), "probe finished");

    if cfg.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print::header("probe result", cfg.quiet);
    print_result(host, &result);
    Ok(())
}

fn print_result(host: &str, result: &ProbeResult) {
    let mut rows: Vec<Detail> = vec![
        ("Host".to_string(), host.color(colors::PRIMARY)),
        ("Port".to_string(), result.port.to_string().color(colors::ACCENT)),
    ];
    rows.extend(format::result_to_details(result));
    print::details(&rows);
}
