use std::time::Duration;

use anyhow::ensure;
use colored::*;
use sweep_common::config::Config;
use sweep_common::network::probe::ProbeResult;
use sweep_common::network::range::PortRange;
use sweep_common::network::report::RangeReport;
use sweep_common::network::request::ScanRequest;
use sweep_common::success;
use sweep_core::{RangeScanner, StopSignal};
use tracing::{Instrument, info_span, warn};

use crate::mprint;
use crate::terminal::{colors, format, print, spinner};

pub async fn scan(
    host: &str,
    ports: PortRange,
    deadline: Option<Duration>,
    cfg: &Config,
) -> anyhow::Result<()> {
    ensure!(
        ports.size() <= cfg.max_ports,
        "range {ports} covers {} ports, the limit is {} (see --max-ports)",
        ports.size(),
        cfg.max_ports
    );

    let mut request = ScanRequest::new(host, ports.start().into(), ports.end().into())
        .with_timeout(cfg.range_timeout)
        .with_concurrency(cfg.concurrency);
    if let Some(deadline) = deadline {
        request = request.with_deadline(deadline);
    }

    let span = info_span!("scan", indicatif.pb_show = true);
    spinner::start_scan_progress(&span, ports.size())?;

    let stop = StopSignal::new();
    let ctrl_c = tokio::spawn(stop_on_ctrl_c(stop.clone()));

    let scanner = RangeScanner::new()
        .with_stop_signal(stop)
        .on_progress(spinner::report_scan_progress(span.clone()));

    let report = scanner.scan(&request).instrument(span).await;
    ctrl_c.abort();
    let report = report?;

    if cfg.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    scan_ends(&report, cfg);
    Ok(())
}

async fn stop_on_ctrl_c(stop: StopSignal) {
    if tokio::signal::ctrl_c().await.is_ok() {
        warn!("Interrupted, abandoning in-flight probes");
        stop.stop();
    }
}

fn scan_ends(report: &RangeReport, cfg: &Config) {
    if report.cancelled {
        warn!(
            "Scan was cut short, {} ports were not classified",
            report.summary.error_count
        );
    }

    if report.open_ports.is_empty() {
        print::header("zero open ports", cfg.quiet);
        print::no_results("open ports");
    } else {
        print::header(&format!("open ports on {}", report.host), cfg.quiet);
        print_ports(&report.open_ports, cfg);
    }

    if !report.error_ports.is_empty() && cfg.quiet == 0 {
        mprint!();
        print::header("errors", cfg.quiet);
        print_ports(&report.error_ports, cfg);
    }

    print_summary(report, cfg);
}

fn print_ports(results: &[ProbeResult], cfg: &Config) {
    for (idx, result) in results.iter().enumerate() {
        match cfg.quiet {
            2 => {}
            _ => {
                print::port_entry(
                    idx,
                    &format::port_label(result.port),
                    &format::result_to_details(result),
                );
            }
        }
        if idx + 1 != results.len() && cfg.quiet < 2 {
            mprint!();
        }
    }
}

fn print_summary(report: &RangeReport, cfg: &Config) {
    let open: ColoredString = format!("{} open", report.summary.open_count).bold().green();
    let closed: ColoredString = format!("{} closed", report.summary.closed_count).bold();
    let errors: ColoredString = format!("{} errors", report.summary.error_count).bold().red();
    let total_time: ColoredString = format!("{:.2}s", report.elapsed_ms / 1000.0).bold().yellow();
    let output: ColoredString = format!(
        "Scan Complete: {open}, {closed}, {errors} across {} ports in {total_time}",
        report.total_scanned
    )
    .color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output);
        }
        _ => {
            mprint!();
            success!("{}", output)
        }
    }
}
