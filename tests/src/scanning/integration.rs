#![cfg(test)]
use std::time::Duration;

use sweep_common::error::ScanError;
use sweep_common::network::probe::{PortStatus, ProbeResult};
use sweep_common::network::report::RangeReport;
use sweep_common::network::request::ScanRequest;
use sweep_core::{RangeScanner, StopSignal, probe_single_port, scan_range, service_name};

use crate::utils::{LoopbackListener, assert_well_formed, closed_port};

const LOCALHOST: &str = "127.0.0.1";
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// A window of ports around `port`, kept inside the valid range.
fn window(port: u16, radius: u16) -> (u32, u32) {
    let start = port.saturating_sub(radius).max(1);
    let end = port.saturating_add(radius);
    (start.into(), end.into())
}

#[tokio::test]
async fn single_port_against_listener_is_open() {
    let listener = LoopbackListener::bind().await.unwrap();

    let result: ProbeResult = probe_single_port(LOCALHOST, listener.port, PROBE_TIMEOUT)
        .await
        .unwrap();

    assert_eq!(result.port, listener.port);
    assert_eq!(result.status, PortStatus::Open);
    assert!(result.response_time.unwrap() >= 0.0);
}

#[tokio::test]
async fn single_port_without_listener_is_closed() {
    let port = closed_port().await.unwrap();

    let result = probe_single_port(LOCALHOST, port, PROBE_TIMEOUT).await.unwrap();

    assert_eq!(result.status, PortStatus::Closed);
    assert!(result.response_time.is_some());
    assert!(result.error.is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn range_scan_finds_loopback_listener() {
    let listener = LoopbackListener::bind().await.unwrap();
    let (start, end) = window(listener.port, 50);

    let report: RangeReport = scan_range(LOCALHOST, start, end, PROBE_TIMEOUT, 20)
        .await
        .unwrap();

    assert_well_formed(&report);
    assert_eq!(report.host, LOCALHOST);
    assert!(report.open_port_numbers().contains(&listener.port));
    assert_eq!(report.summary.error_count, 0);
    assert!(!report.cancelled);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn range_scan_sees_several_listeners() {
    let mut listeners = Vec::new();
    for _ in 0..3 {
        listeners.push(LoopbackListener::bind().await.unwrap());
    }

    for listener in &listeners {
        let (start, end) = window(listener.port, 5);
        let report = scan_range(LOCALHOST, start, end, PROBE_TIMEOUT, 4)
            .await
            .unwrap();
        assert_well_formed(&report);
        assert!(report.open_port_numbers().contains(&listener.port));
    }
}

#[tokio::test]
async fn invalid_requests_are_rejected() {
    let err = scan_range(LOCALHOST, 200, 100, PROBE_TIMEOUT, 10)
        .await
        .unwrap_err();
    assert_eq!(err, ScanError::InvalidRange { start: 200, end: 100 });
    assert!(err.is_input_error());

    let err = scan_range(LOCALHOST, 1, 70_000, PROBE_TIMEOUT, 10)
        .await
        .unwrap_err();
    assert!(matches!(err, ScanError::InvalidRange { .. }));

    let err = scan_range("", 1, 10, PROBE_TIMEOUT, 10).await.unwrap_err();
    assert!(matches!(err, ScanError::InvalidRequest(_)));

    let err = scan_range(LOCALHOST, 1, 10, PROBE_TIMEOUT, 0).await.unwrap_err();
    assert!(matches!(err, ScanError::InvalidRequest(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn stopped_scan_still_returns_a_complete_report() {
    let listener = LoopbackListener::bind().await.unwrap();
    let (start, end) = window(listener.port, 10);

    let stop = StopSignal::new();
    stop.stop();
    let scanner = RangeScanner::new().with_stop_signal(stop);
    let request = ScanRequest::new(LOCALHOST, start, end).with_timeout(PROBE_TIMEOUT);

    let report = scanner.scan(&request).await.unwrap();

    assert!(report.cancelled);
    assert_well_formed(&report);
    assert_eq!(report.summary.error_count, report.total_scanned);
}

#[test]
fn service_names_match_the_well_known_table() {
    assert_eq!(service_name(22), "SSH");
    assert_eq!(service_name(80), "HTTP");
    assert_eq!(service_name(5432), "PostgreSQL");
    assert_eq!(service_name(54321), "Unknown");
}
