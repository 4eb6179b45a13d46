#![cfg(test)]
use std::collections::HashSet;
use std::time::Duration;

use sweep_common::network::request::ScanRequest;
use sweep_core::RangeScanner;

use crate::utils::{JitteryHost, assert_well_formed};

/// Picks a random range, open set and concurrency and checks the report
/// invariants on each run.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn random_ranges_always_produce_well_formed_reports() {
    for _ in 0..20 {
        let start: u16 = rand::random_range(1..=65_000);
        let len: u16 = rand::random_range(1..=300);
        let end = start.saturating_add(len - 1);
        let concurrency: usize = rand::random_range(1..=64);

        let open: HashSet<u16> = (0..rand::random_range(0..10))
            .map(|_| rand::random_range(start..=end))
            .collect();

        let mut host = JitteryHost::new(open.iter().copied(), 3);
        host.faulty.insert(start);

        let scanner = RangeScanner::with_prober(host);
        let request = ScanRequest::new("sim", start.into(), end.into())
            .with_concurrency(concurrency)
            .with_timeout(Duration::from_millis(200));

        let report = scanner.scan(&request).await.unwrap();

        assert_well_formed(&report);
        assert!(scanner.prober().peak() <= concurrency);
        assert_eq!(report.error_ports[0].port, start);

        let mut expected_open: Vec<u16> = open.into_iter().filter(|p| *p != start).collect();
        expected_open.sort_unstable();
        assert_eq!(report.open_port_numbers(), expected_open);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn jitter_does_not_change_bucket_order() {
    let open = [10, 11, 50, 199];
    let request = ScanRequest::new("sim", 1, 200).with_concurrency(25);

    let mut previous = None;
    for _ in 0..3 {
        let scanner = RangeScanner::with_prober(JitteryHost::new(open, 8));
        let report = scanner.scan(&request).await.unwrap();
        assert_well_formed(&report);

        let ports: Vec<Vec<u16>> = [&report.open_ports, &report.closed_ports, &report.error_ports]
            .iter()
            .map(|bucket| bucket.iter().map(|r| r.port).collect())
            .collect();

        if let Some(prev) = &previous {
            assert_eq!(prev, &ports);
        }
        previous = Some(ports);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn fifty_slow_probes_never_exceed_five_in_flight() {
    let scanner = RangeScanner::with_prober(JitteryHost::new([], 25));
    let request = ScanRequest::new("sim", 2000, 2049).with_concurrency(5);

    let report = scanner.scan(&request).await.unwrap();

    assert_well_formed(&report);
    assert_eq!(report.total_scanned, 50);
    assert!(scanner.prober().peak() <= 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn one_faulty_port_in_a_thousand() {
    let mut host = JitteryHost::new([443], 1);
    host.faulty.insert(777);
    let scanner = RangeScanner::with_prober(host);

    let report = scanner
        .scan(&ScanRequest::new("sim", 1, 1000))
        .await
        .unwrap();

    assert_well_formed(&report);
    assert_eq!(report.summary.error_count, 1);
    assert_eq!(report.error_ports[0].port, 777);
    assert_eq!(report.open_port_numbers(), vec![443]);
    assert_eq!(report.summary.closed_count, 998);
}
