use crate::common::{classes, FixedRouter, ModuloRouter, TestHarness};
use lbsim_core::*;

fn snapshot(elapsed_ticks: u64, servers: &[(u64, u64)]) -> Snapshot {
    let servers: Vec<ServerStats> = servers
        .iter()
        .enumerate()
        .map(|(id, &(latency, completed))| ServerStats {
            id: id as ServerId,
            latency,
            completed,
        })
        .collect();
    let total_completed = servers.iter().map(|s| s.completed).sum();
    Snapshot {
        elapsed_ticks,
        servers,
        total_completed,
    }
}

#[test]
fn test_throughput_report_rates() {
    let report = ThroughputReport::new(&snapshot(2_000, &[(1, 3_000), (10, 1_000)]), TICKS_PER_SECOND);

    assert_eq!(report.total_completed, 4_000);
    assert_eq!(report.servers[0].name, "server_0");
    assert_eq!(report.servers[1].name, "server_1");
    assert_eq!(report.servers[0].rps, 1_500.0);
    assert_eq!(report.servers[1].rps, 500.0);
    assert_eq!(report.overall_rps, 2_000.0);
    assert_eq!(report.expected_rps_per_server, 1_000.0);
}

#[test]
fn test_throughput_report_zero_duration() {
    let report = ThroughputReport::new(&snapshot(0, &[(1, 0), (2, 0)]), TICKS_PER_SECOND);
    assert_eq!(report.overall_rps, 0.0);
    assert!(report.servers.iter().all(|s| s.rps == 0.0));
}

#[test]
fn test_latency_summary() {
    assert!(LatencySummary::from_snapshot(&snapshot(10, &[(5, 0)])).is_none());

    let summary = LatencySummary::from_snapshot(&snapshot(100, &[(1_000, 1), (1, 199)])).unwrap();
    assert_eq!(summary.count, 200);
    assert_eq!(summary.p50, 1);
    assert_eq!(summary.p99, 1);
    assert_eq!(summary.max, 1_000);
    assert!(summary.mean > 5.0 && summary.mean < 7.0);
}

#[test]
fn test_latency_summary_from_run() {
    let mut h = TestHarness::with_router(2, &classes(&[(2, 2)]), ModuloRouter);
    h.run_for(7);
    let summary = LatencySummary::from_snapshot(&h.sim.snapshot()).unwrap();
    assert_eq!(summary.count, 6);
    assert_eq!(summary.p99, 2);
}

#[test]
fn test_metrics_collector_samples_on_cadence() {
    let mut h = TestHarness::with_router(10, &classes(&[(1, 1)]), FixedRouter(0));
    let mut collector = MetricsCollector::new(100, TICKS_PER_SECOND, 3);

    let mut sampled = Vec::new();
    for _ in 0..500 {
        h.sim.step().unwrap();
        if let Some(point) = collector.update(&h.sim) {
            sampled.push(point.tick);
        }
    }

    assert_eq!(sampled, vec![100, 200, 300, 400, 500]);
    assert_eq!(collector.history.len(), 3);

    // Ten clients on a one-tick server: ten completions per tick after the first.
    let last = collector.history.back().unwrap();
    assert_eq!(last.tick, 500);
    assert_eq!(last.window_rps, 10_000.0);
    assert_eq!(last.completed, 4_990);

    collector.reset();
    assert!(collector.history.is_empty());
}
