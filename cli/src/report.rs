use lbsim_core::{LatencySummary, MetricPoint, Snapshot, ThroughputReport, TICKS_PER_SECOND};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize, Debug)]
pub struct Output {
    pub throughput: ThroughputReport,
    pub latency: Option<LatencySummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Vec<MetricPoint>>,
}

impl Output {
    pub fn new(snapshot: &Snapshot, timeline: Option<Vec<MetricPoint>>) -> Self {
        Self {
            throughput: ThroughputReport::new(snapshot, TICKS_PER_SECOND),
            latency: LatencySummary::from_snapshot(snapshot),
            timeline,
        }
    }
}

pub fn write_text(out: &mut impl Write, output: &Output) -> io::Result<()> {
    let report = &output.throughput;

    if let Some(timeline) = &output.timeline {
        writeln!(out, "{:>10} {:>12} {:>10} {:>10}", "tick", "completed", "rps", "smoothed")?;
        for point in timeline {
            writeln!(
                out,
                "{:>10} {:>12} {:>10.0} {:>10.0}",
                point.tick, point.completed, point.window_rps, point.smoothed_rps
            )?;
        }
        writeln!(out)?;
    }

    for server in &report.servers {
        writeln!(
            out,
            "{:<9} {:>10} requests ({:>4} rps)",
            server.name,
            server.completed,
            server.rps.round() as u64
        )?;
    }
    writeln!(
        out,
        "overall: {:>11} requests ({:>6} rps, expect {} rps per server)",
        report.total_completed,
        report.overall_rps.round() as u64,
        report.expected_rps_per_server.round() as u64
    )?;

    match &output.latency {
        Some(latency) => writeln!(
            out,
            "latency: mean {:.1} ticks, p50 {}, p99 {}, max {}",
            latency.mean, latency.p50, latency.p99, latency.max
        ),
        None if report.total_completed == 0 => writeln!(out, "latency: no completed requests"),
        None => writeln!(out, "latency: unavailable"),
    }
}

pub fn write_json(out: &mut impl Write, output: &Output) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, output)?;
    writeln!(out)
}
