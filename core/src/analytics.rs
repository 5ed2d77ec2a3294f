use crate::components::server::server_name;
use crate::engine::{Simulation, Snapshot};
use crate::traits::{Router, ServerId};
use hdrhistogram::Histogram;
use log::error;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct ServerThroughput {
    pub id: ServerId,
    pub name: String,
    pub latency: u64,
    pub completed: u64,
    pub rps: f64,
}

/// Request rates derived from a [`Snapshot`].
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct ThroughputReport {
    pub elapsed_ticks: u64,
    pub servers: Vec<ServerThroughput>,
    pub total_completed: u64,
    pub overall_rps: f64,
    /// Overall rate divided evenly across the pool.
    pub expected_rps_per_server: f64,
}

impl ThroughputReport {
    pub fn new(snapshot: &Snapshot, ticks_per_second: u64) -> Self {
        let rate = |completed: u64| -> f64 {
            if snapshot.elapsed_ticks == 0 {
                0.0
            } else {
                ticks_per_second as f64 * completed as f64 / snapshot.elapsed_ticks as f64
            }
        };

        let servers: Vec<ServerThroughput> = snapshot
            .servers
            .iter()
            .map(|s| ServerThroughput {
                id: s.id,
                name: server_name(s.id),
                latency: s.latency,
                completed: s.completed,
                rps: rate(s.completed),
            })
            .collect();
        let overall_rps = rate(snapshot.total_completed);
        let expected_rps_per_server = if servers.is_empty() {
            0.0
        } else {
            overall_rps / servers.len() as f64
        };

        Self {
            elapsed_ticks: snapshot.elapsed_ticks,
            servers,
            total_completed: snapshot.total_completed,
            overall_rps,
            expected_rps_per_server,
        }
    }
}

/// Distribution of request latency as seen by clients, in ticks.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct LatencySummary {
    pub count: u64,
    pub mean: f64,
    pub p50: u64,
    pub p99: u64,
    pub max: u64,
}

impl LatencySummary {
    /// Every completion on a server took exactly that server's latency.
    /// Returns `None` when nothing has completed yet, or when the histogram
    /// rejects a value (logged).
    pub fn from_snapshot(snapshot: &Snapshot) -> Option<Self> {
        if snapshot.total_completed == 0 {
            return None;
        }
        let mut hist = match Histogram::<u64>::new(3) {
            Ok(hist) => hist,
            Err(err) => {
                error!("cannot build latency histogram: {}", err);
                return None;
            }
        };
        for server in snapshot.servers.iter().filter(|s| s.completed > 0) {
            if let Err(err) = hist.record_n(server.latency, server.completed) {
                error!(
                    "cannot record {} completions at latency {} for server {}: {}",
                    server.completed, server.latency, server.id, err
                );
                return None;
            }
        }
        Some(Self {
            count: hist.len(),
            mean: hist.mean(),
            p50: hist.value_at_quantile(0.50),
            p99: hist.value_at_quantile(0.99),
            max: hist.max(),
        })
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct MetricPoint {
    pub tick: u64,
    pub completed: u64,
    pub window_rps: f64,
    pub smoothed_rps: f64,
}

/// Samples aggregate throughput every `step_ticks` ticks.
pub struct MetricsCollector {
    pub history: VecDeque<MetricPoint>,
    pub max_points: usize,
    step_ticks: u64,
    ticks_per_second: u64,
    last_sample_tick: u64,
    last_completed: u64,
    smoothed_rps: f64,
}

impl MetricsCollector {
    pub fn new(step_ticks: u64, ticks_per_second: u64, max_points: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(max_points.min(4096)),
            max_points,
            step_ticks: step_ticks.max(1),
            ticks_per_second,
            last_sample_tick: 0,
            last_completed: 0,
            smoothed_rps: 0.0,
        }
    }

    /// Records a point if at least `step_ticks` have passed since the last one.
    pub fn update<R: Router>(&mut self, sim: &Simulation<R>) -> Option<MetricPoint> {
        let now = sim.time();
        if now < self.last_sample_tick + self.step_ticks {
            return None;
        }

        let completed = sim.completions();
        let delta = completed.saturating_sub(self.last_completed);
        let delta_ticks = now - self.last_sample_tick;
        let window_rps = self.ticks_per_second as f64 * delta as f64 / delta_ticks as f64;

        let alpha = 0.1;
        self.smoothed_rps = if self.history.is_empty() {
            window_rps
        } else {
            self.smoothed_rps * (1.0 - alpha) + window_rps * alpha
        };

        let point = MetricPoint {
            tick: now,
            completed,
            window_rps,
            smoothed_rps: self.smoothed_rps,
        };
        self.history.push_back(point);
        if self.history.len() > self.max_points {
            self.history.pop_front();
        }

        self.last_sample_tick = now;
        self.last_completed = completed;
        Some(point)
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.last_sample_tick = 0;
        self.last_completed = 0;
        self.smoothed_rps = 0.0;
    }
}
