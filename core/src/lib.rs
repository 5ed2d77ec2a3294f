pub mod analytics;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod traits;

pub use analytics::{LatencySummary, MetricPoint, MetricsCollector, ServerThroughput, ThroughputReport};
pub use components::client::Client;
pub use components::router::RandomRouter;
pub use components::server::{server_name, Server, ServerClass};
pub use config::SimulationConfig;
pub use engine::{ServerStats, Simulation, Snapshot};
pub use error::{SimError, SimResult};
pub use traits::{ClientId, Router, ServerId};

/// One tick is one simulated millisecond.
pub const TICKS_PER_SECOND: u64 = 1_000;
