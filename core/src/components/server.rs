use crate::error::{SimError, SimResult};
use crate::traits::ServerId;
use serde::{Deserialize, Serialize};

/// `count` identical servers sharing one `latency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerClass {
    pub count: u32,
    pub latency: u64,
}

impl ServerClass {
    pub fn new(count: u32, latency: u64) -> Self {
        Self { count, latency }
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.count == 0 {
            return Err(SimError::InvalidConfiguration(
                "server class count must be at least 1".to_string(),
            ));
        }
        if self.latency == 0 {
            return Err(SimError::InvalidConfiguration(
                "server class latency must be at least 1 tick".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ServerClass {
    fn default() -> Self {
        Self { count: 1, latency: 1 }
    }
}

/// Display name used in reports.
pub fn server_name(id: ServerId) -> String {
    format!("server_{}", id)
}

/// A server with a fixed response latency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    id: ServerId,
    latency: u64,
    completed: u64,
}

impl Server {
    pub fn new(id: ServerId, latency: u64) -> Self {
        Self {
            id,
            latency,
            completed: 0,
        }
    }

    /// Flattens the classes into individual servers, numbered from 0 in class order.
    pub fn expand(classes: &[ServerClass]) -> Vec<Server> {
        classes
            .iter()
            .flat_map(|class| std::iter::repeat(class.latency).take(class.count as usize))
            .enumerate()
            .map(|(id, latency)| Server::new(id as ServerId, latency))
            .collect()
    }

    pub fn id(&self) -> ServerId {
        self.id
    }

    pub fn latency(&self) -> u64 {
        self.latency
    }

    pub fn completed(&self) -> u64 {
        self.completed
    }

    pub(crate) fn record_completion(&mut self) {
        self.completed += 1;
    }
}
