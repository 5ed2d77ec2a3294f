use crate::components::server::ServerClass;
use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};

/// Parameters of one simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub client_count: u32,
    pub duration_ticks: u64,
    /// Routing seed; `None` draws one from the OS.
    pub seed: Option<u64>,
    pub server_classes: Vec<ServerClass>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        // Ten simulated minutes, one slow server among 99 fast ones.
        Self {
            client_count: 10_000,
            duration_ticks: 600_000,
            seed: None,
            server_classes: vec![ServerClass::new(1, 1_000), ServerClass::new(99, 1)],
        }
    }
}

impl SimulationConfig {
    pub fn from_json_str(input: &str) -> SimResult<Self> {
        let config: SimulationConfig = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> SimResult<()> {
        validate_topology(self.client_count, &self.server_classes)
    }

    pub fn server_count(&self) -> u64 {
        self.server_classes.iter().map(|c| c.count as u64).sum()
    }
}

pub(crate) fn validate_topology(client_count: u32, classes: &[ServerClass]) -> SimResult<()> {
    if client_count == 0 {
        return Err(SimError::InvalidConfiguration(
            "client count must be at least 1".to_string(),
        ));
    }
    if classes.is_empty() {
        return Err(SimError::InvalidConfiguration(
            "at least one server class is required".to_string(),
        ));
    }
    for class in classes {
        class.validate()?;
    }
    let total: u64 = classes.iter().map(|c| c.count as u64).sum();
    if total > u32::MAX as u64 {
        return Err(SimError::InvalidConfiguration(format!(
            "{} servers exceed the addressable pool size",
            total
        )));
    }
    Ok(())
}
