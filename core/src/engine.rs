use crate::components::client::Client;
use crate::components::router::RandomRouter;
use crate::components::server::{Server, ServerClass};
use crate::config::{validate_topology, SimulationConfig};
use crate::error::{SimError, SimResult};
use crate::traits::{ClientId, Router, ServerId};
use log::{debug, error, info, trace};
use serde::{Deserialize, Serialize};

/// Per-server counters exposed to reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStats {
    pub id: ServerId,
    pub latency: u64,
    pub completed: u64,
}

/// Read-only view of the server counters at some tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub elapsed_ticks: u64,
    pub servers: Vec<ServerStats>,
    pub total_completed: u64,
}

/// Discrete-time engine: sequential clients routed across a fixed server pool.
///
/// The engine is the only mutator of its clients and servers. Each call to
/// [`Simulation::step`] advances the clock by exactly one tick.
pub struct Simulation<R = RandomRouter> {
    time: u64,
    clients: Vec<Client>,
    servers: Vec<Server>,
    router: R,
    completions: u64,
}

impl Simulation<RandomRouter> {
    /// Builds a uniformly random-routed simulation from `config`.
    pub fn from_config(config: &SimulationConfig) -> SimResult<Self> {
        let router = match config.seed {
            Some(seed) => RandomRouter::seeded(seed),
            None => RandomRouter::from_entropy(),
        };
        Self::new(config.client_count, &config.server_classes, router)
    }
}

impl<R: Router> Simulation<R> {
    pub fn new(client_count: u32, classes: &[ServerClass], router: R) -> SimResult<Self> {
        validate_topology(client_count, classes)?;

        let clients = (0..client_count).map(Client::new).collect();
        let servers = Server::expand(classes);
        info!(
            "initialized simulation with {} clients and {} servers in {} classes",
            client_count,
            servers.len(),
            classes.len()
        );

        Ok(Self {
            time: 0,
            clients,
            servers,
            router,
            completions: 0,
        })
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    /// Number of completion transitions recorded so far.
    pub fn completions(&self) -> u64 {
        self.completions
    }

    /// Clients with a request outstanding at the current tick.
    pub fn in_flight(&self) -> usize {
        self.clients
            .iter()
            .filter(|c| c.current_server().is_some() && c.is_busy_at(self.time))
            .count()
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    /// Advances the clock one tick, completing and reissuing requests of
    /// every client that becomes free at that tick.
    pub fn step(&mut self) -> SimResult<()> {
        self.time += 1;
        let now = self.time;
        let server_count = self.servers.len();

        for client in self.clients.iter_mut() {
            let next_free = client.next_free_tick();
            if next_free > now {
                if client.current_server().is_none() {
                    return Err(violation(now, client.id(), "busy client has no server"));
                }
                continue;
            }
            if next_free < now {
                return Err(violation(
                    now,
                    client.id(),
                    format!("client was due at tick {}", next_free),
                ));
            }

            match client.current_server() {
                Some(server_id) => match self.servers.get_mut(server_id as usize) {
                    Some(server) => {
                        server.record_completion();
                        self.completions += 1;
                    }
                    None => {
                        return Err(violation(
                            now,
                            client.id(),
                            format!("completion for unknown server {}", server_id),
                        ))
                    }
                },
                None if now != 1 => {
                    return Err(violation(now, client.id(), "completion without a server"));
                }
                None => {}
            }

            let target = self.router.route(client.id(), server_count);
            let server = match self.servers.get(target as usize) {
                Some(server) => server,
                None => {
                    return Err(violation(
                        now,
                        client.id(),
                        format!("router picked server {} of {}", target, server_count),
                    ))
                }
            };
            let Some(due) = now.checked_add(server.latency()) else {
                return Err(violation(now, client.id(), "next free tick overflows"));
            };
            trace!("tick {}: client {} -> server {} until {}", now, client.id(), target, due);
            client.assign(target, due);
        }
        Ok(())
    }

    /// Steps `total_ticks` times, stopping at the first violation.
    pub fn run(&mut self, total_ticks: u64) -> SimResult<()> {
        debug!("running {} ticks from tick {}", total_ticks, self.time);
        for _ in 0..total_ticks {
            self.step()?;
        }
        info!(
            "ran to tick {} with {} completed requests",
            self.time, self.completions
        );
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        let servers: Vec<ServerStats> = self
            .servers
            .iter()
            .map(|s| ServerStats {
                id: s.id(),
                latency: s.latency(),
                completed: s.completed(),
            })
            .collect();
        let total_completed = servers.iter().map(|s| s.completed).sum();
        Snapshot {
            elapsed_ticks: self.time,
            servers,
            total_completed,
        }
    }
}

fn violation(tick: u64, client: ClientId, reason: impl Into<String>) -> SimError {
    let reason = reason.into();
    error!("tick {}: client {}: {}", tick, client, reason);
    SimError::InvariantViolation {
        tick,
        client,
        reason,
    }
}
