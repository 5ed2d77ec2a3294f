use crate::traits::{ClientId, ServerId};
use serde::{Deserialize, Serialize};

/// A sequential client: at most one request in flight at any time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub(crate) id: ClientId,
    pub(crate) next_free_tick: u64,
    pub(crate) current_server: Option<ServerId>,
}

impl Client {
    pub fn new(id: ClientId) -> Self {
        Self {
            id,
            next_free_tick: 1,
            current_server: None,
        }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Tick at which the outstanding request completes and the next one is issued.
    pub fn next_free_tick(&self) -> u64 {
        self.next_free_tick
    }

    /// Server handling (or that last handled) this client's request.
    pub fn current_server(&self) -> Option<ServerId> {
        self.current_server
    }

    pub fn is_busy_at(&self, tick: u64) -> bool {
        self.next_free_tick > tick
    }

    pub(crate) fn assign(&mut self, server: ServerId, next_free_tick: u64) {
        self.current_server = Some(server);
        self.next_free_tick = next_free_tick;
    }
}
