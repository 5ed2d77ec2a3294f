pub type ClientId = u32;
pub type ServerId = u32;

/// Routing policy: picks the server a client sends its next request to.
///
/// Implementations see only the client identity and the size of the pool,
/// never server load or latency.
pub trait Router {
    /// Returns an id in `0..server_count`.
    fn route(&mut self, client: ClientId, server_count: usize) -> ServerId;
}

impl<R: Router + ?Sized> Router for Box<R> {
    fn route(&mut self, client: ClientId, server_count: usize) -> ServerId {
        (**self).route(client, server_count)
    }
}

impl<R: Router + ?Sized> Router for &mut R {
    fn route(&mut self, client: ClientId, server_count: usize) -> ServerId {
        (**self).route(client, server_count)
    }
}
