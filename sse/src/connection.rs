use dashmap::DashMap;
use log::*;
use std::sync::Arc;
use std::time::Instant;

/// Unique identifier for a connection (server-generated)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

/// How values are framed on a streaming connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `text/event-stream`, one event per value
    EventStream,
    /// `application/x-ndjson`, one JSON line per value
    NdJson,
}

#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub route: String,
    pub format: Format,
    pub opened_at: Instant,
}

/// Registry of the streaming responses currently being written
pub struct ConnectionRegistry {
    connections: DashMap<ConnectionId, ConnectionInfo>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Register a new connection - O(1)
    pub fn register(&self, route: &str, format: Format) -> ConnectionId {
        let connection_id = ConnectionId::new();

        self.connections.insert(
            connection_id.clone(),
            ConnectionInfo {
                route: route.to_string(),
                format,
                opened_at: Instant::now(),
            },
        );

        connection_id
    }

    /// Unregister a connection - O(1)
    pub fn unregister(&self, connection_id: &ConnectionId) -> Option<ConnectionInfo> {
        self.connections
            .remove(connection_id)
            .map(|(_, info)| info)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Number of open connections on one route - O(n)
    pub fn count_for_route(&self, route: &str) -> usize {
        self.connections
            .iter()
            .filter(|entry| entry.value().route == route)
            .count()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps a connection registered for as long as it is alive. Dropped when the
/// response stream finishes or when the client disconnects and hyper drops the
/// body mid-stream.
pub(crate) struct ConnectionGuard {
    registry: Arc<ConnectionRegistry>,
    connection_id: ConnectionId,
}

impl ConnectionGuard {
    pub(crate) fn open(registry: Arc<ConnectionRegistry>, route: &str, format: Format) -> Self {
        let connection_id = registry.register(route, format);
        debug!(
            "Opened {format:?} connection {} on {route}",
            connection_id.as_str()
        );
        Self {
            registry,
            connection_id,
        }
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        if let Some(info) = self.registry.unregister(&self.connection_id) {
            debug!(
                "Closed {:?} connection {} on {} after {:?}",
                info.format,
                self.connection_id.as_str(),
                info.route,
                info.opened_at.elapsed()
            );
        }
    }
}
