use crate::connection::{ConnectionGuard, ConnectionRegistry, Format};
use crate::message;
use async_stream::stream;
use axum::body::Bytes;
use axum::response::sse::Event;
use domain::Flux;
use futures::{Stream, StreamExt};
use log::*;
use std::convert::Infallible;
use std::sync::Arc;

pub struct Manager {
    registry: Arc<ConnectionRegistry>,
}

impl Manager {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(ConnectionRegistry::new()),
        }
    }

    /// Streams a flux as SSE events, one per value. The connection stays
    /// registered until the flux completes or the client goes away.
    pub fn event_stream(
        &self,
        route: &str,
        mut flux: Flux,
    ) -> impl Stream<Item = Result<Event, Infallible>> + Send + 'static {
        let guard = ConnectionGuard::open(Arc::clone(&self.registry), route, Format::EventStream);

        stream! {
            let _guard = guard;
            while let Some(value) = flux.next().await {
                match message::to_event(value) {
                    Ok(event) => yield Ok(event),
                    Err(e) => error!("Failed to encode SSE event for {value}: {e}"),
                }
            }
            debug!("Flux finished in state {:?}", flux.state());
        }
    }

    /// Streams a flux as newline-delimited JSON, one line per value.
    pub fn ndjson_stream(
        &self,
        route: &str,
        mut flux: Flux,
    ) -> impl Stream<Item = Result<Bytes, Infallible>> + Send + 'static {
        let guard = ConnectionGuard::open(Arc::clone(&self.registry), route, Format::NdJson);

        stream! {
            let _guard = guard;
            while let Some(value) = flux.next().await {
                match message::to_ndjson_line(value) {
                    Ok(line) => yield Ok(line),
                    Err(e) => error!("Failed to encode NDJSON line for {value}: {e}"),
                }
            }
            debug!("Flux finished in state {:?}", flux.state());
        }
    }

    pub fn active_connections(&self) -> usize {
        self.registry.len()
    }

    pub fn active_connections_on(&self, route: &str) -> usize {
        self.registry.count_for_route(route)
    }
}

impl Default for Manager {
    fn default() -> Self {
        Self::new()
    }
}
