//! Streaming responses for the sequence endpoints.
//!
//! This crate turns a `domain::Flux` into the body of a long-lived HTTP
//! response and keeps track of which of those responses are still open.
//!
//! # Message Flow
//!
//! 1. A client requests `/reactive/onenine/flux` with a streaming `Accept`
//!    header (`text/event-stream` or `application/x-ndjson`)
//! 2. The controller builds a `Flux` and hands it to the `Manager`
//! 3. The manager registers the connection and wraps the flux in a stream
//!    that encodes each value as it arrives (`message`)
//! 4. The first poll of that stream subscribes to the flux, which starts
//!    the producer
//! 5. When the flux completes, or hyper drops the body because the client
//!    disconnected, the connection is unregistered and the producer stops
//!
//! # Modules
//!
//! - `connection`: ConnectionRegistry and the guard that unregisters on drop
//! - `manager`: builds SSE and NDJSON streams from a flux
//! - `message`: encodes single values for the wire

pub mod connection;
pub mod manager;
pub mod message;

pub use connection::Format;
pub use manager::Manager;
