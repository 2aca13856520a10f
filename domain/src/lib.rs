//! Producing the 1..=9 sequence, eagerly or as a stream.
//!
//! - `one_nine`: the two producers. `produce_list` hands back a finished
//!   `Vec`; `produce_flux` hands back a `Flux` that yields each value as soon
//!   as it exists.
//! - `flux`: the `Flux`/`Sink` pair the streamed producer pushes through.
//! - `pacing`: the non-blocking, interruptible pause before each value.
//! - `pipeline`: map/filter over the sequence as an iterator or a stream.
//! - `error`: the domain error tree translated by `sse` and `web`.

pub mod error;
pub mod flux;
pub mod one_nine;
pub mod pacing;
pub mod pipeline;

pub use flux::{Flux, FluxState, Sink};
pub use pacing::{Pacing, PauseOutcome};
