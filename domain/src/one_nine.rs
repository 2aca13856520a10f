//! Producers for the 1..=9 sequence, one eager and one streamed.

use crate::flux::Flux;
use crate::pacing::Pacing;
use log::*;
use std::ops::RangeInclusive;

pub const FIRST: u32 = 1;
pub const LAST: u32 = 9;

pub fn sequence() -> RangeInclusive<u32> {
    FIRST..=LAST
}

/// Pauses before each value and returns all nine only once the last one exists.
pub async fn produce_list(pacing: &Pacing) -> Vec<u32> {
    let mut values = Vec::with_capacity(LAST as usize);
    for value in sequence() {
        // An interrupted pause just means less waiting
        pacing.pause().await;
        values.push(value);
    }
    values
}

/// Returns a `Flux` that, once subscribed, pauses before each value and
/// pushes it to the subscriber right away, then completes.
///
/// If the subscriber goes away the producer stops at its next pause or push.
pub fn produce_flux(pacing: Pacing) -> Flux {
    Flux::create(move |sink| async move {
        for value in sequence() {
            tokio::select! {
                biased;
                _ = sink.closed() => {
                    debug!("Subscriber left before {value} was produced, stopping");
                    return;
                }
                _ = pacing.pause() => {}
            }

            if let Err(e) = sink.next(value).await {
                debug!("Dropping {value}: {e}");
                return;
            }
        }
        sink.complete().await;
    })
}
