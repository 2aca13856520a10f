//! A lazily-driven stream of values pushed by a producer through a `Sink`.
//!
//! `Flux::create` takes the producer but does not run it. The producer task
//! is spawned the first time the flux is polled, so nothing is produced for a
//! subscriber that never shows up. Values travel over a channel of capacity
//! one: the producer waits for the subscriber to take each value before it can
//! push the next one.
//!
//! Completion consumes the `Sink`, so a producer can complete at most once and
//! can never emit after completing. Dropping (or cancelling) the flux closes
//! the channel; the producer sees that through `Sink::closed` or an `Err` from
//! `Sink::next` and is expected to stop.

use crate::error::Error;
use futures::future::{BoxFuture, FutureExt};
use futures::Stream;
use log::*;
use std::future::Future;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FluxState {
    /// Created but never polled; the producer has not started.
    Created,
    /// The last value handed to the subscriber.
    Emitting(u32),
    Completed,
    /// The subscriber gave up before the producer completed.
    Cancelled,
}

impl FluxState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FluxState::Completed | FluxState::Cancelled)
    }
}

#[derive(Debug)]
enum Signal {
    Next(u32),
    Complete,
}

/// The producer's end of a `Flux`.
#[derive(Debug)]
pub struct Sink {
    tx: mpsc::Sender<Signal>,
}

impl Sink {
    /// Pushes a value, waiting until the subscriber has room for it.
    pub async fn next(&self, value: u32) -> Result<(), Error> {
        self.tx
            .send(Signal::Next(value))
            .await
            .map_err(|_| Error::subscriber_gone())
    }

    /// Signals that no more values will follow.
    pub async fn complete(self) {
        if self.tx.send(Signal::Complete).await.is_err() {
            debug!("Flux completed after its subscriber went away");
        }
    }

    /// Resolves once the subscriber has dropped or cancelled the flux.
    pub async fn closed(&self) {
        self.tx.closed().await
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

pub struct Flux {
    rx: mpsc::Receiver<Signal>,
    producer: Option<BoxFuture<'static, ()>>,
    state: FluxState,
}

impl Flux {
    pub fn create<F, Fut>(producer: F) -> Self
    where
        F: FnOnce(Sink) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(1);

        Self {
            rx,
            producer: Some(producer(Sink { tx }).boxed()),
            state: FluxState::Created,
        }
    }

    pub fn state(&self) -> FluxState {
        self.state
    }

    /// Stops the subscription. The producer is told through its `Sink` and
    /// no further values are yielded.
    pub fn cancel(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        debug!("Flux cancelled by its subscriber at {:?}", self.state);
        self.rx.close();
        self.producer = None;
        self.state = FluxState::Cancelled;
    }
}

impl Stream for Flux {
    type Item = u32;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<u32>> {
        let this = &mut *self;

        if this.state.is_terminal() {
            return Poll::Ready(None);
        }

        if let Some(producer) = this.producer.take() {
            trace!("Flux subscribed, spawning its producer");
            tokio::spawn(producer);
        }

        match ready!(this.rx.poll_recv(cx)) {
            Some(Signal::Next(value)) => {
                this.state = FluxState::Emitting(value);
                Poll::Ready(Some(value))
            }
            Some(Signal::Complete) => {
                this.state = FluxState::Completed;
                Poll::Ready(None)
            }
            None => {
                warn!(
                    "Flux producer exited without completing (last state {:?})",
                    this.state
                );
                this.state = FluxState::Completed;
                Poll::Ready(None)
            }
        }
    }
}

impl Drop for Flux {
    fn drop(&mut self) {
        if let FluxState::Emitting(value) = self.state {
            debug!("Flux dropped by its subscriber after {value}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_values_then_completion() {
        let mut flux = Flux::create(|sink| async move {
            for value in 1..=3 {
                sink.next(value).await.unwrap();
            }
            sink.complete().await;
        });

        assert_eq!(flux.state(), FluxState::Created);
        assert_eq!(flux.next().await, Some(1));
        assert_eq!(flux.state(), FluxState::Emitting(1));
        assert_eq!(flux.next().await, Some(2));
        assert_eq!(flux.next().await, Some(3));
        assert_eq!(flux.next().await, None);
        assert_eq!(flux.state(), FluxState::Completed);
        // Completed stays completed
        assert_eq!(flux.next().await, None);
    }

    #[tokio::test]
    async fn test_producer_does_not_run_until_polled() {
        let started = Arc::new(AtomicBool::new(false));
        let started_in_producer = Arc::clone(&started);

        let flux = Flux::create(move |sink| async move {
            started_in_producer.store(true, Ordering::SeqCst);
            sink.complete().await;
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!started.load(Ordering::SeqCst));

        let values: Vec<u32> = flux.collect().await;
        assert!(values.is_empty());
        assert!(started.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_producer_exiting_without_complete_ends_the_flux() {
        let mut flux = Flux::create(|sink| async move {
            sink.next(7).await.unwrap();
        });

        assert_eq!(flux.next().await, Some(7));
        assert_eq!(flux.next().await, None);
        assert_eq!(flux.state(), FluxState::Completed);
    }

    #[tokio::test]
    async fn test_cancel_stops_the_producer() {
        let emitted = Arc::new(AtomicUsize::new(0));
        let emitted_in_producer = Arc::clone(&emitted);
        let (done_tx, done_rx) = oneshot::channel();

        let mut flux = Flux::create(move |sink| async move {
            let mut value = 0;
            loop {
                value += 1;
                if sink.next(value).await.is_err() {
                    break;
                }
                emitted_in_producer.fetch_add(1, Ordering::SeqCst);
            }
            let _ = done_tx.send(sink.is_closed());
        });

        assert_eq!(flux.next().await, Some(1));
        assert_eq!(flux.next().await, Some(2));
        flux.cancel();

        assert_eq!(flux.state(), FluxState::Cancelled);
        assert_eq!(flux.next().await, None);
        assert!(done_rx.await.unwrap(), "producer should observe a closed sink");
        // At most one value can sit in the channel beyond what was taken
        assert!(emitted.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn test_dropping_the_flux_resolves_sink_closed() {
        let (done_tx, done_rx) = oneshot::channel();

        let mut flux = Flux::create(move |sink| async move {
            sink.next(1).await.unwrap();
            sink.closed().await;
            let _ = done_tx.send(());
        });

        assert_eq!(flux.next().await, Some(1));
        drop(flux);

        tokio::time::timeout(Duration::from_secs(1), done_rx)
            .await
            .expect("producer should notice the dropped flux")
            .unwrap();
    }

    #[test]
    fn test_terminal_states() {
        assert!(FluxState::Completed.is_terminal());
        assert!(FluxState::Cancelled.is_terminal());
        assert!(!FluxState::Created.is_terminal());
        assert!(!FluxState::Emitting(3).is_terminal());
    }
}
