use crate::output::Arrival;
use anyhow::Result;
use eventsource_client::{self as es, Client};
use futures_util::stream::StreamExt;
use log::*;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

pub const FLUX_PATH: &str = "/reactive/onenine/flux";

pub struct Connection {
    started: Instant,
    event_rx: mpsc::UnboundedReceiver<Arrival>,
    _handle: tokio::task::JoinHandle<()>,
}

impl Connection {
    /// Opens the event stream. The server closes it after the ninth value,
    /// so reconnecting is switched off.
    pub fn establish(base_url: &str) -> Result<Self> {
        let url = format!("{}{}", base_url, FLUX_PATH);
        let (tx, rx) = mpsc::unbounded_channel();

        let client = es::ClientBuilder::for_url(&url)?
            .header("Accept", "text/event-stream")?
            .reconnect(es::ReconnectOptions::reconnect(false).build())
            .build();

        let started = Instant::now();
        let handle = tokio::spawn(async move {
            let mut stream = client.stream();

            loop {
                match stream.next().await {
                    Some(Ok(es::SSE::Event(event))) => {
                        match serde_json::from_str::<u32>(&event.data) {
                            Ok(value) => {
                                let arrival = Arrival {
                                    value,
                                    elapsed: started.elapsed(),
                                };
                                if tx.send(arrival).is_err() {
                                    debug!("Arrival receiver dropped");
                                    break;
                                }
                            }
                            Err(e) => warn!("Ignoring event with data {:?}: {}", event.data, e),
                        }
                    }
                    Some(Ok(es::SSE::Comment(_))) => {
                        // Ignore comments (keep-alive)
                    }
                    Some(Err(e)) => {
                        // With reconnects off, the end of the stream surfaces as an error
                        debug!("SSE stream ended: {:?}", e);
                        break;
                    }
                    None => {
                        debug!("SSE stream ended");
                        break;
                    }
                }
            }
        });

        Ok(Self {
            started,
            event_rx: rx,
            _handle: handle,
        })
    }

    pub fn started(&self) -> Instant {
        self.started
    }

    /// Waits for the next value, giving up after `timeout`.
    pub async fn next_arrival(&mut self, timeout: Duration) -> Result<Option<Arrival>> {
        match tokio::time::timeout(timeout, self.event_rx.recv()).await {
            Ok(arrival) => Ok(arrival),
            Err(_) => anyhow::bail!("Timeout waiting for the next value"),
        }
    }
}
