use anyhow::Result;
use reqwest::header::ACCEPT;
use service::config::Config;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use web::AppState;

const EXPECTED: [u32; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];

struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<std::io::Result<()>>,
}

impl TestServer {
    async fn start(element_delay_ms: u64) -> Result<Self> {
        let app_state = AppState::new(Config::default().set_element_delay_ms(element_delay_ms));
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(web::serve(listener, app_state, async move {
            let _ = shutdown_rx.await;
        }));

        Ok(Self {
            addr,
            shutdown: Some(shutdown_tx),
            handle,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    async fn stop(mut self) -> Result<()> {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        tokio::time::timeout(Duration::from_secs(5), self.handle).await???;
        Ok(())
    }
}

#[tokio::test]
async fn test_list_over_http() -> Result<()> {
    let server = TestServer::start(20).await?;

    let values: Vec<u32> = reqwest::get(server.url("/reactive/onenine/list"))
        .await?
        .error_for_status()?
        .json()
        .await?;

    assert_eq!(values, EXPECTED);
    server.stop().await
}

#[tokio::test]
async fn test_flux_event_stream_over_http() -> Result<()> {
    let server = TestServer::start(100).await?;
    let client = reqwest::Client::new();
    let started = Instant::now();

    let mut response = client
        .get(server.url("/reactive/onenine/flux"))
        .header(ACCEPT, "text/event-stream")
        .send()
        .await?
        .error_for_status()?;

    assert_eq!(
        response.headers()[reqwest::header::CONTENT_TYPE],
        "text/event-stream"
    );

    let mut text = String::new();
    let mut first_arrival = None;
    while let Some(chunk) = response.chunk().await? {
        if first_arrival.is_none() && chunk.windows(5).any(|w| w == b"data:") {
            first_arrival = Some(started.elapsed());
        }
        text.push_str(std::str::from_utf8(&chunk)?);
    }

    let values: Vec<u32> = text
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|data| data.trim().parse())
        .collect::<std::result::Result<_, _>>()?;

    assert_eq!(values, EXPECTED);
    // Nine 100ms pauses; the first event must not wait for the other eight
    let first_arrival = first_arrival.expect("no events received");
    assert!(
        first_arrival < Duration::from_millis(600),
        "first event after {first_arrival:?}"
    );
    assert!(started.elapsed() >= Duration::from_millis(900));

    server.stop().await
}

#[tokio::test]
async fn test_shutdown_interrupts_a_slow_list_request() -> Result<()> {
    // At this delay the list would take 90 seconds
    let server = TestServer::start(10_000).await?;
    let url = server.url("/reactive/onenine/list");

    let request = tokio::spawn(async move {
        reqwest::get(url)
            .await?
            .error_for_status()?
            .json::<Vec<u32>>()
            .await
    });

    // Let the request reach the handler before shutting down
    tokio::time::sleep(Duration::from_millis(200)).await;
    let started = Instant::now();
    server.stop().await?;

    let values = request.await??;
    assert_eq!(values, EXPECTED);
    assert!(started.elapsed() < Duration::from_secs(5));
    Ok(())
}
