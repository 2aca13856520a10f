use axum::http::{
    header::{ACCEPT, CONTENT_TYPE},
    HeaderValue, Method,
};
use axum::Router;
use log::*;
use service::config::Config;
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub use self::error::Error;
pub use service::AppState;

mod controller;
mod error;
mod extractors;
pub mod router;

/// Binds the configured interface and port and serves until Ctrl-C or SIGTERM.
pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let host = app_state.config.interface().to_string();
    let port = app_state.config.port;

    let listener = TcpListener::bind((host.as_str(), port)).await?;
    info!("Server starting... listening for connections on http://{host}:{port}");

    serve(listener, app_state, shutdown_signal()).await
}

/// Serves on an already bound listener until `shutdown` resolves.
///
/// On shutdown every pause in flight is interrupted, so list requests answer
/// right away and event streams flush their remaining values and complete,
/// letting graceful shutdown finish without waiting out the delays.
pub async fn serve<F>(listener: TcpListener, app_state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let interrupt_state = app_state.clone();
    axum::serve(listener, app(app_state))
        .with_graceful_shutdown(async move {
            shutdown.await;
            info!("Shutting down, interrupting in-flight sequences");
            interrupt_state.interrupt();
        })
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Every method the list route answers, so cross-origin preflights for any of
/// them succeed.
const CORS_METHODS: [Method; 7] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::HEAD,
    Method::OPTIONS,
];

fn app(app_state: AppState) -> Router {
    let cors = cors_layer(&app_state.config);
    router::define_routes(app_state).layer(cors)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {origin:?}: {e}");
                None
            }
        })
        .collect();

    debug!("CORS allowed origins: {origins:?}");

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(CORS_METHODS)
        .allow_headers([ACCEPT, CONTENT_TYPE])
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
