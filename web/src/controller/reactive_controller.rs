use crate::extractors::negotiated_format::{NegotiatedFormat, ResponseFormat};
use crate::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::sse::{KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::Json;
use domain::one_nine;
use futures::StreamExt;

use log::*;

pub(crate) const LIST_PATH: &str = "/reactive/onenine/list";
pub(crate) const FLUX_PATH: &str = "/reactive/onenine/flux";

const NDJSON: &str = "application/x-ndjson";

/// ANY produce 1 through 9, answering only once all nine exist (~4.5s).
#[utoipa::path(
    method(get, post, put, patch, delete, head, options),
    path = "/reactive/onenine/list",
    responses(
        (status = 200, description = "All nine values, sent after the last one is produced", body = [u32]),
    )
)]
pub async fn produce_list(State(app_state): State<AppState>) -> impl IntoResponse {
    debug!("Producing 1..=9 before responding");

    let values = one_nine::produce_list(&app_state.pacing()).await;

    debug!("Produced {values:?}");

    Json(values)
}

/// GET produce 1 through 9, sending each value as soon as it is produced.
///
/// Send `Accept: text/event-stream` for one SSE event per value or
/// `Accept: application/x-ndjson` for one JSON line per value. Plain JSON
/// clients get the same array as `/reactive/onenine/list`.
#[utoipa::path(
    get,
    path = "/reactive/onenine/flux",
    responses(
        (status = 200, description = "Each value as it is produced (text/event-stream, application/x-ndjson), or all nine as a JSON array", body = [u32]),
        (status = 406, description = "Accept header names no supported media type")
    )
)]
pub async fn produce_flux(
    NegotiatedFormat(format): NegotiatedFormat,
    State(app_state): State<AppState>,
) -> Response {
    debug!("Producing 1..=9 as {format:?}");

    let flux = one_nine::produce_flux(app_state.pacing());

    match format {
        ResponseFormat::EventStream => {
            let events = app_state.sse_manager.event_stream(FLUX_PATH, flux);
            Sse::new(events)
                .keep_alive(KeepAlive::new().interval(app_state.config.sse_keep_alive()))
                .into_response()
        }
        ResponseFormat::NdJson => {
            let lines = app_state.sse_manager.ndjson_stream(FLUX_PATH, flux);
            ([(CONTENT_TYPE, NDJSON)], Body::from_stream(lines)).into_response()
        }
        ResponseFormat::Json => {
            let values: Vec<u32> = flux.collect().await;
            Json(values).into_response()
        }
    }
}
