use crate::Error;
use axum::{
    extract::FromRequestParts,
    http::{header::ACCEPT, request::Parts},
};
use mime::Mime;

/// How a sequence response is written back to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// One SSE event per value, each flushed as it is produced
    EventStream,
    /// One JSON line per value, each flushed as it is produced
    NdJson,
    /// A single JSON array once the sequence is complete
    Json,
}

impl ResponseFormat {
    fn for_media_range(essence: &str) -> Option<Self> {
        match essence {
            "text/event-stream" => Some(ResponseFormat::EventStream),
            "application/x-ndjson" | "application/stream+json" => Some(ResponseFormat::NdJson),
            "application/json" | "application/*" | "*/*" => Some(ResponseFormat::Json),
            _ => None,
        }
    }
}

/// Picks a `ResponseFormat` from the `Accept` header. Media ranges are tried
/// in order of their `q` weight (ties keep header order) and `q=0` ranges are
/// skipped. A missing or empty header means JSON; a header that is not
/// visible ASCII is rejected like any other unsupported one.
pub struct NegotiatedFormat(pub ResponseFormat);

impl NegotiatedFormat {
    pub fn from_accept(accept: &str) -> Option<ResponseFormat> {
        let mut ranges: Vec<(f32, Mime)> = accept
            .split(',')
            .filter_map(|range| range.trim().parse::<Mime>().ok())
            .map(|range| (Self::weight(&range), range))
            .filter(|(weight, _)| *weight > 0.0)
            .collect();

        if ranges.is_empty() && accept.trim().is_empty() {
            return Some(ResponseFormat::Json);
        }

        // Stable, so equal weights keep the client's order
        ranges.sort_by(|(a, _), (b, _)| b.total_cmp(a));

        ranges
            .iter()
            .find_map(|(_, range)| ResponseFormat::for_media_range(range.essence_str()))
    }

    fn weight(range: &Mime) -> f32 {
        range
            .get_param("q")
            .and_then(|q| q.as_str().parse::<f32>().ok())
            .unwrap_or(1.0)
    }
}

impl<S> FromRequestParts<S> for NegotiatedFormat
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let accept = match parts.headers.get(ACCEPT) {
            Some(value) => value.to_str().map_err(|_| Error::NotAcceptable {
                accept: String::from_utf8_lossy(value.as_bytes()).into_owned(),
            })?,
            None => return Ok(NegotiatedFormat(ResponseFormat::Json)),
        };

        NegotiatedFormat::from_accept(accept)
            .map(NegotiatedFormat)
            .ok_or_else(|| Error::NotAcceptable {
                accept: accept.to_string(),
            })
    }
}
