use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::*;

/// Request-level failures. Producing the sequence itself cannot fail: a gone
/// subscriber or an unencodable value is dealt with inside `domain` and `sse`
/// and never reaches a handler.
#[derive(Debug)]
pub enum Error {
    /// None of the media types in the request's `Accept` header can be produced.
    NotAcceptable { accept: String },
}

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

// List of possible StatusCode variants https://docs.rs/http/latest/http/status/struct.StatusCode.html
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotAcceptable { accept } => {
                debug!("Cannot produce any of: {accept}");
                (
                    StatusCode::NOT_ACCEPTABLE,
                    "NOT ACCEPTABLE: expected one of text/event-stream, application/x-ndjson, application/json",
                )
                    .into_response()
            }
        }
    }
}
