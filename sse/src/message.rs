use axum::body::Bytes;
use axum::response::sse::Event;
use domain::error::Error;

/// One sequence value as an SSE event: `data:<value>`
pub fn to_event(value: u32) -> Result<Event, Error> {
    let data = serde_json::to_string(&value)?;
    Ok(Event::default().data(data))
}

/// One sequence value as a newline-terminated JSON line
pub fn to_ndjson_line(value: u32) -> Result<Bytes, Error> {
    let mut line = serde_json::to_vec(&value)?;
    line.push(b'\n');
    Ok(Bytes::from(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndjson_line_is_the_bare_number() {
        assert_eq!(to_ndjson_line(7).unwrap(), Bytes::from_static(b"7\n"));
    }

    #[test]
    fn test_event_builds_for_every_value() {
        for value in domain::one_nine::sequence() {
            assert!(to_event(value).is_ok());
        }
    }
}
