//! SSE parser for streamed Responses API calls.
//!
//! Converts a raw `reqwest` byte stream into typed [`StreamEvent`] values.
//! Handles partial lines, `event:` prefixes, and buffering.

use bytes::{Bytes, BytesMut};
use futures::stream::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::error::OpenAiError;
use crate::types::StreamEvent;

/// Stream adapter turning raw SSE bytes into [`StreamEvent`] values.
///
/// Events the adapter does not interpret are filtered out, so consumers
/// only see text deltas, completion, and failure events.
///
/// Transport chunks split at arbitrary byte boundaries, so the buffer
/// holds raw bytes and decoding happens per complete line; a multibyte
/// character split across chunks is reassembled, not rejected.
pub struct ResponseStream {
    inner: Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>,
    buffer: BytesMut,
}

impl ResponseStream {
    pub(crate) fn new(
        byte_stream: impl Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
    ) -> Self {
        Self {
            inner: Box::pin(byte_stream),
            buffer: BytesMut::new(),
        }
    }
}

impl Stream for ResponseStream {
    type Item = Result<StreamEvent, OpenAiError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(parsed) = next_event(&mut this.buffer) {
                match parsed {
                    Ok(StreamEvent::Ignored) => continue,
                    other => return Poll::Ready(Some(other)),
                }
            }

            match Pin::new(&mut this.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => this.buffer.extend_from_slice(&bytes),
                Poll::Ready(Some(Err(e))) => {
                    return Poll::Ready(Some(Err(OpenAiError::Transport(e))));
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Extracts the next parsable SSE `data:` payload from the buffer.
///
/// Returns `None` when no complete line is buffered yet.
fn next_event(buffer: &mut BytesMut) -> Option<Result<StreamEvent, OpenAiError>> {
    loop {
        let newline_pos = buffer.iter().position(|&b| b == b'\n')?;
        let line_bytes = buffer.split_to(newline_pos + 1);
        let line = match std::str::from_utf8(&line_bytes[..newline_pos]) {
            Ok(text) => text.trim(),
            Err(e) => {
                return Some(Err(OpenAiError::Stream(format!(
                    "invalid UTF-8 in stream: {e}"
                ))));
            }
        };

        // Blank lines separate SSE events; `event:` / `id:` lines are
        // redundant with the `type` field inside the data payload.
        if line.is_empty() || !line.starts_with("data:") {
            continue;
        }

        let data = line["data:".len()..].trim();
        if data == "[DONE]" {
            continue;
        }

        return match serde_json::from_str::<serde_json::Value>(data) {
            Ok(val) => Some(Ok(StreamEvent::from_json(&val))),
            Err(e) => Some(Err(OpenAiError::Stream(format!(
                "malformed stream payload: {e} (data: {})",
                truncate_on_char_boundary(data, 200)
            )))),
        };
    }
}

/// Truncates to at most `max` bytes, backing up to a char boundary.
fn truncate_on_char_boundary(data: &str, max: usize) -> &str {
    let mut end = data.len().min(max);
    while !data.is_char_boundary(end) {
        end -= 1;
    }
    &data[..end]
}
