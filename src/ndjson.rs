//! Newline-delimited JSON processing for streaming responses.
//!
//! The webhook's streaming mode delivers one standalone JSON object per
//! newline-terminated line. This module converts a raw byte stream into a
//! lazy stream of [`ResponsePayload`]s: each payload becomes available as
//! soon as its line arrives, without waiting for the response to complete.

use std::collections::VecDeque;

use bytes::Bytes;
use futures::stream::{self, Fuse, Stream, StreamExt};

use crate::error::{Error, Result};
use crate::observability;
use crate::types::{BotMessage, ResponsePayload};

/// Process a stream of bytes into a stream of response payloads.
///
/// Lines are decoded independently and in order; blank lines are ignored. A
/// malformed line yields a decode error carrying the offending line, and the
/// stream is finite: it ends when the server closes the connection. One wire
/// message may expand to several payloads, which are delivered before the
/// next line is read.
pub fn process_ndjson<S>(byte_stream: S) -> impl Stream<Item = Result<ResponsePayload>>
where
    S: Stream<Item = std::result::Result<Bytes, reqwest::Error>> + Unpin + 'static,
{
    // Convert reqwest errors to our error type
    let byte_stream = byte_stream.map(|result| {
        result
            .map_err(|e| Error::streaming(format!("Error in HTTP stream: {e}"), Some(Box::new(e))))
    });

    // Use a state machine to process the line stream
    let state = LineState {
        stream: byte_stream.fuse(),
        buffer: Vec::new(),
        ready: VecDeque::new(),
    };

    stream::unfold(state, move |mut state| async move {
        loop {
            // Payloads decoded from an earlier line drain first.
            if let Some(payload) = state.ready.pop_front() {
                return Some((Ok(payload), state));
            }

            // Then check if we have a complete line in the buffer.
            if let Some(raw) = take_line(&mut state.buffer) {
                match decode_raw_line(&raw) {
                    Ok(payloads) => {
                        state.ready.extend(payloads);
                        continue;
                    }
                    Err(e) => {
                        observability::STREAM_ERRORS.click();
                        return Some((Err(e), state));
                    }
                }
            }

            // Read more data. The buffer holds raw bytes so a multibyte
            // character split across chunk boundaries is never decoded
            // before its line is complete.
            match state.stream.next().await {
                Some(Ok(bytes)) => state.buffer.extend_from_slice(&bytes),
                Some(Err(e)) => {
                    observability::STREAM_ERRORS.click();
                    return Some((Err(e), state));
                }
                None => {
                    // End of stream; a final unterminated line still counts.
                    if !state.buffer.is_empty() {
                        let raw = std::mem::take(&mut state.buffer);
                        match decode_raw_line(&raw) {
                            Ok(payloads) => {
                                state.ready.extend(payloads);
                                continue;
                            }
                            Err(e) => {
                                observability::STREAM_ERRORS.click();
                                return Some((Err(e), state));
                            }
                        }
                    }
                    return None;
                }
            }
        }
    })
}

struct LineState<S: Stream> {
    stream: Fuse<S>,
    buffer: Vec<u8>,
    ready: VecDeque<ResponsePayload>,
}

/// Removes and returns the first newline-terminated line from the buffer.
fn take_line(buffer: &mut Vec<u8>) -> Option<Vec<u8>> {
    let newline = buffer.iter().position(|&b| b == b'\n')?;
    let rest = buffer.split_off(newline + 1);
    let mut line = std::mem::replace(buffer, rest);
    line.truncate(newline);
    Some(line)
}

/// UTF-8-decodes one complete raw line, then parses it.
fn decode_raw_line(raw: &[u8]) -> Result<Vec<ResponsePayload>> {
    let line = std::str::from_utf8(raw).map_err(|e| {
        Error::encoding(format!("Invalid UTF-8 in stream: {e}"), Some(Box::new(e)))
    })?;
    decode_line(line)
}

/// Decodes one line into payloads. Blank lines decode to nothing.
fn decode_line(line: &str) -> Result<Vec<ResponsePayload>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Vec::new());
    }
    observability::STREAM_LINES.click();
    let message: BotMessage = serde_json::from_str(line).map_err(|e| {
        Error::decode(
            format!("Failed to parse streamed message: {e}"),
            Some(line.to_string()),
        )
    })?;
    Ok(message.into_payloads())
}
