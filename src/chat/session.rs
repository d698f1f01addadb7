//! The conversation loop.
//!
//! [`ChatSession`] drives one interactive session: read input, send it to
//! the server, render every payload as it arrives, and carry the pending
//! selection from one iteration into the next input step.

use futures::StreamExt;

use crate::chat::config::ChatConfig;
use crate::chat::input::InputSource;
use crate::client::{ResponseMode, Transport};
use crate::error::Result;
use crate::observability;
use crate::render::{Renderer, render_payload};
use crate::types::{PendingSelection, ResponsePayload};

/// Input that ends the session instead of being sent to the server.
///
/// The reserved intent prefix followed by "stop"; compared exactly after
/// trimming surrounding whitespace.
pub const EXIT_COMMAND: &str = "/stop";

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user typed the exit command.
    ExitRequested,

    /// The configured message limit was reached.
    LimitReached,

    /// The input source had nothing more to give.
    InputExhausted,
}

/// Summary of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Why the session ended.
    pub end: SessionEnd,

    /// How many messages were successfully sent.
    pub messages_sent: u64,
}

/// A conversation session against one transport.
///
/// The session owns the only piece of state threaded across iterations: the
/// count of sent messages and the pending selection from the most recent
/// render step. Transport and decode failures are not caught here; an
/// interactive session does not try to recover from a broken backend.
pub struct ChatSession<T: Transport> {
    transport: T,
    config: ChatConfig,
    messages_sent: u64,
    pending: Option<PendingSelection>,
}

impl<T: Transport> ChatSession<T> {
    /// Creates a new session over the given transport.
    pub fn new(transport: T, config: ChatConfig) -> Self {
        Self {
            transport,
            config,
            messages_sent: 0,
            pending: None,
        }
    }

    /// The number of messages sent so far.
    pub fn messages_sent(&self) -> u64 {
        self.messages_sent
    }

    /// The active configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Runs the conversation loop until it terminates.
    ///
    /// Each iteration reads one input (free text, or a selection when the
    /// previous reply carried choices), sends it, and renders every returned
    /// payload in arrival order. The loop ends on the exit command, on
    /// exhausted input, or once the configured message limit is reached.
    ///
    /// # Errors
    ///
    /// Transport and decode errors propagate immediately; nothing further is
    /// rendered for the failed send and `messages_sent` is not incremented.
    pub async fn run(
        &mut self,
        input: &mut dyn InputSource,
        renderer: &mut dyn Renderer,
    ) -> Result<SessionSummary> {
        loop {
            // The limit gates the next send, so a limit of zero sends nothing.
            if let Some(limit) = self.config.max_messages
                && self.messages_sent >= limit
            {
                return Ok(self.finish(SessionEnd::LimitReached));
            }

            let Some(text) = input.read(self.pending.as_ref())? else {
                return Ok(self.finish(SessionEnd::InputExhausted));
            };
            // The selection was consumed by this read.
            self.pending = None;

            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            if text == EXIT_COMMAND {
                return Ok(self.finish(SessionEnd::ExitRequested));
            }

            match self.config.mode {
                ResponseMode::Blocking => {
                    let payloads = self
                        .transport
                        .send_blocking(&self.config.sender_id, text)
                        .await?;
                    for payload in &payloads {
                        self.pending = self.render_one(payload, renderer);
                    }
                }
                ResponseMode::Streaming => {
                    let mut payloads = self
                        .transport
                        .send_stream(&self.config.sender_id, text)
                        .await?;
                    while let Some(payload) = payloads.next().await {
                        let payload = payload?;
                        self.pending = self.render_one(&payload, renderer);
                    }
                }
            }

            self.messages_sent += 1;
            observability::CHAT_MESSAGES_SENT.click();
        }
    }

    /// Renders one payload and returns its pending selection, if any.
    fn render_one(
        &self,
        payload: &ResponsePayload,
        renderer: &mut dyn Renderer,
    ) -> Option<PendingSelection> {
        let (lines, pending) = render_payload(payload);
        for line in &lines {
            renderer.print_line(line);
        }
        pending
    }

    fn finish(&self, end: SessionEnd) -> SessionSummary {
        SessionSummary {
            end,
            messages_sent: self.messages_sent,
        }
    }
}
