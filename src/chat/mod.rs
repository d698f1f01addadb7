//! Interactive console sessions against a REST webhook.
//!
//! This module provides the conversation loop built on top of the rasaline
//! client library. It supports:
//!
//! - Blocking and streaming response delivery
//! - Button questions presented as selection prompts
//! - An optional message limit and the `/stop` exit command
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`input`]: free-text and selection input resolution
//! - [`session`]: the conversation loop itself

mod config;
mod input;
mod session;

pub use crate::render::{PlainTextRenderer, Renderer};
pub use config::{ChatArgs, ChatConfig};
pub use input::{InputSource, TerminalInput};
pub use session::{ChatSession, EXIT_COMMAND, SessionEnd, SessionSummary};
