//! Configuration types for the console client.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling a conversation session.

use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::client::ResponseMode;

/// Default sender ID used when none is supplied.
const DEFAULT_SENDER_ID: &str = "default";

/// Default server URL for a locally running bot.
const DEFAULT_SERVER_URL: &str = "http://localhost:5005";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Command-line arguments for the rasaline-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Server to talk to.
    #[arrrg(optional, "Server URL (default: http://localhost:5005)", "URL")]
    pub server_url: Option<String>,

    /// Authentication token passed through to the webhook.
    #[arrrg(optional, "Authentication token for the webhook", "TOKEN")]
    pub token: Option<String>,

    /// Sender ID identifying this conversation.
    #[arrrg(optional, "Sender ID for the conversation (default: default)", "ID")]
    pub sender: Option<String>,

    /// Stop after this many messages.
    #[arrrg(optional, "End the session after N sent messages", "N")]
    pub max_messages: Option<u64>,

    /// Collect each response as one array instead of streaming it.
    #[arrrg(flag, "Wait for complete responses instead of streaming")]
    pub blocking: bool,

    /// Request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: 60)", "SECS")]
    pub timeout_secs: Option<u64>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a conversation session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// The server base URL.
    pub server_url: String,

    /// Authentication token; `None` means unauthenticated.
    pub token: Option<String>,

    /// Sender ID identifying this conversation to the server.
    pub sender_id: String,

    /// Optional message limit; the session ends once it is reached.
    pub max_messages: Option<u64>,

    /// How responses are delivered.
    pub mode: ResponseMode,

    /// Bounded request timeout.
    pub timeout: Duration,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Server: http://localhost:5005
    /// - Sender: "default"
    /// - Mode: streaming
    /// - Timeout: 60 seconds
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            token: None,
            sender_id: DEFAULT_SENDER_ID.to_string(),
            max_messages: None,
            mode: ResponseMode::Streaming,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            use_color: true,
        }
    }

    /// Sets the server URL.
    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = server_url.into();
        self
    }

    /// Sets the authentication token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the sender ID.
    pub fn with_sender_id(mut self, sender_id: impl Into<String>) -> Self {
        self.sender_id = sender_id.into();
        self
    }

    /// Sets the message limit.
    pub fn with_max_messages(mut self, max_messages: Option<u64>) -> Self {
        self.max_messages = max_messages;
        self
    }

    /// Sets the response-delivery mode.
    pub fn with_mode(mut self, mode: ResponseMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        let mode = if args.blocking {
            ResponseMode::Blocking
        } else {
            ResponseMode::Streaming
        };

        ChatConfig {
            server_url: args
                .server_url
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            token: args.token,
            sender_id: args.sender.unwrap_or_else(|| DEFAULT_SENDER_ID.to_string()),
            max_messages: args.max_messages,
            mode,
            timeout: Duration::from_secs(args.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            use_color: !args.no_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ChatConfig::new();
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert_eq!(config.sender_id, "default");
        assert!(config.token.is_none());
        assert!(config.max_messages.is_none());
        assert_eq!(config.mode, ResponseMode::Streaming);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_defaults() {
        let args = ChatArgs::default();
        let config = ChatConfig::from(args);
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert_eq!(config.mode, ResponseMode::Streaming);
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            server_url: Some("http://bot.example.com:5005".to_string()),
            token: Some("secret".to_string()),
            sender: Some("alice".to_string()),
            max_messages: Some(10),
            blocking: true,
            timeout_secs: Some(5),
            no_color: true,
        };
        let config = ChatConfig::from(args);
        assert_eq!(config.server_url, "http://bot.example.com:5005");
        assert_eq!(config.token, Some("secret".to_string()));
        assert_eq!(config.sender_id, "alice");
        assert_eq!(config.max_messages, Some(10));
        assert_eq!(config.mode, ResponseMode::Blocking);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(!config.use_color);
    }

    #[test]
    fn config_builder_pattern() {
        let config = ChatConfig::new()
            .with_server_url("http://bot.example.com:5005")
            .with_token("secret")
            .with_sender_id("alice")
            .with_max_messages(Some(3))
            .with_mode(ResponseMode::Blocking)
            .with_timeout(Duration::from_secs(5))
            .without_color();

        assert_eq!(config.server_url, "http://bot.example.com:5005");
        assert_eq!(config.token, Some("secret".to_string()));
        assert_eq!(config.sender_id, "alice");
        assert_eq!(config.max_messages, Some(3));
        assert_eq!(config.mode, ResponseMode::Blocking);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(!config.use_color);
    }
}
