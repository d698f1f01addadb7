//! Error types for the rasaline client.
//!
//! This module defines the error type system for everything that can go
//! wrong while talking to a Rasa REST webhook or driving an interactive
//! session.

use std::error;
use std::fmt;
use std::io;
use std::sync::Arc;

/// The main error type for rasaline.
#[derive(Clone, Debug)]
pub enum Error {
    /// The webhook answered with a non-2xx status.
    Api {
        /// HTTP status code.
        status_code: u16,
        /// Response body (or a summary of it).
        message: String,
    },

    /// The token was rejected by the server.
    Authentication {
        /// Human-readable error message.
        message: String,
    },

    /// The webhook endpoint does not exist on this server.
    NotFound {
        /// Human-readable error message.
        message: String,
    },

    /// The request timed out.
    Timeout {
        /// Human-readable error message.
        message: String,
        /// Duration of the timeout in seconds.
        duration: Option<f64>,
    },

    /// Connection error (refused, DNS, reset).
    Connection {
        /// Human-readable error message.
        message: String,
        /// Underlying cause.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// HTTP client error not covered by a more specific variant.
    HttpClient {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// The response stream failed mid-flight.
    Streaming {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// The server sent bytes that are not valid UTF-8.
    Encoding {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// The server sent JSON that does not decode to a bot message.
    Decode {
        /// Human-readable error message.
        message: String,
        /// The offending line or element, when known.
        fragment: Option<String>,
    },

    /// I/O error.
    Io {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Arc<io::Error>,
    },

    /// A URL parsing or manipulation error.
    Url {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<url::ParseError>,
    },

    /// The interactive session ended without producing input.
    Abort {
        /// Human-readable error message.
        message: String,
    },
}

impl Error {
    /// Creates a new API error from a status code and response body.
    pub fn api(status_code: u16, message: impl Into<String>) -> Self {
        Error::Api {
            status_code,
            message: message.into(),
        }
    }

    /// Creates a new authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Error::Authentication {
            message: message.into(),
        }
    }

    /// Creates a new not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Error::NotFound {
            message: message.into(),
        }
    }

    /// Creates a new timeout error.
    pub fn timeout(message: impl Into<String>, duration: Option<f64>) -> Self {
        Error::Timeout {
            message: message.into(),
            duration,
        }
    }

    /// Creates a new connection error.
    pub fn connection(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::Connection {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new HTTP client error.
    pub fn http_client(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::HttpClient {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new streaming error.
    pub fn streaming(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::Streaming {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new encoding error.
    pub fn encoding(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::Encoding {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new decode error, optionally carrying the offending fragment.
    pub fn decode(message: impl Into<String>, fragment: Option<String>) -> Self {
        Error::Decode {
            message: message.into(),
            fragment,
        }
    }

    /// Creates a new I/O error.
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            message: message.into(),
            source: Arc::new(source),
        }
    }

    /// Creates a new URL error.
    pub fn url(message: impl Into<String>, source: Option<url::ParseError>) -> Self {
        Error::Url {
            message: message.into(),
            source,
        }
    }

    /// Creates a new abort error.
    pub fn abort(message: impl Into<String>) -> Self {
        Error::Abort {
            message: message.into(),
        }
    }

    /// Returns true if this error came from the network or an HTTP status.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Api { .. }
                | Error::Authentication { .. }
                | Error::NotFound { .. }
                | Error::Timeout { .. }
                | Error::Connection { .. }
                | Error::HttpClient { .. }
                | Error::Streaming { .. }
        )
    }

    /// Returns true if this error came from malformed server output.
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. } | Error::Encoding { .. })
    }

    /// Returns true if this error is an abort.
    pub fn is_abort(&self) -> bool {
        matches!(self, Error::Abort { .. })
    }

    /// Returns true if this error is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }

    /// Returns the status code associated with this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api { status_code, .. } => Some(*status_code),
            Error::Authentication { .. } => Some(401),
            Error::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Api {
                status_code,
                message,
            } => {
                write!(f, "API error (status {status_code}): {message}")
            }
            Error::Authentication { message } => {
                write!(f, "Authentication error: {message}")
            }
            Error::NotFound { message } => {
                write!(f, "Resource not found: {message}")
            }
            Error::Timeout { message, duration } => {
                if let Some(duration) = duration {
                    write!(f, "Timeout error: {message} ({duration} seconds)")
                } else {
                    write!(f, "Timeout error: {message}")
                }
            }
            Error::Connection { message, .. } => {
                write!(f, "Connection error: {message}")
            }
            Error::HttpClient { message, .. } => {
                write!(f, "HTTP client error: {message}")
            }
            Error::Streaming { message, .. } => {
                write!(f, "Streaming error: {message}")
            }
            Error::Encoding { message, .. } => {
                write!(f, "Encoding error: {message}")
            }
            Error::Decode { message, fragment } => {
                if let Some(fragment) = fragment {
                    write!(f, "Decode error: {message} (in: {fragment})")
                } else {
                    write!(f, "Decode error: {message}")
                }
            }
            Error::Io { message, .. } => {
                write!(f, "I/O error: {message}")
            }
            Error::Url { message, .. } => {
                write!(f, "URL error: {message}")
            }
            Error::Abort { message } => {
                write!(f, "Input aborted: {message}")
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Connection { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::HttpClient { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Streaming { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Encoding { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Io { source, .. } => Some(source),
            Error::Url { source, .. } => {
                source.as_ref().map(|e| e as &(dyn error::Error + 'static))
            }
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::io(err.to_string(), err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::decode(format!("JSON error: {err}"), None)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::url(format!("URL parse error: {err}"), Some(err))
    }
}

/// A specialized Result type for rasaline operations.
pub type Result<T> = std::result::Result<T, Error>;
