use std::pin::Pin;
use std::time::Duration;

use futures::Stream;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::ndjson::process_ndjson;
use crate::observability;
use crate::types::{BotMessage, ResponsePayload};

/// Default server URL for a locally running bot.
const DEFAULT_SERVER_URL: &str = "http://localhost:5005";

/// Path of the REST webhook on the server.
const WEBHOOK_PATH: &str = "/webhooks/rest/webhook";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// A boxed, finite stream of payloads from one streaming send.
pub type PayloadStream = Pin<Box<dyn Stream<Item = Result<ResponsePayload>> + Send>>;

/// The two response-delivery modes of the REST webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseMode {
    /// The whole response arrives as one JSON array.
    Blocking,

    /// Responses arrive incrementally as newline-delimited JSON objects.
    #[default]
    Streaming,
}

/// How a transport delivers bot responses for one utterance.
///
/// Abstracts the HTTP client so the conversation loop can be driven by a
/// mock in tests. No implementation retries; a failed send surfaces to the
/// caller as-is.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Sends one utterance and returns all payloads once the response
    /// completes, in array order.
    async fn send_blocking(&self, sender_id: &str, message: &str) -> Result<Vec<ResponsePayload>>;

    /// Sends one utterance and returns a lazy stream of payloads, in line
    /// order. The stream is finite and not restartable.
    async fn send_stream(&self, sender_id: &str, message: &str) -> Result<PayloadStream>;
}

#[derive(Serialize)]
struct SendRequest<'a> {
    sender: &'a str,
    message: &'a str,
}

/// Client for a Rasa-compatible REST webhook.
#[derive(Debug, Clone)]
pub struct Rasa {
    token: String,
    client: ReqwestClient,
    base_url: String,
    timeout: Duration,
}

impl Rasa {
    /// Create a new client for the given server, unauthenticated.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_options(Some(base_url.into()), None, None)
    }

    /// Create a new client with custom settings.
    ///
    /// `base_url` defaults to `http://localhost:5005`, `token` to the empty
    /// string (unauthenticated), and the request timeout to 60 seconds.
    pub fn with_options(
        base_url: Option<String>,
        token: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            token: token.unwrap_or_default(),
            client,
            base_url: base_url.unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            timeout,
        })
    }

    /// The webhook endpoint this client posts to.
    fn webhook_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), WEBHOOK_PATH)
    }

    /// Create and return default headers for webhook requests.
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers
    }

    /// Map a reqwest send failure to our error type.
    fn map_send_error(&self, e: reqwest::Error) -> Error {
        observability::CLIENT_REQUEST_ERRORS.click();
        if e.is_timeout() {
            Error::timeout(
                format!("Request timed out: {}", e),
                Some(self.timeout.as_secs_f64()),
            )
        } else if e.is_connect() {
            Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
        } else {
            Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
        }
    }

    /// Process a non-2xx response and convert it to our error type.
    async fn process_error_response(response: Response) -> Error {
        observability::CLIENT_REQUEST_ERRORS.click();
        let status_code = response.status().as_u16();

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        match status_code {
            401 => Error::authentication(body),
            404 => Error::not_found(body),
            _ => Error::api(status_code, body),
        }
    }

    /// Send one utterance and collect the complete response.
    ///
    /// The whole body is parsed as a JSON array of message objects; each
    /// element contributes its payloads in order. A malformed element fails
    /// the call with a decode error naming the element index.
    pub async fn send_blocking(
        &self,
        sender_id: &str,
        message: &str,
    ) -> Result<Vec<ResponsePayload>> {
        observability::CLIENT_REQUESTS.click();
        let response = self
            .client
            .post(self.webhook_url())
            .query(&[("token", self.token.as_str())])
            .headers(self.default_headers())
            .json(&SendRequest {
                sender: sender_id,
                message,
            })
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        let body = response.text().await.map_err(|e| {
            Error::http_client(format!("Failed to read response: {}", e), Some(Box::new(e)))
        })?;

        let elements: Vec<Value> = serde_json::from_str(&body).map_err(|e| {
            Error::decode(
                format!("Failed to parse response array: {e}"),
                Some(body.clone()),
            )
        })?;

        let mut payloads = Vec::new();
        for (idx, element) in elements.into_iter().enumerate() {
            let fragment = element.to_string();
            let message: BotMessage = serde_json::from_value(element).map_err(|e| {
                Error::decode(
                    format!("Failed to parse message at index {idx}: {e}"),
                    Some(fragment),
                )
            })?;
            payloads.extend(message.into_payloads());
        }
        Ok(payloads)
    }

    /// Send one utterance and consume the response incrementally.
    ///
    /// Returns a stream that yields each payload as soon as its line arrives.
    /// The request carries `stream=true` so the server delivers newline-
    /// delimited JSON objects instead of one array.
    pub async fn send_stream(
        &self,
        sender_id: &str,
        message: &str,
    ) -> Result<impl Stream<Item = Result<ResponsePayload>> + use<>> {
        observability::CLIENT_REQUESTS.click();
        let response = self
            .client
            .post(self.webhook_url())
            .query(&[("stream", "true"), ("token", self.token.as_str())])
            .headers(self.default_headers())
            .json(&SendRequest {
                sender: sender_id,
                message,
            })
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        Ok(process_ndjson(response.bytes_stream()))
    }
}

#[async_trait::async_trait]
impl Transport for Rasa {
    async fn send_blocking(&self, sender_id: &str, message: &str) -> Result<Vec<ResponsePayload>> {
        Rasa::send_blocking(self, sender_id, message).await
    }

    async fn send_stream(&self, sender_id: &str, message: &str) -> Result<PayloadStream> {
        let stream = Rasa::send_stream(self, sender_id, message).await?;
        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation_defaults() {
        let client = Rasa::with_options(None, None, None).unwrap();
        assert_eq!(client.base_url, DEFAULT_SERVER_URL);
        assert_eq!(client.token, "");
        assert_eq!(client.timeout, DEFAULT_TIMEOUT);

        let client = Rasa::with_options(
            Some("http://bot.example.com:5005".to_string()),
            Some("secret".to_string()),
            Some(Duration::from_secs(5)),
        )
        .unwrap();
        assert_eq!(client.base_url, "http://bot.example.com:5005");
        assert_eq!(client.token, "secret");
        assert_eq!(client.timeout, Duration::from_secs(5));
    }

    #[test]
    fn webhook_url_joins_cleanly() {
        let client = Rasa::new("http://localhost:5005").unwrap();
        assert_eq!(
            client.webhook_url(),
            "http://localhost:5005/webhooks/rest/webhook"
        );

        let client = Rasa::new("http://localhost:5005/").unwrap();
        assert_eq!(
            client.webhook_url(),
            "http://localhost:5005/webhooks/rest/webhook"
        );
    }

    #[test]
    fn send_request_wire_shape() {
        let body = serde_json::to_value(SendRequest {
            sender: "default",
            message: "hello",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"sender": "default", "message": "hello"})
        );
    }
}
