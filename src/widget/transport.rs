use std::fmt;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::api::public::chat::{ChatRequest, ChatResponse};
use crate::intent::Reply;

/// Why a message never produced a reply. The widget shows the same
/// apology for all of them.
#[derive(Debug)]
pub enum TransportError {
    /// The server could not be reached or the connection dropped
    Network(String),
    /// The server answered with something other than 200
    Status(u16),
    /// The body was not a chat response
    Decode(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TransportError::Network(e) => write!(f, "Network error: {}", e),
            TransportError::Status(code) => write!(f, "Unexpected status: {}", code),
            TransportError::Decode(e) => write!(f, "Invalid response body: {}", e),
        }
    }
}

impl std::error::Error for TransportError {}

/// Delivers one utterance to the assistant and waits for its reply.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn send(&self, message: &str) -> Result<Reply, TransportError>;
}

/// Talks to `POST /api/chat` over HTTP.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(api_base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api/chat", api_base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, message: &str) -> Result<Reply, TransportError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&ChatRequest::new(message))
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        // Failure bodies carry a message too but the widget doesn't
        // show it
        if resp.status() != StatusCode::OK {
            return Err(TransportError::Status(resp.status().as_u16()));
        }

        let body: ChatResponse = resp
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        Ok(body.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductSummary;

    #[tokio::test]
    async fn it_sends_the_message_and_reads_text() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::Json(
                serde_json::json!({"message": "Hello"}),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"response": "Hello! How can I assist you today?"}"#)
            .create();

        let transport = HttpTransport::new(&server.url());
        let reply = transport.send("Hello").await.unwrap();
        assert_eq!(reply, Reply::text("Hello! How can I assist you today?"));
    }

    #[tokio::test]
    async fn it_reads_product_lists() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"response": [{"name": "Mug", "price": 12.5, "description": "Stoneware"}]}"#,
            )
            .create();

        let transport = HttpTransport::new(&format!("{}/", server.url()));
        let reply = transport.send("recommend").await.unwrap();
        assert_eq!(
            reply,
            Reply::ProductList(vec![ProductSummary::new("Mug", 12.5, "Stoneware")])
        );
    }

    #[tokio::test]
    async fn it_fails_on_non_200() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"response": "There was an error processing your request."}"#)
            .create();

        let transport = HttpTransport::new(&server.url());
        let err = transport.send("recommend").await.unwrap_err();
        assert!(matches!(err, TransportError::Status(500)));
    }

    #[tokio::test]
    async fn it_fails_on_unexpected_bodies() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body("not json")
            .create();

        let transport = HttpTransport::new(&server.url());
        let err = transport.send("hello").await.unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[tokio::test]
    async fn it_fails_when_the_server_is_unreachable() {
        // Grab a free port and close it again so nothing is listening
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = HttpTransport::new(&format!("http://{}", addr));
        let err = transport.send("hello").await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }
}
