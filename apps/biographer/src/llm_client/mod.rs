/// LLM Client — the single point of entry for text-completion API calls.
///
/// No other module talks to the completion API directly; the biography
/// strategies only see the `CompletionService` trait.
///
/// Model: gpt-3.5-turbo (hardcoded — biographies are tuned against it)
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// The model used for every completion call.
pub const MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("authentication rejected: {0}")]
    Unauthenticated(String),

    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// One completion call: a system instruction, a user prompt and sampling bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// External text-completion collaborator. Implemented by `OpenAiClient`;
/// tests substitute their own.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Returns the generated text of a single completion. One attempt only.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Text of the first choice, if the API returned any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Chat-completions client. Constructed once at startup and handed to the
/// remote biography strategy.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    api_url: String,
    timeout: Duration,
}

impl OpenAiClient {
    pub fn new(
        api_key: String,
        api_url: String,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            api_url,
            timeout,
        })
    }
}

#[async_trait]
impl CompletionService for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            warn!("Completion API returned {}", status);
            return Err(classify_failure(status, &body));
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        if let Some(usage) = &parsed.usage {
            debug!(
                "Completion succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        let text = parsed.text().map(str::trim).unwrap_or_default();
        if text.is_empty() {
            return Err(CompletionError::MalformedResponse(
                "response carried no text content".to_string(),
            ));
        }

        Ok(text.to_string())
    }
}

impl OpenAiClient {
    fn transport_error(&self, e: reqwest::Error) -> CompletionError {
        if e.is_timeout() {
            CompletionError::Timeout(self.timeout)
        } else {
            CompletionError::Http(e)
        }
    }
}

/// Maps a non-success status and its body to a typed failure.
fn classify_failure(status: StatusCode, body: &str) -> CompletionError {
    let message = serde_json::from_str::<ApiError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string());

    match status.as_u16() {
        401 | 403 => CompletionError::Unauthenticated(message),
        429 => CompletionError::QuotaExceeded(message),
        _ => CompletionError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    use super::*;

    fn biography_request() -> CompletionRequest {
        CompletionRequest {
            system: "Eres un experto en biografías de adopción.".to_string(),
            prompt: "Luna;Labrador;3;Diabetes;Sin niños pequeños".to_string(),
            max_tokens: 100,
            temperature: 0.7,
        }
    }

    fn client_for(url: &str, timeout: Duration) -> OpenAiClient {
        OpenAiClient::new("sk-test".to_string(), url.to_string(), timeout).unwrap()
    }

    /// Reads one HTTP/1.1 request: headers, then `Content-Length` bytes of body.
    async fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                let body_len = headers
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + body_len {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Serves a single canned response and hands back the raw request it received.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/v1/chat/completions", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
            request
        });
        (url, handle)
    }

    #[tokio::test]
    async fn test_complete_sends_bearer_and_returns_trimmed_text() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"choices":[{"message":{"role":"assistant","content":"  Luna busca hogar.  "}}],"usage":{"prompt_tokens":80,"completion_tokens":6}}"#,
        )
        .await;

        let text = client_for(&url, Duration::from_secs(5))
            .complete(&biography_request())
            .await
            .unwrap();

        assert_eq!(text, "Luna busca hogar.");
        let sent = server.await.unwrap().to_lowercase();
        assert!(sent.starts_with("post /v1/chat/completions"), "{sent}");
        assert!(sent.contains("authorization: bearer sk-test"), "{sent}");
        assert!(sent.contains(r#""max_tokens":100"#), "{sent}");
        assert!(sent.contains(r#""model":"gpt-3.5-turbo""#), "{sent}");
    }

    #[tokio::test]
    async fn test_complete_without_choices_is_malformed() {
        let (url, _server) = serve_once("200 OK", r#"{"choices":[]}"#).await;
        let err = client_for(&url, Duration::from_secs(5))
            .complete(&biography_request())
            .await
            .unwrap_err();
        match err {
            CompletionError::MalformedResponse(msg) => {
                assert_eq!(msg, "response carried no text content")
            }
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_with_non_json_body_is_malformed() {
        let (url, _server) = serve_once("200 OK", "<html>gateway</html>").await;
        let err = client_for(&url, Duration::from_secs(5))
            .complete(&biography_request())
            .await
            .unwrap_err();
        assert!(matches!(err, CompletionError::MalformedResponse(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_complete_routes_error_status_through_classification() {
        let (url, _server) = serve_once(
            "429 Too Many Requests",
            r#"{"error":{"message":"You exceeded your current quota"}}"#,
        )
        .await;
        let err = client_for(&url, Duration::from_secs(5))
            .complete(&biography_request())
            .await
            .unwrap_err();
        match err {
            CompletionError::QuotaExceeded(msg) => {
                assert_eq!(msg, "You exceeded your current quota")
            }
            other => panic!("expected QuotaExceeded, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_times_out_against_silent_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/v1/chat/completions", listener.local_addr().unwrap());
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            read_request(&mut stream).await;
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(stream);
        });

        let timeout = Duration::from_millis(300);
        let err = client_for(&url, timeout)
            .complete(&biography_request())
            .await
            .unwrap_err();

        match err {
            CompletionError::Timeout(after) => assert_eq!(after, timeout),
            other => panic!("expected Timeout, got {other:?}"),
        }
    }

    #[test]
    fn test_unauthorized_maps_to_unauthenticated_with_api_message() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        match classify_failure(StatusCode::UNAUTHORIZED, body) {
            CompletionError::Unauthenticated(msg) => {
                assert_eq!(msg, "Incorrect API key provided")
            }
            other => panic!("expected Unauthenticated, got {other:?}"),
        }
    }

    #[test]
    fn test_too_many_requests_maps_to_quota_exceeded() {
        let body = r#"{"error": {"message": "You exceeded your current quota"}}"#;
        assert!(matches!(
            classify_failure(StatusCode::TOO_MANY_REQUESTS, body),
            CompletionError::QuotaExceeded(_)
        ));
    }

    #[test]
    fn test_unparseable_error_body_is_kept_verbatim() {
        match classify_failure(StatusCode::BAD_GATEWAY, "upstream down") {
            CompletionError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream down");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn test_chat_response_text_reads_first_choice() {
        let body = r#"{
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "  Luna busca hogar.  "}}],
            "usage": {"prompt_tokens": 120, "completion_tokens": 12, "total_tokens": 132}
        }"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.text(), Some("  Luna busca hogar.  "));
        assert_eq!(parsed.usage.unwrap().completion_tokens, 12);
    }

    #[test]
    fn test_chat_response_without_choices_has_no_text() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(parsed.text().is_none());
    }

    #[test]
    fn test_chat_request_serializes_sampling_bounds() {
        let body = ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: "hola",
            }],
            max_tokens: 100,
            temperature: 0.7,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["max_tokens"], 100);
        assert_eq!(json["messages"][0]["role"], "user");
    }
}
