use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::config::InferenceConfig;

/// Upper bound on completion length; the reply is one short sentence.
const COMPLETION_TOKEN_LIMIT: u32 = 50;
const SAMPLING_TEMPERATURE: f32 = 0.7;

/// Failure talking to the completion backend.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("inference backend unreachable: {0}")]
    Network(String),
    #[error("inference backend returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },
    #[error("inference backend reply could not be decoded: {0}")]
    MalformedReply(String),
}

/// Seam between the risk service and the generative completion backend.
///
/// The service treats the backend as a text-in/text-out oracle, so tests
/// swap in scripted implementations and the output grammar is validated
/// without a live upstream.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Run one two-message exchange and return the trimmed completion text.
    ///
    /// An empty completion is `Ok("")`, not an error; the grammar check
    /// downstream decides what to do with it.
    async fn complete(&self, system: &str, user: &str) -> Result<String, InferenceError>;
}

/// Chat-completions client for an OpenAI-compatible endpoint.
pub struct OpenAiBackend {
    config: InferenceConfig,
    client: Client,
}

impl OpenAiBackend {
    pub fn new(config: InferenceConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn chat_request(&self, system: &str, user: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user.to_string(),
                },
            ],
            max_tokens: COMPLETION_TOKEN_LIMIT,
            temperature: SAMPLING_TEMPERATURE,
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(&self, system: &str, user: &str) -> Result<String, InferenceError> {
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&self.chat_request(system, user))
            .send()
            .await
            .map_err(|err| InferenceError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| InferenceError::MalformedReply(err.to_string()))?;

        let text = reply
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .unwrap_or_default()
            .trim()
            .to_string();

        Ok(text)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::post;
    use axum::{Json, Router};
    use secrecy::Secret;
    use serde_json::{json, Value};

    fn test_config(base_url: String) -> InferenceConfig {
        InferenceConfig {
            api_key: Secret::new("sk-test".to_string()),
            model: "gpt-3.5-turbo".to_string(),
            base_url,
        }
    }

    #[test]
    fn chat_request_carries_fixed_parameters() {
        let backend = OpenAiBackend::new(test_config("http://unused".to_string()));
        let request = backend.chat_request("directive", "prompt");

        assert_eq!(request.max_tokens, 50);
        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[0].content, "directive");
        assert_eq!(request.messages[1].role, "user");
        assert_eq!(request.messages[1].content, "prompt");
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve");
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn complete_returns_trimmed_top_choice() {
        let router = Router::new().route(
            "/chat/completions",
            post(|Json(_): Json<Value>| async {
                Json(json!({
                    "choices": [{"message": {"content": "  hello there  "}}]
                }))
            }),
        );
        let base_url = serve(router).await;

        let backend = OpenAiBackend::new(test_config(base_url));
        let text = backend.complete("sys", "user").await.expect("completes");
        assert_eq!(text, "hello there");
    }

    #[tokio::test]
    async fn complete_treats_missing_content_as_empty() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async { Json(json!({"choices": []})) }),
        );
        let base_url = serve(router).await;

        let backend = OpenAiBackend::new(test_config(base_url));
        let text = backend.complete("sys", "user").await.expect("completes");
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn complete_surfaces_upstream_status() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async {
                (
                    axum::http::StatusCode::TOO_MANY_REQUESTS,
                    "rate limit reached",
                )
            }),
        );
        let base_url = serve(router).await;

        let backend = OpenAiBackend::new(test_config(base_url));
        match backend.complete("sys", "user").await {
            Err(InferenceError::UpstreamStatus { status, body }) => {
                assert_eq!(status, 429);
                assert!(body.contains("rate limit"));
            }
            other => panic!("expected upstream status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn complete_reports_unreachable_backend() {
        // Port 9 on localhost is unassigned; the connection is refused.
        let backend = OpenAiBackend::new(test_config("http://127.0.0.1:9".to_string()));
        assert!(matches!(
            backend.complete("sys", "user").await,
            Err(InferenceError::Network(_))
        ));
    }
}
