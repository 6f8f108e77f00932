use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::Client;
use serde::Deserialize;

use super::profile::{RiskComparisonRequest, RiskComparisonResult};

/// Submission failure surfaced to the form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// A prior submission has not settled yet.
    #[error("a submission is already in flight")]
    Busy,
    /// The server answered non-2xx; the message is its `error` string.
    #[error("{0}")]
    Api(String),
    /// The request never produced a usable response.
    #[error("Network error. Please try again.")]
    Network,
}

const FALLBACK_API_MESSAGE: &str = "Error fetching risk comparison.";

/// HTTP client for the comparison endpoint.
///
/// One request may be in flight at a time; the busy flag is set when a
/// submission starts and cleared only once that call settles, whatever the
/// outcome. There is no cancellation and no retry.
pub struct RiskRequestClient {
    endpoint: String,
    http: Client,
    busy: AtomicBool,
}

impl RiskRequestClient {
    /// `endpoint` is the full URL of the comparison route.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: Client::new(),
            busy: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub async fn submit(
        &self,
        request: &RiskComparisonRequest,
    ) -> Result<RiskComparisonResult, ClientError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ClientError::Busy);
        }
        let _settled = BusyGuard(&self.busy);

        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|_| ClientError::Network)?;

        if !response.status().is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| FALLBACK_API_MESSAGE.to_string());
            return Err(ClientError::Api(message));
        }

        response
            .json::<RiskComparisonResult>()
            .await
            .map_err(|_| ClientError::Network)
    }
}

/// Clears the busy flag when the submission settles by any path.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::profile::tests::sample_request;
    use crate::risk::profile::Direction;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve");
        });
        format!("http://{addr}/api/preventionRisk")
    }

    #[tokio::test]
    async fn submit_returns_the_parsed_result() {
        let endpoint = serve(Router::new().route(
            "/api/preventionRisk",
            post(|| async { Json(json!({"multiplier": "2.1", "direction": "less"})) }),
        ))
        .await;

        let client = RiskRequestClient::new(endpoint);
        let result = client.submit(&sample_request()).await.expect("success");
        assert_eq!(result.multiplier, "2.1");
        assert_eq!(result.direction, Direction::Less);
        assert!(!client.is_busy());
    }

    #[tokio::test]
    async fn second_submission_is_rejected_while_first_is_pending() {
        let endpoint = serve(Router::new().route(
            "/api/preventionRisk",
            post(|| async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Json(json!({"multiplier": "1.3", "direction": "more"}))
            }),
        ))
        .await;

        let client = Arc::new(RiskRequestClient::new(endpoint));
        let slow = {
            let client = client.clone();
            tokio::spawn(async move { client.submit(&sample_request()).await })
        };

        // Let the first submission reach the wire before racing it.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(
            client.submit(&sample_request()).await,
            Err(ClientError::Busy)
        );

        let first = slow.await.expect("task joins").expect("first succeeds");
        assert_eq!(first.multiplier, "1.3");

        // The gate opens again once the first call settles.
        assert!(!client.is_busy());
        assert!(client.submit(&sample_request()).await.is_ok());
    }

    #[tokio::test]
    async fn non_success_status_surfaces_the_error_string() {
        let endpoint = serve(Router::new().route(
            "/api/preventionRisk",
            post(|| async {
                (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "backend returned an unexpected format"})),
                )
            }),
        ))
        .await;

        let client = RiskRequestClient::new(endpoint);
        match client.submit(&sample_request()).await {
            Err(ClientError::Api(message)) => {
                assert!(message.contains("unexpected format"));
            }
            other => panic!("expected api error, got {other:?}"),
        }
        assert!(!client.is_busy());
    }

    #[tokio::test]
    async fn error_body_without_message_falls_back_to_generic_text() {
        let endpoint = serve(Router::new().route(
            "/api/preventionRisk",
            post(|| async { (axum::http::StatusCode::BAD_GATEWAY, "not json") }),
        ))
        .await;

        let client = RiskRequestClient::new(endpoint);
        assert_eq!(
            client.submit(&sample_request()).await,
            Err(ClientError::Api(FALLBACK_API_MESSAGE.to_string()))
        );
    }

    #[tokio::test]
    async fn transport_failure_maps_to_network_error() {
        let client = RiskRequestClient::new("http://127.0.0.1:9/api/preventionRisk");
        assert_eq!(
            client.submit(&sample_request()).await,
            Err(ClientError::Network)
        );
        assert!(!client.is_busy());
    }
}
