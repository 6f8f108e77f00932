use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use super::charts::FEATURED_CHARTS;
use super::inference::CompletionBackend;
use super::profile::RiskComparisonRequest;
use super::service::RiskEstimationService;

/// Router builder exposing the comparison endpoint and the chart catalog.
pub fn risk_router<B>(service: Arc<RiskEstimationService<B>>) -> Router
where
    B: CompletionBackend + 'static,
{
    Router::new()
        .route(
            "/api/preventionRisk",
            post(estimate_handler::<B>).fallback(method_not_allowed),
        )
        .route("/api/charts", get(charts_handler))
        .with_state(service)
}

/// Runs one comparison: boundary validation, estimate, status mapping.
///
/// The body is inspected as loose JSON first so a missing profile key or a
/// malformed payload comes back as this API's own `{error}` shape rather
/// than the framework's plain-text rejection.
pub(crate) async fn estimate_handler<B>(
    State(service): State<Arc<RiskEstimationService<B>>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response
where
    B: CompletionBackend + 'static,
{
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    if body.get("currentLifestyle").is_none() || body.get("plannedLifestyle").is_none() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing currentLifestyle or plannedLifestyle in request.".to_string(),
        );
    }

    let request: RiskComparisonRequest = match serde_json::from_value(body) {
        Ok(request) => request,
        Err(err) => return error_response(StatusCode::BAD_REQUEST, err.to_string()),
    };

    if let Err(err) = request.validate() {
        return error_response(StatusCode::BAD_REQUEST, err.to_string());
    }

    match service.estimate(&request).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

pub(crate) async fn charts_handler() -> Response {
    (StatusCode::OK, Json(FEATURED_CHARTS)).into_response()
}

pub(crate) async fn method_not_allowed(method: Method) -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        format!("Method {method} not allowed."),
    )
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
