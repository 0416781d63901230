//! HTTP surface: routing, state, error mapping and the OpenAPI document.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{error, info};
use utoipa::{OpenApi, ToSchema};

use crate::classifier::Classifier;
use crate::detect::{Detection, LanguageDetectionResponse, TextInput, detect_language};

/// Machine-readable description of the API, served at `/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "To language or not to language, that is the question",
        version = "1.0.0",
        description = "Predicts which language has been inputted and outputs language and confidence score in json format."
    ),
    paths(detect),
    components(schemas(TextInput, LanguageDetectionResponse, ErrorBody)),
    tags((name = "Language Operations", description = "Language detection"))
)]
pub struct ApiDoc;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    classifier: Arc<dyn Classifier>,
}

impl AppState {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }
}

/// Errors that leave the service as a non-200 response with a `detail` body.
#[derive(Debug)]
pub enum ApiError {
    /// The request body did not match `{"text": string}`.
    InvalidBody(String),
    /// The classifier failed; surfaced verbatim.
    Internal(anyhow::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

#[derive(Serialize, ToSchema)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::InvalidBody(detail) => (StatusCode::UNPROCESSABLE_ENTITY, detail),
            Self::Internal(err) => {
                let detail = format!("{:#}", err);
                error!("classifier failed: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, detail)
            }
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}

#[derive(Serialize)]
struct Health<'a> {
    ok: bool,
    classifier: &'a str,
}

/// Build the HTTP router for the service.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/detectLanguage", post(detect))
        .route("/healthz", get(health))
        .route("/openapi.json", get(openapi))
        .with_state(state)
}

/// Detects and returns the language of the input text.
#[utoipa::path(
    post,
    path = "/detectLanguage",
    tag = "Language Operations",
    request_body = TextInput,
    responses(
        (status = 200, description = "Detection result or length rejection", body = LanguageDetectionResponse),
        (status = 422, description = "Body is not `{\"text\": string}`", body = ErrorBody),
        (status = 500, description = "Classifier failed", body = ErrorBody)
    )
)]
async fn detect(
    State(state): State<AppState>,
    payload: Result<Json<TextInput>, JsonRejection>,
) -> Result<Json<Detection>, ApiError> {
    let Json(input) = payload?;
    let detection = detect_language(state.classifier(), &input.text)
        .await
        .map_err(ApiError::Internal)?;
    Ok(Json(detection))
}

async fn health(State(state): State<AppState>) -> Response {
    Json(Health {
        ok: true,
        classifier: state.classifier().name(),
    })
    .into_response()
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Serve on an already bound listener until Ctrl+C or SIGTERM.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let addr = listener.local_addr().context("listener has no local address")?;
    info!("listening on http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_error_maps_to_500() {
        let response = ApiError::Internal(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn internal_error_detail_keeps_cause() {
        let err = anyhow::anyhow!("connection reset").context("failed to read classifier response");
        let response = ApiError::Internal(err).into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body["detail"],
            "failed to read classifier response: connection reset"
        );
    }

    #[tokio::test]
    async fn internal_error_detail_is_plain_message_without_cause() {
        let response = ApiError::Internal(anyhow::anyhow!("model unavailable")).into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["detail"], "model unavailable");
    }

    #[test]
    fn openapi_document_describes_detect_endpoint() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        assert_eq!(doc["info"]["version"], "1.0.0");
        assert_eq!(doc["paths"]["/detectLanguage"]["post"]["tags"][0], "Language Operations");
        assert!(doc["components"]["schemas"]["TextInput"].is_object());
    }

    #[test]
    fn invalid_body_maps_to_422() {
        let response = ApiError::InvalidBody("missing field `text`".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
