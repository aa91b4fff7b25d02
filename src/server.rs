//! HTTP boundary of the service.
//!
//! Every outcome of the generation endpoint, including panics, leaves through
//! the uniform `{ prompt }` / `{ error, detail? }` contract.

use crate::app::App;
use crate::credentials::{KeyOverrides, Provider};
use crate::error::ErrorKind;
use crate::models::{Config, ErrorResponse, GenerateResponse, GenerationRequest};
use crate::{Error, Result};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::any::Any;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Instrument};
use uuid::Uuid;

pub const GENERATE_PATH: &str = "/api/generate";

/// Build the router with all middleware attached.
pub fn router(app: Arc<App>, max_body_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(AnyOrigin);

    Router::new()
        .route(GENERATE_PATH, post(generate))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app)
}

/// Serve until the listener fails.
pub async fn serve(listener: TcpListener, app: Arc<App>, config: &Config) -> Result<()> {
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(app, config.max_body_bytes)).await?;
    Ok(())
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn generate(
    State(app): State<Arc<App>>,
    headers: HeaderMap,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Response {
    let span = tracing::info_span!("generate", request_id = %Uuid::new_v4());

    async move {
        match handle_generate(&app, &headers, body).await {
            Ok(prompt) => Json(GenerateResponse { prompt }).into_response(),
            Err(e) => e.into_response(),
        }
    }
    .instrument(span)
    .await
}

async fn handle_generate(
    app: &App,
    headers: &HeaderMap,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<String> {
    let body = body.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;
    let request = GenerationRequest::from_json(&body)?;

    let keys = KeyOverrides {
        completion: header_value(headers, Provider::Completion.override_header()),
        search: header_value(headers, Provider::Search.override_header()),
    };
    let origin = header_value(headers, header::ORIGIN.as_str());

    app.generate(&request, &keys, origin.as_deref()).await
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = StatusCode::from_u16(kind.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if kind == ErrorKind::InvalidRequest {
            tracing::warn!("Rejected request: {}", self);
        } else {
            tracing::error!("Generation failed ({:?}): {}", kind, self);
        }

        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    Error::Unexpected(detail).into_response()
}
