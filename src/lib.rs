pub mod call;
pub mod config;
pub mod error;
pub mod executor;
pub mod proxy;

use std::result::Result as StdResult;
use std::sync::Arc;

use anyhow::{bail, Result};
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use bridge_types::human::{from_display, to_display};
use bridge_types::{DecodeError, HttpRequest, LangError, MessageResult};
use tower_http::trace::TraceLayer;

pub use crate::config::Config;

use crate::call::{CallOptions, CallOrigin};
use crate::error::AppError;
use crate::executor::{Executor, HyperExecutor};
use crate::proxy::{dispatch, request};

/// Header carrying the caller identity set by whoever dispatches contract calls to us.
pub const CALL_ORIGIN_HEADER: &str = "x-call-origin";

pub fn app(config: &Config) -> Result<Router> {
    if config.http.timeout_ms == 0 {
        bail!("http.timeout_ms must be greater than zero");
    }

    let executor = HyperExecutor::new(&config.http);
    Ok(router(executor))
}

pub fn router<E: Executor + 'static>(executor: E) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/request", post(binary_handler::<E>))
        .route("/request/display", post(display_handler::<E>))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(executor))
}

async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// SCALE encoded `HttpRequest` in, SCALE encoded `MessageResult<HttpResponse>` out.
///
/// The HTTP status is 200 whatever the call outcome, which lives in the body.
#[tracing::instrument(level = "trace", "binary", skip_all)]
async fn binary_handler<E: Executor + 'static>(
    State(executor): State<Arc<E>>,
    Query(options): Query<CallOptions>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let origin = call_origin(&headers);
    let output = dispatch(&*executor, &origin, &options, &body).await;

    ([(header::CONTENT_TYPE, "application/octet-stream")], output)
}

#[tracing::instrument(level = "trace", "display", skip_all)]
async fn display_handler<E: Executor + 'static>(
    State(executor): State<Arc<E>>,
    Query(options): Query<CallOptions>,
    headers: HeaderMap,
    body: Bytes,
) -> StdResult<impl IntoResponse, AppError> {
    let origin = call_origin(&headers);

    let input = serde_json::from_slice::<serde_json::Value>(&body)
        .map_err(DecodeError::from)
        .and_then(from_display::<HttpRequest>);
    let result: MessageResult<_> = match input {
        Ok(req) => request(&*executor, &origin, &options, req).await,
        Err(error) => {
            tracing::debug!("Rejecting display input from {}: {}", origin, error);
            Err(LangError::CouldNotReadInput)
        }
    };

    Ok(Json(to_display(&result)?))
}

fn call_origin(headers: &HeaderMap) -> CallOrigin {
    headers
        .get(CALL_ORIGIN_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(CallOrigin::new)
        .unwrap_or_default()
}
