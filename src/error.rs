use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Failure of the dispatcher itself. Outcomes of the proxied call, including protocol
/// errors, are encoded into the response body instead and never end up here.
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Dispatcher failure: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "dispatcher failure").into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
