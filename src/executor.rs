use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use bridge_types::{HttpRequest, HttpResponse, LangError};
use hyper::body::HttpBody;
use hyper::client::HttpConnector;
use hyper::ext::ReasonPhrase;
use hyper::header::{HeaderMap, HeaderName, HeaderValue};
use hyper::{Body, Method, Request, Response, Uri};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use tokio::time::timeout;

use crate::config;

pub(crate) type Client = hyper::client::Client<HttpsConnector<HttpConnector>, Body>;

/// Reasons an executor could not produce an HTTP exchange at all.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("request cannot be sent: {0}")]
    InvalidRequest(String),
    #[error("no response within {0:?}")]
    Timeout(Duration),
    #[error("origin unreachable: {0}")]
    Unreachable(#[source] hyper::Error),
    #[error("response unreadable: {0}")]
    ResponseUnreadable(String),
}

impl From<ExecutionError> for LangError {
    fn from(err: ExecutionError) -> Self {
        match err {
            ExecutionError::InvalidRequest(_) => LangError::InvalidRequest,
            ExecutionError::Timeout(_) => LangError::Timeout,
            ExecutionError::Unreachable(_) => LangError::Unreachable,
            ExecutionError::ResponseUnreadable(_) => LangError::ResponseUnreadable,
        }
    }
}

/// Performs the HTTP call described by a request.
///
/// A response with any status, 5xx included, is a successful execution. Implementations
/// must resolve every call, so a hanging origin has to end in [`ExecutionError::Timeout`].
pub trait Executor: Send + Sync {
    fn execute(
        &self,
        request: &HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, ExecutionError>> + Send;
}

impl<E: Executor> Executor for Arc<E> {
    fn execute(
        &self,
        request: &HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, ExecutionError>> + Send {
        (**self).execute(request)
    }
}

#[derive(Clone)]
pub struct HyperExecutor {
    client: Client,
    timeout: Duration,
    max_response_bytes: usize,
}

impl HyperExecutor {
    pub fn new(config: &config::Http) -> Self {
        let connector = HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build();

        Self {
            client: hyper::Client::builder().build(connector),
            timeout: Duration::from_millis(config.timeout_ms),
            max_response_bytes: config.max_response_bytes,
        }
    }

    async fn exchange(&self, request: Request<Body>) -> Result<HttpResponse, ExecutionError> {
        let response = self
            .client
            .request(request)
            .await
            .map_err(ExecutionError::Unreachable)?;

        transform_response(response, self.max_response_bytes).await
    }
}

impl Executor for HyperExecutor {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ExecutionError> {
        let outbound = build_request(request)?;

        // the deadline covers reading the body too
        match timeout(self.timeout, self.exchange(outbound)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::debug!("Timeout for {} {}", request.method, request.url);
                Err(ExecutionError::Timeout(self.timeout))
            }
        }
    }
}

fn build_request(request: &HttpRequest) -> Result<Request<Body>, ExecutionError> {
    let uri: Uri = request
        .url
        .parse()
        .map_err(|err| ExecutionError::InvalidRequest(format!("url {:?}: {}", request.url, err)))?;

    match uri.scheme_str() {
        Some("http") | Some("https") if uri.host().is_some() => {}
        _ => {
            return Err(ExecutionError::InvalidRequest(format!(
                "url {:?} is not an absolute http(s) url",
                request.url
            )))
        }
    }

    // method case is kept as supplied, so "get" goes out as an extension method
    let method = Method::from_bytes(request.method.as_bytes()).map_err(|err| {
        ExecutionError::InvalidRequest(format!("method {:?}: {}", request.method, err))
    })?;

    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in &request.headers {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|err| {
            ExecutionError::InvalidRequest(format!("header name {:?}: {}", name, err))
        })?;
        let value = HeaderValue::from_str(value).map_err(|err| {
            ExecutionError::InvalidRequest(format!("header value {:?}: {}", value, err))
        })?;
        builder = builder.header(name, value);
    }

    builder
        .body(Body::from(request.body.clone()))
        .map_err(|err| ExecutionError::InvalidRequest(err.to_string()))
}

async fn transform_response(
    response: Response<Body>,
    limit: usize,
) -> Result<HttpResponse, ExecutionError> {
    let (parts, mut body) = response.into_parts();

    let mut bytes = Vec::new();
    while let Some(chunk) = body.data().await {
        let chunk = chunk.map_err(|err| ExecutionError::ResponseUnreadable(err.to_string()))?;
        if bytes.len() + chunk.len() > limit {
            return Err(ExecutionError::ResponseUnreadable(format!(
                "body larger than {} bytes",
                limit
            )));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(HttpResponse {
        status_code: parts.status.as_u16(),
        reason_phrase: reason_phrase(&parts),
        headers: transform_headers(&parts.headers),
        body: bytes,
    })
}

/// The phrase sent by the origin, or the canonical one when the origin sent the standard
/// phrase (hyper only records non-canonical phrases).
fn reason_phrase(parts: &hyper::http::response::Parts) -> String {
    parts
        .extensions
        .get::<ReasonPhrase>()
        .and_then(|reason| std::str::from_utf8(reason.as_bytes()).ok())
        .map(str::to_string)
        .unwrap_or_else(|| parts.status.canonical_reason().unwrap_or_default().to_string())
}

/// Names come out lowercase. Values of a repeated name are grouped together in the order
/// they were received.
fn transform_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(key, value)| {
            (
                key.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}
