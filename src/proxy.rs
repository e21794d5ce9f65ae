use bridge_types::{decode_request, encode_result, HttpRequest, HttpResponse, MessageResult};

use crate::call::{CallOptions, CallOrigin};
use crate::executor::Executor;

/// Progress of a single call. Nothing outlives the call that created it.
#[derive(Debug)]
pub enum State<'i> {
    // call input has arrived but is not decoded yet
    PendingDecode(&'i [u8]),
    // request is with the executor
    Executing(HttpRequest),
    // outcome is known
    Resolved(MessageResult<HttpResponse>),
}

/// Runs the `request` message: hands a decoded request to the executor exactly once.
///
/// Whatever the executor returns as a response is `Ok`, including 4xx and 5xx statuses.
#[tracing::instrument(level = "debug", "request", skip_all, fields(origin = %origin, url = %request.url))]
pub async fn request<E: Executor>(
    executor: &E,
    origin: &CallOrigin,
    options: &CallOptions,
    request: HttpRequest,
) -> MessageResult<HttpResponse> {
    Proxy::new(executor, origin, options)
        .run(State::Executing(request))
        .await
}

/// Decodes raw call input, runs `request` and encodes the outcome.
///
/// Input that does not decode resolves to `Err(LangError::CouldNotReadInput)` and never
/// reaches the executor.
#[tracing::instrument(level = "debug", "dispatch", skip_all, fields(origin = %origin, len = input.len()))]
pub async fn dispatch<E: Executor>(
    executor: &E,
    origin: &CallOrigin,
    options: &CallOptions,
    input: &[u8],
) -> Vec<u8> {
    let result = Proxy::new(executor, origin, options)
        .run(State::PendingDecode(input))
        .await;

    encode_result(&result)
}

pub struct Proxy<'a, E> {
    pub executor: &'a E,
    pub origin: &'a CallOrigin,
    pub options: &'a CallOptions,
}

impl<'a, E: Executor> Proxy<'a, E> {
    pub fn new(executor: &'a E, origin: &'a CallOrigin, options: &'a CallOptions) -> Self {
        Self {
            executor,
            origin,
            options,
        }
    }

    pub async fn run(&self, initial_state: State<'_>) -> MessageResult<HttpResponse> {
        let mut state = initial_state;
        loop {
            match state {
                State::Resolved(result) => return result,
                pending => state = self.next(pending).await,
            }
        }
    }

    pub async fn next<'i>(&self, state: State<'i>) -> State<'i> {
        match state {
            State::PendingDecode(input) => match decode_request(input) {
                Ok(req) => State::Executing(req),
                Err(error) => {
                    tracing::debug!("Rejecting input from {}: {}", self.origin, error);
                    State::Resolved(Err(error.into()))
                }
            },
            State::Executing(req) => {
                tracing::debug!(
                    "{} {} with {} headers, {:?}",
                    req.method,
                    req.url,
                    req.headers.len(),
                    self.options
                );

                match self.executor.execute(&req).await {
                    Ok(response) => {
                        tracing::debug!(
                            "Proxy {} {} --> {} {}",
                            req.method,
                            req.url,
                            response.status_code,
                            response.reason_phrase
                        );
                        State::Resolved(Ok(response))
                    }
                    Err(error) => {
                        tracing::error!("Error proxying {} {}: {}", req.method, req.url, error);
                        State::Resolved(Err(error.into()))
                    }
                }
            }
            resolved @ State::Resolved(_) => resolved,
        }
    }
}
