use std::net::{SocketAddr, TcpListener};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;
use std::time::Duration;

use axum::Router;
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bridge_types::{HttpRequest, HttpResponse};
use http_bridge::config::{Config, Http, Proxy};
use http_bridge::executor::{ExecutionError, Executor};

static TRACING_INITIALIZED: Once = Once::new();

// Help function to add tracing to tests
// Note: This is safe to use for multiple tests, but since tests are run concurrently the
// output may be interleaved
#[allow(dead_code)]
pub fn enable_tracing() {
    TRACING_INITIALIZED.call_once(|| {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "http_bridge=trace".into()),
            )
            .with(tracing_subscriber::fmt::layer())
            .init();
    });
}

#[allow(dead_code)]
pub fn config() -> Config {
    Config {
        proxy: Proxy {
            listen: "127.0.0.1:0".to_string(),
        },
        http: Http {
            timeout_ms: 100,
            max_response_bytes: 512,
        },
    }
}

/// Answers every request with a fixed response, or times out when it has none.
#[allow(dead_code)]
pub struct StubExecutor {
    response: Option<HttpResponse>,
    calls: AtomicUsize,
    pub last_request: Mutex<Option<HttpRequest>>,
}

#[allow(dead_code)]
impl StubExecutor {
    pub fn responding(response: HttpResponse) -> Self {
        Self {
            response: Some(response),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn timing_out() -> Self {
        Self {
            response: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Executor for StubExecutor {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ExecutionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().await = Some(request.clone());

        self.response
            .clone()
            .ok_or(ExecutionError::Timeout(Duration::from_millis(5)))
    }
}

/// Serves `router` on an ephemeral local port.
#[allow(dead_code)]
pub fn spawn_server(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(router.into_make_service())
            .await
            .unwrap();
    });

    addr
}
