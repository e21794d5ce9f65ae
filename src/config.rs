use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Proxy {
    pub listen: String,
}

impl Default for Proxy {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Limits applied to every outbound request.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Http {
    pub timeout_ms: u64,
    pub max_response_bytes: usize,
}

impl Default for Http {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            max_response_bytes: 2 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub proxy: Proxy,
    pub http: Http,
}
