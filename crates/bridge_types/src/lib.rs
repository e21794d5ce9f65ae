pub mod codec;
pub mod human;

use parity_scale_codec::{Decode, Encode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use codec::{
    decode_request, decode_response, decode_result, encode_request, encode_response,
    encode_result, DecodeError,
};

pub type Header = (String, String);

/// Outcome of a contract message. Callers tell a protocol failure (`Err`) apart from a
/// delivered HTTP exchange (`Ok`), even when the exchange carries an error status.
pub type MessageResult<T> = Result<T, LangError>;

/// An outbound HTTP call performed on behalf of the caller.
///
/// Values are never validated here. Whether the url resolves or the method is
/// acceptable is decided by whoever executes the request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequest {
    pub url: String,
    pub method: String,
    /// Ordered, duplicates allowed.
    pub headers: Vec<Header>,
    #[serde(with = "human::body")]
    pub body: Vec<u8>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    pub fn post(url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self::new("POST", url).with_body(body)
    }

    /// Appends a header. An existing header of the same name is kept.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }
}

/// The outcome of a completed HTTP exchange.
#[derive(Clone, Debug, Default, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    // Fixed width on the wire, so values above 65535 cannot be represented at all.
    pub status_code: u16,
    pub reason_phrase: String,
    pub headers: Vec<Header>,
    #[serde(with = "human::body")]
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status_code: u16, reason_phrase: impl Into<String>) -> Self {
        Self {
            status_code,
            reason_phrase: reason_phrase.into(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// First value of the named header, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }
}

/// Protocol level failures of a contract message.
///
/// Index 1 matches ink!'s `LangError::CouldNotReadInput`. The remaining variants cover an
/// executor that never got as far as an HTTP exchange. A completed exchange is always
/// delivered as `Ok(HttpResponse)`, whatever its status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
#[non_exhaustive]
pub enum LangError {
    #[codec(index = 1)]
    CouldNotReadInput,
    #[codec(index = 2)]
    InvalidRequest,
    #[codec(index = 3)]
    Timeout,
    #[codec(index = 4)]
    Unreachable,
    #[codec(index = 5)]
    ResponseUnreadable,
}

impl From<DecodeError> for LangError {
    fn from(_: DecodeError) -> Self {
        LangError::CouldNotReadInput
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct GameState {
        turn: String,
        status: u8,
    }

    #[test]
    fn json_body() {
        let response = HttpResponse::new(200, "OK")
            .with_header("Content-Type", "application/json")
            .with_body(r#"{"turn":"white","status":1}"#);

        assert_eq!(
            response.json::<GameState>().unwrap(),
            GameState {
                turn: "white".to_string(),
                status: 1,
            }
        );
        assert_eq!(response.header("content-type"), Some("application/json"));
    }

    #[test]
    fn non_json_body() {
        let response = HttpResponse::new(502, "Bad Gateway").with_body("<html>upstream down</html>");

        assert!(response.json::<GameState>().is_err());
        assert!(!response.is_success());
    }
}
