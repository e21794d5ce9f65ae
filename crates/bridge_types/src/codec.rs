//! SCALE encoding of the bridge messages.
//!
//! Strings and byte vectors carry a compact length prefix, `u16` is two little-endian bytes,
//! `Result` is a single tag byte (`0` = Ok, `1` = Err) followed by its payload. Decoding
//! consumes the whole buffer: trailing bytes are rejected like truncated ones.

use parity_scale_codec::{Decode, DecodeAll, Encode};

use crate::{HttpRequest, HttpResponse};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("could not decode {what}: {source}")]
    Binary {
        what: &'static str,
        source: parity_scale_codec::Error,
    },
    #[error("could not read display form: {0}")]
    Display(#[from] serde_json::Error),
}

pub fn encode_request(request: &HttpRequest) -> Vec<u8> {
    request.encode()
}

pub fn decode_request(bytes: &[u8]) -> Result<HttpRequest, DecodeError> {
    decode_value("HttpRequest", bytes)
}

pub fn encode_response(response: &HttpResponse) -> Vec<u8> {
    response.encode()
}

pub fn decode_response(bytes: &[u8]) -> Result<HttpResponse, DecodeError> {
    decode_value("HttpResponse", bytes)
}

pub fn encode_result<T: Encode, E: Encode>(result: &Result<T, E>) -> Vec<u8> {
    result.encode()
}

/// An unknown tag byte is an error, never a default variant.
pub fn decode_result<T: Decode, E: Decode>(bytes: &[u8]) -> Result<Result<T, E>, DecodeError> {
    decode_value("Result", bytes)
}

pub(crate) fn decode_value<T: Decode>(what: &'static str, bytes: &[u8]) -> Result<T, DecodeError> {
    let mut input = bytes;
    T::decode_all(&mut input).map_err(|source| DecodeError::Binary { what, source })
}
