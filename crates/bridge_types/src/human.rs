//! Display form of the bridge messages, the JSON shape shown to people.
//!
//! Field names are camelCase. Bodies render as text when they are printable UTF-8, otherwise
//! as `0x` prefixed hex. On input a body may be a byte array, a hex string or plain text.

use parity_scale_codec::Decode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec::{decode_value, DecodeError};

pub fn to_display<T: Serialize>(value: &T) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(value)
}

pub fn from_display<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, DecodeError> {
    Ok(serde_json::from_value(value)?)
}

pub fn from_binary<T: Decode>(bytes: &[u8]) -> Result<T, DecodeError> {
    decode_value(std::any::type_name::<T>(), bytes)
}

pub mod body {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Bytes(Vec<u8>),
        Text(String),
    }

    pub fn serialize<S: Serializer>(body: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        match std::str::from_utf8(body) {
            Ok(text) if is_printable(text) => serializer.serialize_str(text),
            _ => serializer.serialize_str(&format!("0x{}", hex::encode(body))),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Bytes(bytes) => Ok(bytes),
            Repr::Text(text) => match text.strip_prefix("0x") {
                Some(digits) => hex::decode(digits).map_err(D::Error::custom),
                None => Ok(text.into_bytes()),
            },
        }
    }

    // text starting with 0x would read back as hex
    fn is_printable(text: &str) -> bool {
        !text.starts_with("0x")
            && text
                .chars()
                .all(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t'))
    }
}
