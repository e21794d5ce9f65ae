use std::fmt;

use serde::Deserialize;

/// Who issued the contract call. Authentication happened before the call reached us.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallOrigin(String);

impl CallOrigin {
    pub fn new(origin: impl Into<String>) -> Self {
        Self(origin.into())
    }
}

impl Default for CallOrigin {
    fn default() -> Self {
        Self::new("anonymous")
    }
}

impl fmt::Display for CallOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Limits and value transfer attached to a call by the dispatcher. Carried along and logged,
/// never interpreted by the proxy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CallOptions {
    pub gas_limit: Option<u64>,
    pub storage_deposit_limit: Option<u64>,
    pub value: u64,
}
