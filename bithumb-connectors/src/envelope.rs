//! Bithumb response envelope.
//!
//! Every response is a JSON object carrying a `status` code. `"0000"` means
//! success and the object holds endpoint data; anything else is a failure
//! described by `message`.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{BithumbError, BithumbResult};

/// Status code of a successful response.
pub const SUCCESS_STATUS: &str = "0000";

/// Parsed response envelope, kept as received.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope(Value);

impl Envelope {
    /// Parse a response body.
    pub fn parse(body: &str) -> BithumbResult<Self> {
        serde_json::from_str(body)
            .map(Self)
            .map_err(|e| BithumbError::Parse(e.to_string()))
    }

    /// Wrap an already-parsed value.
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Status code as a string. Numeric codes are rendered as-is.
    pub fn status(&self) -> Option<String> {
        match self.0.get("status")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Error message, if any.
    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }

    /// True when the status equals the success sentinel.
    pub fn is_success(&self) -> bool {
        self.status().as_deref() == Some(SUCCESS_STATUS)
    }

    /// Keep successful envelopes, turn the rest into `BithumbError::Api`.
    pub fn into_result(self) -> BithumbResult<Self> {
        if self.is_success() {
            return Ok(self);
        }
        Err(BithumbError::Api {
            code: self.status().unwrap_or_default(),
            message: self.message().unwrap_or_default().to_string(),
        })
    }

    /// Endpoint data.
    pub fn data(&self) -> Option<&Value> {
        self.0.get("data")
    }

    /// Decode `data` into a model.
    pub fn data_as<T: DeserializeOwned>(&self) -> BithumbResult<T> {
        let data = self
            .data()
            .ok_or_else(|| BithumbError::Parse("envelope has no data field".to_string()))?;
        T::deserialize(data).map_err(|e| BithumbError::Parse(e.to_string()))
    }

    /// Decode the whole envelope into a model.
    pub fn decode<T: DeserializeOwned>(&self) -> BithumbResult<T> {
        T::deserialize(&self.0).map_err(|e| BithumbError::Parse(e.to_string()))
    }

    /// Borrow the raw JSON.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Take the raw JSON.
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Envelope> for Value {
    fn from(envelope: Envelope) -> Self {
        envelope.0
    }
}
