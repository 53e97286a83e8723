//! Request payloads for private endpoints.
//!
//! Bithumb verifies the signature against the form-encoded body, so the
//! payload keeps keys in insertion order from construction to the wire.

use rust_decimal::Decimal;
use std::fmt;

/// Scalar value carried in a request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadValue {
    /// Free-form string (currencies, ids, addresses)
    Text(String),
    /// Integer (counts, offsets, KRW amounts)
    Integer(i64),
    /// Decimal number (units, prices)
    Decimal(Decimal),
}

impl fmt::Display for PayloadValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadValue::Text(s) => f.write_str(s),
            PayloadValue::Integer(n) => write!(f, "{}", n),
            PayloadValue::Decimal(d) => write!(f, "{}", d),
        }
    }
}

impl From<&str> for PayloadValue {
    fn from(value: &str) -> Self {
        PayloadValue::Text(value.to_string())
    }
}

impl From<String> for PayloadValue {
    fn from(value: String) -> Self {
        PayloadValue::Text(value)
    }
}

impl From<i64> for PayloadValue {
    fn from(value: i64) -> Self {
        PayloadValue::Integer(value)
    }
}

impl From<u32> for PayloadValue {
    fn from(value: u32) -> Self {
        PayloadValue::Integer(i64::from(value))
    }
}

impl From<Decimal> for PayloadValue {
    fn from(value: Decimal) -> Self {
        PayloadValue::Decimal(value)
    }
}

/// Ordered key/value mapping sent as an `application/x-www-form-urlencoded` body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    entries: Vec<(String, PayloadValue)>,
}

impl Payload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key, returning the payload (builder style).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PayloadValue>) -> Self {
        self.push(key, value);
        self
    }

    /// Append a key only when a value is present.
    pub fn with_opt<V: Into<PayloadValue>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Append a key. Re-inserting an existing key replaces its value in place.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<PayloadValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&PayloadValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PayloadValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries were added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
