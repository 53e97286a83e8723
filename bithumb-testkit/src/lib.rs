//! Test helpers for Bithumb connector tests.
//!
//! Provides an in-process stub of the Bithumb REST API that records every
//! request and answers with canned envelopes.

mod stub;

pub use stub::{RecordedRequest, StubExchange, StubResponse};

use serde_json::{json, Value};

/// Successful envelope wrapping `data`.
pub fn ok_envelope(data: Value) -> Value {
    json!({ "status": "0000", "data": data })
}

/// Failure envelope with a Bithumb status code.
pub fn error_envelope(code: &str, message: &str) -> Value {
    json!({ "status": code, "message": message })
}
