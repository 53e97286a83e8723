//! HTTP transport for the Bithumb REST API.
//!
//! One request per call, no retries, reqwest default timeouts.
//!
//! # Authentication
//!
//! Private requests carry three headers:
//! - `Api-Key`: connect key
//! - `Api-Sign`: signature of path, form body and nonce (see [`crate::signer`])
//! - `Api-Nonce`: millisecond nonce

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, warn};

use bithumb_domain::{Credentials, Payload};

use crate::config::BITHUMB_API_URL;
use crate::envelope::Envelope;
use crate::error::{BithumbError, BithumbResult};
use crate::nonce::NonceSource;
use crate::signer;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Sends requests and unwraps the response envelope.
#[derive(Debug)]
pub struct Transport {
    /// HTTP client
    client: Client,
    /// Base URL without trailing slash
    base_url: String,
    /// Nonce source for signed requests
    nonces: NonceSource,
}

impl Transport {
    /// Create a transport for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            nonces: NonceSource::new(),
        }
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path (the path may include a query string).
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Send an unauthenticated GET.
    pub async fn get(&self, path: &str) -> BithumbResult<Envelope> {
        debug!(method = "GET", path = %path, "Sending request");

        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| BithumbError::Request(e.to_string()))?;

        Self::read_envelope("GET", path, response).await
    }

    /// Send a signed form POST.
    pub async fn post(
        &self,
        path: &str,
        payload: &Payload,
        credentials: &Credentials,
    ) -> BithumbResult<Envelope> {
        let nonce = self.nonces.next();
        let body = signer::url_encode(payload);
        let signature = signer::sign(credentials.secret_key(), path, &body, &nonce)?;

        debug!(method = "POST", path = %path, nonce = %nonce, fields = payload.len(), "Sending signed request");

        let response = self
            .client
            .post(self.url(path))
            .header("Api-Key", credentials.connect_key())
            .header("Api-Sign", signature)
            .header("Api-Nonce", &nonce)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| BithumbError::Request(e.to_string()))?;

        Self::read_envelope("POST", path, response).await
    }

    async fn read_envelope(
        method: &'static str,
        path: &str,
        response: Response,
    ) -> BithumbResult<Envelope> {
        let status = response.status();
        if status != StatusCode::OK {
            warn!(method, path = %path, status = status.as_u16(), "HTTP request failed");
            return Err(BithumbError::Transport {
                method,
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| BithumbError::Request(e.to_string()))?;

        Envelope::parse(&body)?.into_result().map_err(|err| {
            if let BithumbError::Api { code, message } = &err {
                warn!(method, path = %path, code = %code, message = %message, "Bithumb API error");
            }
            err
        })
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(BITHUMB_API_URL)
    }
}
