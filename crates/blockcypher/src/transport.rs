//! Blocking HTTP plumbing shared by every endpoint.
//!
//! Each call drains the response body before returning, on success and on
//! error, so the connection goes back to the client's pool.

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

/// HTTP verbs used by the API, each with its own notion of success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    fn method(self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Delete => Method::DELETE,
        }
    }

    /// GET/PUT/DELETE succeed on 200 or 204, POST on 200 or 201.
    pub fn accepts(self, status: StatusCode) -> bool {
        match self {
            Verb::Get | Verb::Put | Verb::Delete => {
                status == StatusCode::OK || status == StatusCode::NO_CONTENT
            }
            Verb::Post => status == StatusCode::OK || status == StatusCode::CREATED,
        }
    }
}

/// Thin wrapper over a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct Transport {
    http: Client,
}

impl Transport {
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    pub fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let body = self.execute(Verb::Get, url, |req| req)?;
        decode(&body)
    }

    /// POST an optional JSON body and decode the JSON reply.
    pub fn post<B, T>(&self, url: Url, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.execute(Verb::Post, url, |req| match body {
            Some(body) => req.json(body),
            None => req,
        })?;
        decode(&body)
    }

    /// PUT a JSON body. Any reply body is discarded.
    pub fn put<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<()> {
        self.execute(Verb::Put, url, |req| req.json(body))?;
        Ok(())
    }

    pub fn delete(&self, url: Url) -> Result<()> {
        self.execute(Verb::Delete, url, |req| req)?;
        Ok(())
    }

    fn execute<F>(&self, verb: Verb, url: Url, prepare: F) -> Result<Vec<u8>>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        // Never log the query string: it carries the token.
        debug!(method = %verb.method(), path = url.path(), "sending request");

        let response = prepare(self.http.request(verb.method(), url)).send()?;
        let status = response.status();
        debug!(status = status.as_u16(), "received response");

        if !verb.accepts(status) {
            // The status is the error; a failed read must not mask it.
            let body = response.bytes().map(|b| b.to_vec()).unwrap_or_default();
            return Err(error_from_response(status, &body));
        }
        Ok(response.bytes()?.to_vec())
    }
}

/// An empty success body (204, or a 200 with nothing in it) decodes as JSON
/// `null`, so `Option` and unit targets come back as `None`/`()`.
fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_slice(b"null")?);
    }
    Ok(serde_json::from_slice(body)?)
}

/// `HTTP 404 Not Found`
pub fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("HTTP {} {}", status.as_u16(), reason),
        None => format!("HTTP {}", status.as_u16()),
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorItem>,
}

#[derive(Deserialize)]
struct ErrorItem {
    #[serde(default)]
    error: Option<String>,
}

/// Turn a non-success response into an [`Error`].
///
/// 429 short-circuits to [`Error::RateLimited`] without looking at the body.
/// Otherwise the body is read as `{"error": "..", "errors": [{"error": ".."}]}`
/// and every message is joined with `", "`. A body that is not such an
/// envelope, or carries no message, yields [`Error::Status`].
pub fn error_from_response(status: StatusCode, body: &[u8]) -> Error {
    let status_text = status_line(status);
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Error::RateLimited {
            status: status_text,
        };
    }

    let envelope: ErrorEnvelope = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(_) => {
            return Error::Status {
                status: status_text,
            }
        }
    };

    let messages: Vec<String> = envelope
        .error
        .into_iter()
        .chain(envelope.errors.into_iter().filter_map(|e| e.error))
        .filter(|m| !m.is_empty())
        .collect();

    if messages.is_empty() {
        Error::Status {
            status: status_text,
        }
    } else {
        Error::Api {
            status: status_text,
            message: messages.join(", "),
        }
    }
}
