use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::query::Query;
use crate::transport::Transport;

/// Handle to the BlockCypher API for one coin/chain and token.
///
/// Every call is a single blocking HTTP round trip; nothing is retried.
/// The handle holds no mutable state and can be shared between threads.
/// It uses `reqwest`'s blocking client, so do not call it from inside an
/// async runtime.
#[derive(Debug, Clone)]
pub struct BlockCypher {
    context: Context,
    transport: Transport,
}

impl BlockCypher {
    /// Client with `reqwest`'s default settings (no request timeout).
    pub fn new(context: Context) -> Result<Self> {
        let http = Client::builder().build()?;
        Ok(Self::with_http_client(context, http))
    }

    /// Client whose requests fail after `timeout`.
    pub fn with_timeout(context: Context, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http_client(context, http))
    }

    /// Client over a caller-configured `reqwest` client (proxies, TLS, pools).
    pub fn with_http_client(context: Context, http: Client) -> Self {
        Self {
            context,
            transport: Transport::new(http),
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub(crate) fn url(&self, segments: &[&str], query: &Query) -> Result<Url> {
        self.context.build_url(segments, query)
    }

    pub(crate) fn get<T: DeserializeOwned>(&self, segments: &[&str], query: &Query) -> Result<T> {
        self.transport.get(self.url(segments, query)?)
    }

    pub(crate) fn post<B, T>(&self, segments: &[&str], query: &Query, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.transport.post(self.url(segments, query)?, body)
    }

    pub(crate) fn put<B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        query: &Query,
        body: &B,
    ) -> Result<()> {
        self.transport.put(self.url(segments, query)?, body)
    }

    pub(crate) fn delete(&self, segments: &[&str], query: &Query) -> Result<()> {
        self.transport.delete(self.url(segments, query)?)
    }

    pub(crate) fn transport(&self) -> &Transport {
        &self.transport
    }
}

/// Reject an empty identifier before it silently turns into a list call.
pub(crate) fn require<'a>(what: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(Error::InvalidRequest(format!("{what} must not be empty")));
    }
    Ok(value)
}
