//! Per-call client construction.
//!
//! # Design
//! A `ScopedClient` is built for exactly one call and dropped when that call
//! returns. It owns a copy of the base URL and the effective header set, so
//! concurrent calls never share mutable state; only the transport is
//! borrowed.

use url::Url;

use crate::error::HelperError;
use crate::headers::{merge_headers, HeaderSet};
use crate::http::{HttpBody, HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Builds a [`ScopedClient`] for a base URL and optional caller headers.
#[derive(Debug, Clone)]
pub struct ClientBuilder<'a> {
    base_url: &'a str,
    headers: Option<&'a HeaderSet>,
}

impl<'a> ClientBuilder<'a> {
    pub fn new(base_url: &'a str) -> Self {
        Self {
            base_url,
            headers: None,
        }
    }

    pub fn headers(mut self, headers: Option<&'a HeaderSet>) -> Self {
        self.headers = headers;
        self
    }

    /// Validate the base URL and compute the effective header set.
    pub fn build<T: Transport + ?Sized>(
        self,
        transport: &'a T,
    ) -> Result<ScopedClient<'a, T>, HelperError> {
        let base_url = self.base_url.trim_end_matches('/');
        Url::parse(base_url).map_err(|e| HelperError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let mut headers = HeaderSet::new();
        if let Some(caller) = self.headers {
            merge_headers(&mut headers, caller);
        }

        Ok(ScopedClient {
            base_url: base_url.to_string(),
            headers,
            transport,
        })
    }
}

/// A client bound to one base URL and header set, used for a single call.
pub struct ScopedClient<'a, T: ?Sized> {
    base_url: String,
    headers: HeaderSet,
    transport: &'a T,
}

impl<T: Transport + ?Sized> ScopedClient<'_, T> {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    /// Join `path` onto the base URL. Absolute `http(s)://` paths are used
    /// as given.
    pub fn resolve(&self, path: &str) -> Result<String, HelperError> {
        let joined = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.is_empty() {
            self.base_url.clone()
        } else if path.starts_with('/') || path.starts_with('?') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        };
        Url::parse(&joined).map_err(|e| HelperError::InvalidUrl {
            url: joined.clone(),
            reason: e.to_string(),
        })?;
        Ok(joined)
    }

    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<HttpBody>,
    ) -> Result<HttpRequest, HelperError> {
        Ok(HttpRequest {
            method,
            url: self.resolve(path)?,
            headers: self.headers.clone(),
            body,
        })
    }

    pub fn send(&self, request: HttpRequest) -> Result<HttpResponse, HelperError> {
        Ok(self.transport.send(request)?)
    }
}
