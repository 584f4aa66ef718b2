//! The transport collaborator: whatever actually puts bytes on the wire.
//!
//! # Design
//! The pipeline only needs "send a request, get back status, headers and a
//! body stream", so that is all `Transport` asks for. `UreqTransport` is the
//! default backend; tests plug in their own implementations.

use std::sync::Arc;

use ureq::http;
use ureq::typestate::{WithBody, WithoutBody};
use ureq::{Agent, Body, RequestBuilder};

use crate::error::TransportError;
use crate::headers::HeaderSet;
use crate::http::{HttpBody, HttpMethod, HttpRequest, HttpResponse, ResponseBody};

/// Sends one request and returns the response as soon as its head is read.
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

/// A [`Transport`] backed by a blocking [`ureq`] agent.
///
/// Status codes are returned as data; deciding what counts as a failure is
/// left to the pipeline. Connection pooling is whatever the agent does.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Wrap an existing agent. Its `http_status_as_error` setting is
    /// overridden per request.
    pub fn from_agent(agent: Agent) -> Self {
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.as_str();
        let headers = &request.headers;
        let body = request.body.as_ref();

        let result = match request.method {
            HttpMethod::Get => send_without_body(with_headers(self.agent.get(url), headers), body),
            HttpMethod::Delete => {
                send_without_body(with_headers(self.agent.delete(url), headers), body)
            }
            HttpMethod::Post => send_with_body(with_headers(self.agent.post(url), headers), body),
            HttpMethod::Put => send_with_body(with_headers(self.agent.put(url), headers), body),
            HttpMethod::Patch => send_with_body(with_headers(self.agent.patch(url), headers), body),
        };

        match result {
            Ok(response) => Ok(convert_response(response)),
            Err(ureq::Error::Timeout(_)) => Err(TransportError::Timeout),
            Err(ureq::Error::HostNotFound) => {
                Err(TransportError::Connection("host not found".to_owned()))
            }
            Err(ureq::Error::Io(e)) => Err(TransportError::Connection(e.to_string())),
            Err(ureq::Error::Http(e)) => Err(TransportError::InvalidRequest(e.to_string())),
            Err(e) => Err(TransportError::Other(e.to_string())),
        }
    }
}

/// Attach headers and keep non-2xx statuses as data, whatever the agent's
/// own configuration says.
fn with_headers<B>(builder: RequestBuilder<B>, headers: &HeaderSet) -> RequestBuilder<B> {
    let mut builder = builder.config().http_status_as_error(false).build();
    for (name, value) in headers {
        builder = builder.header(name, value);
    }
    builder
}

fn send_without_body(
    builder: RequestBuilder<WithoutBody>,
    body: Option<&HttpBody>,
) -> Result<http::Response<Body>, ureq::Error> {
    match body {
        None => builder.call(),
        Some(_) => send_with_body(builder.force_send_body(), body),
    }
}

fn send_with_body(
    builder: RequestBuilder<WithBody>,
    body: Option<&HttpBody>,
) -> Result<http::Response<Body>, ureq::Error> {
    match body {
        None => builder.send_empty(),
        Some(body) => builder
            .content_type(body.content_type.as_str())
            .send(body.bytes.as_slice()),
    }
}

fn convert_response(response: http::Response<Body>) -> HttpResponse {
    let (parts, body) = response.into_parts();

    let headers = parts
        .headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_owned(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();

    HttpResponse {
        status: parts.status.as_u16(),
        headers,
        body: ResponseBody::from_reader(body.into_reader()),
    }
}
