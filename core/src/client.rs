//! Request pipeline: verb dispatch, transport call and result mapping.
//!
//! # Design
//! `RequestHelper` holds only read-only inputs (base URL, caller headers)
//! plus shared handles to the transport and log. Every call builds its own
//! [`ScopedClient`](crate::builder::ScopedClient), sends exactly one request
//! and maps the outcome into a [`RequestResult`]. Nothing escapes as an
//! `Err` or a panic; transport failures, non-2xx statuses, codec errors and
//! file errors all end up in `RequestResult::error`.
//!
//! A non-2xx status is always a captured failure. The response stays
//! attached so the caller can still inspect its status and body.

use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::builder::ClientBuilder;
use crate::config::HelperConfig;
use crate::error::HelperError;
use crate::headers::HeaderSet;
use crate::http::{HttpBody, HttpMethod, HttpResponse};
use crate::json::{decode_body, encode_body};
use crate::log::{RequestLog, TracingLog};
use crate::result::{RawResult, RequestResult};
use crate::transport::{Transport, UreqTransport};

/// Convenience client that issues requests against a fixed base URL.
#[derive(Clone)]
pub struct RequestHelper {
    base_url: String,
    headers: Option<HeaderSet>,
    transport: Arc<dyn Transport>,
    log: Arc<dyn RequestLog>,
}

impl fmt::Debug for RequestHelper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestHelper")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

impl RequestHelper {
    /// Helper using the default ureq transport and `tracing` output.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            headers: None,
            transport: Arc::new(UreqTransport::new()),
            log: Arc::new(TracingLog),
        }
    }

    pub fn from_config(config: &HelperConfig) -> Self {
        let mut helper = Self::new(&config.base_url);
        helper.headers = config.header_set();
        helper
    }

    /// Headers merged into every request issued by this helper.
    pub fn with_headers(mut self, headers: HeaderSet) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Arc::new(transport);
        self
    }

    pub fn with_log(mut self, log: impl RequestLog + 'static) -> Self {
        self.log = Arc::new(log);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn headers(&self) -> Option<&HeaderSet> {
        self.headers.as_ref()
    }

    pub fn set_headers(&mut self, headers: Option<HeaderSet>) {
        self.headers = headers;
    }

    // ------------------------------------------------------------------
    // Base verbs
    // ------------------------------------------------------------------

    pub fn get(&self, path: &str) -> RawResult {
        self.send(HttpMethod::Get, path, None)
    }

    pub fn post(&self, path: &str, body: Option<HttpBody>) -> RawResult {
        self.send(HttpMethod::Post, path, body)
    }

    pub fn put(&self, path: &str, body: Option<HttpBody>) -> RawResult {
        self.send(HttpMethod::Put, path, body)
    }

    pub fn patch(&self, path: &str, body: Option<HttpBody>) -> RawResult {
        self.send(HttpMethod::Patch, path, body)
    }

    pub fn delete(&self, path: &str, body: Option<HttpBody>) -> RawResult {
        self.send(HttpMethod::Delete, path, body)
    }

    /// Build a client for this call, send one request and map the outcome.
    pub fn send(&self, method: HttpMethod, path: &str, body: Option<HttpBody>) -> RawResult {
        let client = match ClientBuilder::new(&self.base_url)
            .headers(self.headers.as_ref())
            .build(&*self.transport)
        {
            Ok(client) => client,
            Err(e) => return self.fail(method, None, e),
        };

        let request = match client.build_request(method, path, body) {
            Ok(request) => request,
            Err(e) => return self.fail(method, None, e),
        };

        self.log
            .info(&format!("─> Performing {method} request: {}", request.url));

        match client.send(request) {
            Ok(response) if response.is_success() => {
                self.log
                    .info(&format!("└─> {method} response status: {}", response.status));
                RequestResult::succeeded(response, None)
            }
            Ok(response) => {
                let status = response.status;
                self.fail(method, Some(response), HelperError::Status { status })
            }
            Err(e) => self.fail(method, None, e),
        }
    }

    // ------------------------------------------------------------------
    // Text and file helpers
    // ------------------------------------------------------------------

    /// GET `path` and return the body as text. A failed call carries an
    /// empty string.
    pub fn get_string(&self, path: &str) -> RequestResult<String> {
        let mut response = match take_successful(self.get(path)) {
            Ok(response) => response,
            Err(failed) => {
                let (_, response, _, error) = failed.into_parts();
                return RequestResult::new(false, response, Some(String::new()), error);
            }
        };
        match response.body.read_to_string() {
            Ok(text) => RequestResult::succeeded(response, Some(text)),
            Err(e) => self.fail(HttpMethod::Get, Some(response), e.into()),
        }
    }

    /// GET `path` and stream the body into `file`, creating or truncating
    /// it. On success the data is the file path.
    ///
    /// A failure part-way through may leave a partial file behind.
    pub fn download(&self, path: &str, file: impl AsRef<Path>) -> RequestResult<PathBuf> {
        let mut response = match take_successful(self.get(path)) {
            Ok(response) => response,
            Err(failed) => return failed.without_data(),
        };

        let file = file.as_ref().to_path_buf();
        let copied = File::create(&file).and_then(|mut out| {
            let written = response.body.copy_to(&mut out)?;
            out.flush()?;
            Ok(written)
        });

        match copied {
            Ok(written) => {
                self.log.info(&format!(
                    "File downloaded to: {} ({written} bytes)",
                    file.display()
                ));
                RequestResult::succeeded(response, Some(file))
            }
            Err(e) => self.fail(HttpMethod::Get, Some(response), e.into()),
        }
    }

    // ------------------------------------------------------------------
    // JSON-encoded request bodies
    // ------------------------------------------------------------------

    pub fn post_json<B: Serialize + ?Sized>(&self, path: &str, content: Option<&B>) -> RawResult {
        self.send_json(HttpMethod::Post, path, content)
    }

    pub fn put_json<B: Serialize + ?Sized>(&self, path: &str, content: Option<&B>) -> RawResult {
        self.send_json(HttpMethod::Put, path, content)
    }

    pub fn patch_json<B: Serialize + ?Sized>(&self, path: &str, content: Option<&B>) -> RawResult {
        self.send_json(HttpMethod::Patch, path, content)
    }

    pub fn delete_json<B: Serialize + ?Sized>(&self, path: &str, content: Option<&B>) -> RawResult {
        self.send_json(HttpMethod::Delete, path, content)
    }

    fn send_json<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        content: Option<&B>,
    ) -> RawResult {
        match encode_body(content) {
            Ok(body) => self.send(method, path, body),
            Err(e) => self.fail(method, None, e),
        }
    }

    // ------------------------------------------------------------------
    // JSON-decoded responses
    // ------------------------------------------------------------------

    /// GET `path` and deserialize the body into `T`.
    pub fn get_json<T: DeserializeOwned>(&self, path: &str) -> RequestResult<T> {
        self.parse_json(HttpMethod::Get, self.get(path))
    }

    pub fn post_and_get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<HttpBody>,
    ) -> RequestResult<T> {
        self.parse_json(HttpMethod::Post, self.post(path, body))
    }

    pub fn put_and_get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<HttpBody>,
    ) -> RequestResult<T> {
        self.parse_json(HttpMethod::Put, self.put(path, body))
    }

    pub fn patch_and_get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<HttpBody>,
    ) -> RequestResult<T> {
        self.parse_json(HttpMethod::Patch, self.patch(path, body))
    }

    pub fn delete_and_get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<HttpBody>,
    ) -> RequestResult<T> {
        self.parse_json(HttpMethod::Delete, self.delete(path, body))
    }

    pub fn post_json_and_get_json<T, B>(
        &self,
        path: &str,
        content: Option<&B>,
    ) -> RequestResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.parse_json(HttpMethod::Post, self.post_json(path, content))
    }

    pub fn put_json_and_get_json<T, B>(
        &self,
        path: &str,
        content: Option<&B>,
    ) -> RequestResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.parse_json(HttpMethod::Put, self.put_json(path, content))
    }

    pub fn patch_json_and_get_json<T, B>(
        &self,
        path: &str,
        content: Option<&B>,
    ) -> RequestResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.parse_json(HttpMethod::Patch, self.patch_json(path, content))
    }

    pub fn delete_json_and_get_json<T, B>(
        &self,
        path: &str,
        content: Option<&B>,
    ) -> RequestResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.parse_json(HttpMethod::Delete, self.delete_json(path, content))
    }

    /// Read the whole body of a successful result and decode it as JSON.
    /// An empty body is a success with no data.
    fn parse_json<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        result: RawResult,
    ) -> RequestResult<T> {
        let mut response = match take_successful(result) {
            Ok(response) => response,
            Err(failed) => return failed.without_data(),
        };

        let decoded = response
            .body
            .read_to_string()
            .map_err(HelperError::from)
            .and_then(|text| decode_body(&text));

        match decoded {
            Ok(data) => RequestResult::succeeded(response, data),
            Err(e) => self.fail(method, Some(response), e),
        }
    }

    fn fail<T>(
        &self,
        method: HttpMethod,
        response: Option<HttpResponse>,
        error: HelperError,
    ) -> RequestResult<T> {
        self.log.error(&format!("└─> {method} request error: {error}"));
        RequestResult::failed(response, error)
    }
}

/// The response of a successful base result, or the result unchanged.
fn take_successful(result: RawResult) -> Result<HttpResponse, RawResult> {
    let success = result.is_success();
    let (flag, response, data, error) = result.into_parts();
    match response {
        Some(response) if success => Ok(response),
        response => Err(RequestResult::new(flag, response, data, error)),
    }
}
