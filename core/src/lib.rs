//! Convenience layer over a blocking HTTP client.
//!
//! # Overview
//! `RequestHelper` issues GET/POST/PUT/PATCH/DELETE requests against a base
//! URL, optionally encoding JSON payloads and decoding JSON responses, and
//! wraps every outcome in a `RequestResult` carrying the success flag, the
//! raw response, parsed data and any captured error.
//!
//! # Design
//! - Each call builds a short-lived `ScopedClient` with its own copy of the
//!   base URL and effective header set; helpers share no mutable state.
//! - The network is behind the `Transport` trait. `UreqTransport` is the
//!   default; tests substitute stubs.
//! - Progress lines go through an injected `RequestLog` (default: `tracing`).
//! - No operation returns `Err` or panics on a failed request. Failures are
//!   reported through `RequestResult::error` and `RequestResult::is_success`.

pub mod builder;
pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod http;
pub mod json;
pub mod log;
pub mod result;
pub mod transport;

pub use builder::{ClientBuilder, ScopedClient};
pub use client::RequestHelper;
pub use config::HelperConfig;
pub use error::{HelperError, TransportError};
pub use headers::{merge_headers, HeaderKind, HeaderSet};
pub use http::{HttpBody, HttpMethod, HttpRequest, HttpResponse, ResponseBody};
pub use log::{NoopLog, RequestLog, TracingLog};
pub use result::{RawResult, RequestResult};
pub use transport::{Transport, UreqTransport};
