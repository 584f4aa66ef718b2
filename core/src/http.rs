//! Plain-data HTTP types exchanged with the transport.
//!
//! # Design
//! A request is fully resolved (absolute URL, effective headers) before the
//! transport sees it. A response carries its body as a read-once stream so a
//! download can be copied straight to disk without buffering it in memory.

use std::fmt;
use std::io::{self, Read, Write};

use crate::headers::HeaderSet;

pub const APPLICATION_JSON: &str = "application/json; charset=utf-8";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request content: opaque bytes plus the content type they are sent with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpBody {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl HttpBody {
    pub fn new(bytes: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.into(),
        }
    }

    /// UTF-8 JSON text tagged as `application/json`.
    pub fn json(text: impl Into<String>) -> Self {
        Self::new(text.into().into_bytes(), APPLICATION_JSON)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(text.into().into_bytes(), "text/plain; charset=utf-8")
    }
}

/// A fully resolved request, ready to hand to a transport.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HeaderSet,
    pub body: Option<HttpBody>,
}

/// Response body that can be consumed at most once.
///
/// Any read after the first one sees an empty body.
pub struct ResponseBody {
    reader: Option<Box<dyn Read + Send>>,
}

impl ResponseBody {
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self {
            reader: Some(Box::new(reader)),
        }
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::from_reader(io::Cursor::new(bytes.into()))
    }

    pub fn empty() -> Self {
        Self { reader: None }
    }

    /// Whether the stream has already been handed out.
    pub fn is_consumed(&self) -> bool {
        self.reader.is_none()
    }

    pub fn read_to_end(&mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        if let Some(mut reader) = self.reader.take() {
            reader.read_to_end(&mut buf)?;
        }
        Ok(buf)
    }

    pub fn read_to_string(&mut self) -> io::Result<String> {
        let bytes = self.read_to_end()?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Stream the body into `writer`, returning the number of bytes copied.
    pub fn copy_to<W: Write + ?Sized>(&mut self, writer: &mut W) -> io::Result<u64> {
        match self.reader.take() {
            Some(mut reader) => io::copy(&mut reader, writer),
            None => Ok(0),
        }
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseBody")
            .field("consumed", &self.is_consumed())
            .finish()
    }
}

/// A response as returned by the transport.
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HeaderSet,
    pub body: ResponseBody,
}

impl HttpResponse {
    /// Check if the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names() {
        assert_eq!(HttpMethod::Patch.as_str(), "PATCH");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn json_body_is_tagged() {
        let body = HttpBody::json(r#"{"n":1}"#);
        assert_eq!(body.bytes, br#"{"n":1}"#.to_vec());
        assert!(body.content_type.starts_with("application/json"));
    }

    #[test]
    fn body_reads_once() {
        let mut body = ResponseBody::from_bytes("hello");
        assert_eq!(body.read_to_string().unwrap(), "hello");
        assert!(body.is_consumed());
        assert_eq!(body.read_to_string().unwrap(), "");
    }

    #[test]
    fn copy_to_streams_all_bytes() {
        let mut body = ResponseBody::from_bytes(vec![0u8, 1, 2, 255]);
        let mut out = Vec::new();
        assert_eq!(body.copy_to(&mut out).unwrap(), 4);
        assert_eq!(out, vec![0u8, 1, 2, 255]);
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let mut body = ResponseBody::from_bytes(vec![0xff, 0xfe]);
        let err = body.read_to_string().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn success_range() {
        let response = |status| HttpResponse {
            status,
            headers: HeaderSet::new(),
            body: ResponseBody::empty(),
        };
        assert!(response(200).is_success());
        assert!(response(204).is_success());
        assert!(!response(199).is_success());
        assert!(!response(300).is_success());
        assert!(!response(404).is_success());
    }
}
