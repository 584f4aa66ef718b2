use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::Path,
    http::{header, HeaderMap, Method, StatusCode},
    response::IntoResponse,
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Fixed payload served by `GET /bytes`.
pub const BINARY_PAYLOAD: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0xff, 0x7f,
];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub text: String,
}

/// What `/echo` saw: method, content type and body text.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Echo {
    pub method: String,
    pub content_type: Option<String>,
    pub body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/text", get(text))
        .route("/echo", any(echo))
        .route("/headers", get(headers))
        .route("/status/{code}", any(status))
        .route("/bytes", get(bytes))
        .route("/malformed", get(malformed))
        .route("/empty", get(empty))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn text() -> Json<Message> {
    Json(Message {
        text: "ok".to_string(),
    })
}

async fn echo(method: Method, headers: HeaderMap, body: Bytes) -> Json<Echo> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    tracing::debug!(%method, ?content_type, len = body.len(), "echo");
    Json(Echo {
        method: method.to_string(),
        content_type,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

/// Every received header, values of repeated names in arrival order.
async fn headers(headers: HeaderMap) -> Json<BTreeMap<String, Vec<String>>> {
    let mut seen: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in &headers {
        seen.entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    Json(seen)
}

async fn status(Path(code): Path<u16>) -> Result<(StatusCode, String), StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok((status, format!("status {code}")))
}

async fn bytes() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/octet-stream")], BINARY_PAYLOAD)
}

async fn malformed() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], "{not json")
}

async fn empty() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_serializes_to_json() {
        let json = serde_json::to_string(&Message {
            text: "ok".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"text":"ok"}"#);
    }

    #[test]
    fn echo_allows_missing_content_type() {
        let echo: Echo =
            serde_json::from_str(r#"{"method":"POST","content_type":null,"body":""}"#).unwrap();
        assert!(echo.content_type.is_none());
        assert!(echo.body.is_empty());
    }
}
