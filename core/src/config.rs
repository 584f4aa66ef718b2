//! Declarative configuration for a [`RequestHelper`](crate::RequestHelper).

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::HelperError;
use crate::headers::HeaderSet;

/// Base URL plus default headers, loadable from JSON.
///
/// ```json
/// { "base_url": "https://api.example.com", "headers": { "Accept": ["application/json"] } }
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HelperConfig {
    pub base_url: String,
    #[serde(default)]
    pub headers: BTreeMap<String, Vec<String>>,
}

impl HelperConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            headers: BTreeMap::new(),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, HelperError> {
        serde_json::from_str(text).map_err(|e| HelperError::Config(e.to_string()))
    }

    /// The configured headers, or `None` when none were given.
    pub fn header_set(&self) -> Option<HeaderSet> {
        if self.headers.is_empty() {
            return None;
        }
        Some(
            self.headers
                .iter()
                .flat_map(|(name, values)| values.iter().map(move |v| (name.clone(), v.clone())))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_base_url_and_headers() {
        let config = HelperConfig::from_json(
            r#"{"base_url":"http://localhost:3000","headers":{"Accept":["a","b"],"X-Key":["k"]}}"#,
        )
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
        let headers = config.header_set().unwrap();
        assert_eq!(headers.get_all("accept").collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(headers.get("x-key"), Some("k"));
    }

    #[test]
    fn headers_default_to_none() {
        let config = HelperConfig::from_json(r#"{"base_url":"http://localhost"}"#).unwrap();
        assert!(config.header_set().is_none());
    }

    #[test]
    fn missing_base_url_is_config_error() {
        let err = HelperConfig::from_json(r#"{"headers":{}}"#).unwrap_err();
        assert!(matches!(err, HelperError::Config(_)));
    }
}
