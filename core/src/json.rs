//! JSON adapters between typed values and request/response bodies.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::HelperError;
use crate::http::HttpBody;

/// Serialize `value` into a UTF-8 `application/json` body.
///
/// `None` produces no body at all rather than an error.
pub fn encode_body<T: Serialize + ?Sized>(
    value: Option<&T>,
) -> Result<Option<HttpBody>, HelperError> {
    value
        .map(|v| {
            serde_json::to_string(v)
                .map(HttpBody::json)
                .map_err(|e| HelperError::Serialization(e.to_string()))
        })
        .transpose()
}

/// Deserialize response text. An empty (or whitespace-only) body yields
/// `None`.
pub fn decode_body<T: DeserializeOwned>(text: &str) -> Result<Option<T>, HelperError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(text)
        .map(Some)
        .map_err(|e| HelperError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Count {
        n: i32,
    }

    #[test]
    fn encode_object() {
        let body = encode_body(Some(&Count { n: 1 })).unwrap().unwrap();
        assert_eq!(body.bytes, br#"{"n":1}"#.to_vec());
        assert!(body.content_type.starts_with("application/json"));
    }

    #[test]
    fn encode_none_is_empty() {
        assert!(encode_body::<Count>(None).unwrap().is_none());
    }

    #[test]
    fn encode_unserializable_map_key() {
        let mut map = BTreeMap::new();
        map.insert(vec![1u8], "x");
        let err = encode_body(Some(&map)).unwrap_err();
        assert!(matches!(err, HelperError::Serialization(_)));
    }

    #[test]
    fn decode_object() {
        let value: Option<Count> = decode_body(r#"{"n":7}"#).unwrap();
        assert_eq!(value, Some(Count { n: 7 }));
    }

    #[test]
    fn decode_empty_is_none() {
        let value: Option<Count> = decode_body("  ").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn decode_mismatch_is_captured() {
        let err = decode_body::<Count>(r#"{"n":"seven"}"#).unwrap_err();
        assert!(matches!(err, HelperError::Deserialization(_)));
        let err = decode_body::<Count>("not json").unwrap_err();
        assert!(matches!(err, HelperError::Deserialization(_)));
    }

    #[test]
    fn decode_then_encode_preserves_structure() {
        let text = r#"{"b":[1,2,{"c":null}],"a":"x","d":{"e":true}}"#;
        let value: serde_json::Value = decode_body(text).unwrap().unwrap();
        let body = encode_body(Some(&value)).unwrap().unwrap();
        let again: serde_json::Value = serde_json::from_slice(&body.bytes).unwrap();
        assert_eq!(again, serde_json::from_str::<serde_json::Value>(text).unwrap());
    }
}
