//! Verify header merging and the result success predicate against JSON test
//! vectors stored in `test-vectors/`.

use http_helper::{
    merge_headers, HeaderSet, HelperError, HttpResponse, RawResult, RequestResult, ResponseBody,
};

/// Parse `[["name", "value"], ...]` into a `HeaderSet`.
fn header_set(value: &serde_json::Value) -> HeaderSet {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let arr = pair.as_array().unwrap();
            (
                arr[0].as_str().unwrap().to_string(),
                arr[1].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Header merge
// ---------------------------------------------------------------------------

#[test]
fn merge_test_vectors() {
    let raw = include_str!("../../test-vectors/merge.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let mut dest = header_set(&case["defaults"]);
        let src = header_set(&case["caller"]);
        let expected = header_set(&case["expected"]);

        merge_headers(&mut dest, &src);

        let got: Vec<_> = dest.iter().collect();
        let want: Vec<_> = expected.iter().collect();
        assert_eq!(got, want, "{name}: merged headers");
    }
}

#[test]
fn merge_is_idempotent_for_single_valued_fields() {
    let raw = include_str!("../../test-vectors/merge.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let src = header_set(&case["caller"]);

        let mut once = HeaderSet::new();
        merge_headers(&mut once, &src);
        let mut twice = once.clone();
        merge_headers(&mut twice, &src);

        for (field, value) in once.iter() {
            if http_helper::HeaderKind::of(field) == http_helper::HeaderKind::Single {
                let values: Vec<_> = twice.get_all(field).collect();
                assert_eq!(values, vec![value], "{name}: {field}");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Result predicate
// ---------------------------------------------------------------------------

#[test]
fn result_test_vectors() {
    let raw = include_str!("../../test-vectors/results.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = case["status"].as_u64().map(|status| HttpResponse {
            status: status as u16,
            headers: HeaderSet::new(),
            body: ResponseBody::empty(),
        });
        let error = case["error"]
            .as_bool()
            .unwrap()
            .then(|| HelperError::Deserialization("vector".to_string()));

        let result: RawResult =
            RequestResult::new(case["flag"].as_bool().unwrap(), response, None, error);

        assert_eq!(
            result.is_success(),
            case["expected_success"].as_bool().unwrap(),
            "{name}: is_success"
        );
    }
}
