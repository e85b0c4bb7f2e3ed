//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector describes the resource, the expected request, a simulated
//! response, and either the expected parse result or the expected error
//! variant. Comparing parsed values (not raw strings) avoids false negatives
//! from field-ordering differences.

use feed_core::{FeedClient, FetchError, HttpMethod, HttpResponse, Post, Resource, Todo};
use serde::de::DeserializeOwned;

const BASE_URL: &str = "http://localhost:3000";

fn client() -> FeedClient {
    FeedClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated_response(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn check_error(name: &str, expected: &str, err: FetchError) {
    match expected {
        "NotFound" => assert!(matches!(err, FetchError::NotFound), "{name}: expected NotFound, got {err:?}"),
        "Http" => assert!(matches!(err, FetchError::Http { .. }), "{name}: expected Http, got {err:?}"),
        "Deserialization" => assert!(
            matches!(err, FetchError::Deserialization(_)),
            "{name}: expected Deserialization, got {err:?}"
        ),
        other => panic!("{name}: unknown expected_error: {other}"),
    }
}

fn check_parse<T>(name: &str, case: &serde_json::Value, result: Result<Vec<T>, FetchError>)
where
    T: DeserializeOwned + PartialEq + std::fmt::Debug,
{
    if let Some(expected_error) = case.get("expected_error") {
        check_error(name, expected_error.as_str().unwrap(), result.unwrap_err());
    } else {
        let expected: Vec<T> = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(result.unwrap(), expected, "{name}: parsed result");
    }
}

#[test]
fn list_test_vectors() {
    let raw = include_str!("../../test-vectors/list.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let resource: Resource = case["resource"].as_str().unwrap().parse().unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_list(resource);
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.path, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        // Verify parse
        let response = simulated_response(case);
        match resource {
            Resource::Posts => check_parse::<Post>(name, case, c.parse_list_posts(response)),
            Resource::Todos => check_parse::<Todo>(name, case, c.parse_list_todos(response)),
        }
    }
}
