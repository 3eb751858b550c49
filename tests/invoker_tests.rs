//! Plugin invoker tests: passthrough, failure sentinel, truncation.

use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};
use toolrun::invoker::{PluginInvoker, INVOCATION_ERROR};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn params(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[tokio::test]
async fn small_json_response_passes_through_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("city", "Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"temp": 18})))
        .mount(&server)
        .await;

    let invoker = PluginInvoker::new(server.uri());
    let result = invoker.invoke("/weather", &params(&[("city", json!("Paris"))])).await;
    assert_eq!(result, json!({"temp": 18}));
}

#[tokio::test]
async fn non_string_params_are_stringified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .and(query_param("n", "3"))
        .and(query_param("all", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let invoker = PluginInvoker::new(server.uri());
    let result = invoker
        .invoke("/page", &params(&[("n", json!(3)), ("all", json!(true))]))
        .await;
    assert_eq!(result, json!({"ok": true}));
}

#[tokio::test]
async fn non_json_body_returns_sentinel() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let invoker = PluginInvoker::new(server.uri());
    let result = invoker.invoke("/broken", &Map::new()).await;
    assert_eq!(result, json!(INVOCATION_ERROR));
}

#[tokio::test]
async fn unreachable_host_returns_sentinel() {
    let invoker = PluginInvoker::new("http://127.0.0.1:9");
    let result = invoker.invoke("/anything", &Map::new()).await;
    assert_eq!(result, json!(INVOCATION_ERROR));
}

#[tokio::test]
async fn error_status_with_json_body_still_parses() {
    // Status codes are not inspected: a JSON body wins regardless.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/teapot"))
        .respond_with(ResponseTemplate::new(418).set_body_json(json!({"err": "teapot"})))
        .mount(&server)
        .await;

    let invoker = PluginInvoker::new(server.uri());
    let result = invoker.invoke("/teapot", &Map::new()).await;
    assert_eq!(result, json!({"err": "teapot"}));
}

#[tokio::test]
async fn oversized_object_keeps_last_two_keys_in_reverse_order() {
    let filler = "x".repeat(300);
    let body = json!({
        "first": filler.as_str(),
        "second": filler.as_str(),
        "third": filler.as_str(),
        "fourth": filler.as_str(),
        "fifth": filler.as_str(),
    });

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/long"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let invoker = PluginInvoker::new(server.uri());
    let result = invoker.invoke("/long", &Map::new()).await;

    let Value::Object(map) = result else {
        panic!("expected truncated object, got {result}");
    };
    let keys: Vec<_> = map.keys().map(String::as_str).collect();
    assert_eq!(keys, ["fifth", "fourth"]);
}

#[tokio::test]
async fn response_at_threshold_is_not_truncated() {
    let body = json!({"a": "short", "b": "values", "c": "here"});

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/short"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let invoker = PluginInvoker::new(server.uri());
    let result = invoker.invoke("/short", &Map::new()).await;
    assert_eq!(result, body);
}

#[tokio::test]
async fn oversized_array_falls_back_to_sentinel() {
    let body: Vec<String> = (0..200).map(|i| format!("item-{i}")).collect();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let invoker = PluginInvoker::new(server.uri());
    let result = invoker.invoke("/list", &Map::new()).await;
    assert_eq!(result, json!(INVOCATION_ERROR));
}
