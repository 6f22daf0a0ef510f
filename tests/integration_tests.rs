//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: config → resource façade → HTTP requests →
//! decoded records

use hal_api::api::{ApiResolver, CheckoutApi, ResourceApi};
use hal_api::http::{ApiClient, HttpClient, HttpClientConfig};
use hal_api::{load_config_from_str, params, Error, Files, Params};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> Arc<dyn ApiClient> {
    let config = HttpClientConfig::builder()
        .base_url(format!("{}/api/", server.uri()))
        .build();
    Arc::new(HttpClient::with_config(config).unwrap())
}

fn page(total: u64, items: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "total": total,
        "_embedded": { "items": items }
    }))
}

async fn mount_page(server: &MockServer, number: &str, limit: &str, response: ResponseTemplate, calls: u64) {
    Mock::given(method("GET"))
        .and(path("/api/products/"))
        .and(query_param("page", number))
        .and(query_param("limit", limit))
        .respond_with(response)
        .expect(calls)
        .mount(server)
        .await;
}

// ============================================================================
// Aggregation
// ============================================================================

#[tokio::test]
async fn test_get_all_over_http() {
    let server = MockServer::start().await;
    mount_page(&server, "1", "2", page(3, json!([{ "id": 1 }, { "id": 2 }])), 1).await;
    mount_page(&server, "2", "2", page(3, json!([{ "id": 3 }])), 1).await;

    let api = ResourceApi::new(client(&server), "products").unwrap();
    let all = api.get_all(&params([("limit", 2)]), &Params::new()).await.unwrap();

    assert_eq!(all, vec![json!({ "id": 1 }), json!({ "id": 2 }), json!({ "id": 3 })]);
}

#[tokio::test]
async fn test_get_all_default_limit_and_empty_collection() {
    let server = MockServer::start().await;
    mount_page(&server, "1", "100", page(0, json!([])), 1).await;

    let api = ResourceApi::new(client(&server), "products").unwrap();
    let all = api.get_all(&Params::new(), &Params::new()).await.unwrap();

    assert!(all.is_empty());
}

#[tokio::test]
async fn test_get_all_concurrent_over_http() {
    let server = MockServer::start().await;
    mount_page(&server, "1", "1", page(4, json!(["a"])), 1).await;
    mount_page(
        &server,
        "2",
        "1",
        page(4, json!(["b"])).set_delay(Duration::from_millis(150)),
        1,
    )
    .await;
    mount_page(&server, "3", "1", page(4, json!(["c"])), 1).await;
    mount_page(
        &server,
        "4",
        "1",
        page(4, json!(["d"])).set_delay(Duration::from_millis(50)),
        1,
    )
    .await;

    let api = ResourceApi::new(client(&server), "products").unwrap();
    let all = api
        .get_all_concurrent(&params([("limit", 1)]), &Params::new(), 3)
        .await
        .unwrap();

    assert_eq!(all, vec![json!("a"), json!("b"), json!("c"), json!("d")]);
}

#[tokio::test]
async fn test_get_all_aborts_on_upstream_format_error() {
    let server = MockServer::start().await;
    mount_page(&server, "1", "1", page(2, json!(["a"])), 1).await;
    mount_page(
        &server,
        "2",
        "1",
        ResponseTemplate::new(502).set_body_raw("<html>Bad gateway</html>", "text/html"),
        1,
    )
    .await;

    let api = ResourceApi::new(client(&server), "products").unwrap();
    let err = api
        .get_all(&params([("limit", 1)]), &Params::new())
        .await
        .unwrap_err();

    match err {
        Error::InvalidResponseFormat { status, body, .. } => {
            assert_eq!(status, 502);
            assert!(body.contains("Bad gateway"));
        }
        other => panic!("Expected InvalidResponseFormat, got {other:?}"),
    }
}

// ============================================================================
// Paginator
// ============================================================================

#[tokio::test]
async fn test_paginator_over_http() {
    let server = MockServer::start().await;
    // Page 1 is fetched again after navigating back
    mount_page(&server, "1", "10", page(15, json!([1, 2, 3, 4, 5, 6, 7, 8, 9, 10])), 2).await;
    mount_page(&server, "2", "10", page(15, json!([11, 12, 13, 14, 15])), 1).await;

    let api = ResourceApi::new(client(&server), "products").unwrap();
    let mut paginator = api.create_paginator(&Params::new(), &Params::new()).unwrap();

    assert_eq!(paginator.current_page_results().await.unwrap().len(), 10);
    assert_eq!(paginator.current_page_results().await.unwrap().len(), 10);
    assert_eq!(paginator.number_of_results().unwrap(), 15);
    assert_eq!(paginator.last_page(), Some(2));

    assert_ok!(paginator.next_page());
    assert_eq!(paginator.current_page_results().await.unwrap().len(), 5);
    assert!(!paginator.has_next_page().unwrap());
    assert_err!(paginator.next_page());

    assert_ok!(paginator.previous_page());
    assert_eq!(paginator.current_page_results().await.unwrap()[0], json!(1));
    assert_err!(paginator.previous_page());
}

#[tokio::test]
async fn test_get_paginated_xml_body() {
    let server = MockServer::start().await;
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<result>
  <page>1</page>
  <limit>10</limit>
  <total>2</total>
  <_embedded>
    <items><id>1</id><code>mug</code></items>
    <items><id>2</id><code>cup</code></items>
  </_embedded>
</result>"#;
    mount_page(
        &server,
        "1",
        "10",
        ResponseTemplate::new(200).set_body_raw(xml, "application/xml"),
        1,
    )
    .await;

    let api = ResourceApi::new(client(&server), "products").unwrap();
    let envelope = api.get_paginated(&Params::new(), &Params::new()).await.unwrap();

    assert_eq!(envelope.total, 2);
    assert_eq!(envelope.items[1]["code"], json!("cup"));
}

#[tokio::test]
async fn test_get_all_xml_empty_collection() {
    let server = MockServer::start().await;
    let xml = "<result><page>1</page><limit>100</limit><total>0</total><_embedded></_embedded></result>";
    mount_page(
        &server,
        "1",
        "100",
        ResponseTemplate::new(200).set_body_raw(xml, "application/xml"),
        1,
    )
    .await;

    let api = ResourceApi::new(client(&server), "products").unwrap();
    let all = api.get_all(&Params::new(), &Params::new()).await.unwrap();

    assert!(all.is_empty());
}

// ============================================================================
// Single Resources
// ============================================================================

#[tokio::test]
async fn test_get_with_uri_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/3/variants/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 7, "code": "v7" })))
        .expect(1)
        .mount(&server)
        .await;

    let api = ResourceApi::new(client(&server), "products/{productId}/variants").unwrap();
    let variant = api.get(7, &Params::new(), &params([("productId", 3)])).await.unwrap();

    assert_eq!(variant["code"], json!("v7"));
}

#[tokio::test]
async fn test_get_sends_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/5"))
        .and(query_param("locale", "en_US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 5 })))
        .expect(1)
        .mount(&server)
        .await;

    let api = ResourceApi::new(client(&server), "products").unwrap();
    let product = api
        .get(5, &params([("locale", "en_US")]), &Params::new())
        .await
        .unwrap();

    assert_eq!(product["id"], json!(5));
}

#[tokio::test]
async fn test_get_rejects_xhtml() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html></html>", "application/xhtml+xml"),
        )
        .mount(&server)
        .await;

    let api = ResourceApi::new(client(&server), "products").unwrap();
    let err = api.get(1, &Params::new(), &Params::new()).await.unwrap_err();

    assert!(matches!(err, Error::InvalidResponseFormat { status: 200, .. }));
}

#[tokio::test]
async fn test_get_not_found_body_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "code": 404, "message": "Not Found" })))
        .mount(&server)
        .await;

    let api = ResourceApi::new(client(&server), "products").unwrap();
    let body = api.get(99, &Params::new(), &Params::new()).await.unwrap();

    assert_eq!(body["code"], json!(404));
}

#[tokio::test]
async fn test_create_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/products/"))
        .and(body_json(json!({ "code": "mug" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 12, "code": "mug" })))
        .expect(1)
        .mount(&server)
        .await;

    let api = ResourceApi::new(client(&server), "products").unwrap();
    let created = api
        .create(&json!({ "code": "mug" }), &Params::new(), &Files::new())
        .await
        .unwrap();

    assert_eq!(created["id"], json!(12));
}

#[tokio::test]
async fn test_create_with_file_is_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/products/"))
        .and(body_string_contains("filename=\"mug.jpg\""))
        .and(body_string_contains("JPEGDATA"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 13 })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("mug.jpg");
    std::fs::File::create(&file_path)
        .unwrap()
        .write_all(b"JPEGDATA")
        .unwrap();
    let files = Files::from([("images[0][file]".to_string(), file_path)]);

    let api = ResourceApi::new(client(&server), "products").unwrap();
    let created = api
        .create(&json!({ "code": "mug" }), &Params::new(), &files)
        .await
        .unwrap();

    assert_eq!(created["id"], json!(13));
}

#[tokio::test]
async fn test_update_and_delete_status() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/products/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/products/2"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "errors": {} })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/products/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = ResourceApi::new(client(&server), "products").unwrap();
    let body = json!({ "name": "Mug" });

    assert!(api.update(1, &body, &Params::new(), &Files::new()).await.unwrap());
    assert!(!api.update(2, &body, &Params::new(), &Files::new()).await.unwrap());
    assert!(api.delete(1, &Params::new()).await.unwrap());
}

#[tokio::test]
async fn test_checkout_step() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/checkouts/addressing/5/"))
        .and(body_json(json!({ "shippingAddress": { "city": "Lodz" } })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let checkout = CheckoutApi::new(client(&server), "checkouts/addressing/{cartId}").unwrap();
    let accepted = checkout
        .update(5, &json!({ "shippingAddress": { "city": "Lodz" } }), &Params::new())
        .await
        .unwrap();

    assert!(accepted);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let api = ResourceApi::new(
        Arc::new(HttpClient::from_url("http://127.0.0.1:9/api/").unwrap()),
        "products",
    )
    .unwrap();

    let err = api.get_all(&Params::new(), &Params::new()).await.unwrap_err();
    assert!(err.is_transport());
}

// ============================================================================
// Config → Resolver
// ============================================================================

#[tokio::test]
async fn test_config_resolver_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/3/variants/"))
        .and(query_param("limit", "100"))
        .respond_with(page(2, json!([{ "code": "a" }, { "code": "b" }])))
        .expect(1)
        .mount(&server)
        .await;

    let yaml = format!(
        "base_url: {}/api/\nresources:\n  variants: products/{{productId}}/variants\n",
        server.uri()
    );
    let config = load_config_from_str(&yaml).unwrap();
    let client: Arc<dyn ApiClient> = Arc::new(HttpClient::with_config(config.http_config()).unwrap());
    let resolver = ApiResolver::new(config.uri_map());

    let variants = resolver.resolve(client, "variants").unwrap();
    let all = variants
        .get_all(&Params::new(), &params([("productId", 3)]))
        .await
        .unwrap();

    assert_eq!(all.len(), 2);
}
