mod common;

use axum_test::TestServer;
use qr_link_service::api::routes::routes;
use serde_json::{Value, json};

async fn seeded_server(count: usize) -> TestServer {
    let db = common::open_test_db().await;
    for i in 0..count {
        common::create_test_link(&db, &format!("id-{i}"), &format!("https://site{i}.com")).await;
    }
    TestServer::new(routes().with_state(common::create_test_state(db))).unwrap()
}

#[tokio::test]
async fn test_list_links_defaults() {
    let server = seeded_server(12).await;

    let response = server.get("/links").await;

    assert_eq!(response.status_code(), 200);
    let body: Vec<Value> = response.json();
    assert_eq!(body.len(), 10);
    assert_eq!(body[0]["id"], "id-0");
    assert_eq!(body[0]["originalUrl"], "https://site0.com");
    assert_eq!(body[0]["redirectCount"], 0);
    assert!(body[0]["createdAt"].is_string());
}

#[tokio::test]
async fn test_list_links_window() {
    let server = seeded_server(5).await;

    let response = server
        .get("/links")
        .add_query_param("limit", 2)
        .add_query_param("offset", 3)
        .await;

    let body: Vec<Value> = response.json();
    let ids: Vec<_> = body.iter().map(|l| l["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["id-3", "id-4"]);
}

#[tokio::test]
async fn test_list_links_offset_past_end() {
    let server = seeded_server(5).await;

    let response = server.get("/links").add_query_param("offset", 1000).await;

    assert_eq!(response.status_code(), 200);
    let body: Vec<Value> = response.json();
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_list_links_invalid_params() {
    let server = seeded_server(1).await;

    for (name, value) in [("limit", "0"), ("limit", "1001"), ("offset", "-1"), ("limit", "ten")] {
        let response = server.get("/links").add_query_param(name, value).await;
        assert_eq!(response.status_code(), 400, "{name}={value}");
    }
}

#[tokio::test]
async fn test_search_links() {
    let db = common::open_test_db().await;
    common::create_test_link(&db, "a", "https://Docs.rs/serde").await;
    common::create_test_link(&db, "b", "https://crates.io").await;
    let server = TestServer::new(routes().with_state(common::create_test_state(db))).unwrap();

    let response = server.get("/links/search").add_query_param("query", "Docs").await;
    let body: Vec<Value> = response.json();
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["id"], "a");

    let response = server.get("/links/search").add_query_param("query", "docs").await;
    let body: Vec<Value> = response.json();
    assert!(body.is_empty());

    let response = server.get("/links/search").await;
    let body: Vec<Value> = response.json();
    assert_eq!(body.len(), 2);
}

#[tokio::test]
async fn test_get_link() {
    let server = seeded_server(1).await;

    let response = server.get("/links/id-0").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["dynamicUrl"], "http://s.example.com/redirect/id-0");

    let response = server.get("/links/missing").await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_update_link() {
    let server = seeded_server(1).await;

    let response = server
        .put("/links/id-0")
        .json(&json!({ "originalUrl": "https://updated.com" }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["id"], "id-0");
    assert_eq!(body["originalUrl"], "https://updated.com");

    let link: Value = server.get("/links/id-0").await.json();
    assert_eq!(link["originalUrl"], "https://updated.com");
    assert_eq!(link["dynamicUrl"], "http://s.example.com/redirect/id-0");
}

#[tokio::test]
async fn test_update_link_errors() {
    let server = seeded_server(1).await;

    let response = server
        .put("/links/id-0")
        .json(&json!({ "originalUrl": "nope" }))
        .await;
    assert_eq!(response.status_code(), 400);

    let response = server.put("/links/id-0").json(&json!({})).await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Original URL is required");

    let response = server
        .put("/links/missing")
        .json(&json!({ "originalUrl": "https://updated.com" }))
        .await;
    assert_eq!(response.status_code(), 404);

    let link: Value = server.get("/links/id-0").await.json();
    assert_eq!(link["originalUrl"], "https://site0.com");
}

#[tokio::test]
async fn test_delete_link() {
    let server = seeded_server(2).await;

    let response = server.delete("/links/id-0").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body, json!({ "success": true, "id": "id-0" }));

    let response = server.delete("/links/id-0").await;
    assert_eq!(response.status_code(), 404);

    let response = server.get("/redirect/id-0").await;
    assert_eq!(response.status_code(), 404);

    let remaining: Vec<Value> = server.get("/links").await.json();
    assert_eq!(remaining.len(), 1);
}

#[tokio::test]
async fn test_list_links_non_numeric_limit_uses_error_format() {
    let server = seeded_server(1).await;

    let response = server.get("/links").add_query_param("limit", "ten").await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_input");
}

#[tokio::test]
async fn test_update_link_wrong_type_uses_error_format() {
    let server = seeded_server(1).await;

    let response = server
        .put("/links/id-0")
        .json(&json!({ "originalUrl": false }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_input");

    let link: Value = server.get("/links/id-0").await.json();
    assert_eq!(link["originalUrl"], "https://site0.com");
}
