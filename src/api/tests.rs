use super::*;
use crate::error::ApiErrorKind;
use crate::test_support::{MockHttpClient, TEST_BASE_URL, logged_in_client, test_client, token_for};
use pixshare_shared::protocol::{DeletePostRequest, ListPostsRequest};
use pixshare_shared::{Ack, Post};
use serde_json::json;

// =========================================================
// Header construction
// =========================================================

#[test]
fn test_headers_without_token() {
    let mock = MockHttpClient::new();
    let (client, _) = test_client(&mock);

    let headers = client.build_headers(&[]);
    assert_eq!(
        headers,
        vec![("Content-Type".to_string(), "application/json".to_string())]
    );
}

#[test]
fn test_headers_with_token_and_caller_override() {
    let mock = MockHttpClient::new();
    let client = logged_in_client(&mock, "alice");
    let token = token_for("alice");

    let req = client.build_request(
        "/api/posts",
        &RequestOptions::get()
            .header("X-Trace", "1")
            .header("content-type", "text/plain"),
    );
    assert_eq!(
        req.header("Authorization"),
        Some(format!("Bearer {}", token).as_str())
    );
    assert_eq!(req.header("Content-Type"), Some("text/plain"));
    assert_eq!(req.header("X-Trace"), Some("1"));
}

#[test]
fn test_clearing_token_removes_authorization_header() {
    let mock = MockHttpClient::new();
    let client = logged_in_client(&mock, "alice");
    assert!(client.build_headers(&[]).iter().any(|(k, _)| k == "Authorization"));

    client.tokens().clear();

    let req = client.build_request("/api/posts", &RequestOptions::get());
    assert!(req.header("Authorization").is_none());
    assert!(!req.headers.iter().any(|(k, _)| k.eq_ignore_ascii_case("authorization")));
}

#[tokio::test]
async fn test_sent_request_omits_authorization_after_logout() {
    let mock = MockHttpClient::new();
    let client = logged_in_client(&mock, "alice");
    client.tokens().clear();
    mock.respond(200, json!([]));

    let posts: ApiResponse<Vec<Post>> = client.request("/api/posts", RequestOptions::get()).await;
    assert_eq!(posts.unwrap(), Vec::new());

    let sent = mock.last_request().unwrap();
    assert!(sent.header("Authorization").is_none());
}

#[test]
fn test_url_building() {
    let mock = MockHttpClient::new();
    let (client, _) = test_client(&mock);

    let req = client.build_request(
        "api/messages",
        &RequestOptions::post()
            .query("username", "alice b")
            .query("text", "hi & bye"),
    );
    assert_eq!(
        req.url,
        format!("{}/api/messages?username=alice%20b&text=hi%20%26%20bye", TEST_BASE_URL)
    );
    assert_eq!(req.method, HttpMethod::Post);
    assert_eq!(req.body, None);
}

// =========================================================
// Response interpretation
// =========================================================

#[tokio::test]
async fn test_envelope_success_round_trips() {
    let mock = MockHttpClient::new();
    let (client, _) = test_client(&mock);
    mock.respond(200, json!({ "success": true, "data": { "id": "42" } }));

    let result: ApiResponse<Value> = client.request("/api/things", RequestOptions::get()).await;
    assert_eq!(result, Ok(json!({ "id": "42" })));
    assert_eq!(
        serde_json::to_value(to_envelope(&result)).unwrap(),
        json!({ "success": true, "data": { "id": "42" } })
    );
}

#[tokio::test]
async fn test_not_found_becomes_failed_envelope() {
    let mock = MockHttpClient::new();
    let (client, _) = test_client(&mock);
    mock.respond(404, json!({ "message": "not found" }));

    let result: ApiResponse<Value> = client.request("/api/posts/9", RequestOptions::get()).await;
    let err = result.clone().unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Status);
    assert_eq!(err.status, Some(404));
    assert_eq!(err.message(), "not found");
    assert_eq!(
        serde_json::to_value(to_envelope(&result)).unwrap(),
        json!({ "success": false, "data": {}, "message": "not found" })
    );
}

#[tokio::test]
async fn test_transport_failure_does_not_panic() {
    let mock = MockHttpClient::new();
    let (client, _) = test_client(&mock);
    mock.fail("connection refused");

    let result: ApiResponse<Vec<Post>> = client.request("/api/posts", RequestOptions::get()).await;
    let err = result.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Transport);
    assert_eq!(err.message(), "connection refused");
    assert_eq!(err.spans()[0].detail.as_deref(), Some("/api/posts"));
}

#[test]
fn test_status_without_message_uses_status_code() {
    let err = interpret::<Value>(&HttpResponse::new(500, "")).unwrap_err();
    assert_eq!(err.message(), "Error: 500");

    let err = interpret::<Value>(&HttpResponse::new(403, r#"{"error":"nope"}"#)).unwrap_err();
    assert_eq!(err.message(), "Error: 403");
}

#[test]
fn test_status_with_unparseable_body_reports_parse_error() {
    let err = interpret::<Value>(&HttpResponse::new(502, "<html>Bad Gateway</html>")).unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Status);
    assert_eq!(err.status, Some(502));
    assert!(err.message().contains("line 1"), "{}", err.message());
}

#[test]
fn test_bare_resource_is_accepted() {
    let posts: Vec<Post> = interpret(&HttpResponse::new(
        200,
        json!([{ "id": "1", "title": "Sunset", "author": "alice", "likes": 2 }]).to_string(),
    ))
    .unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Sunset");
}

#[test]
fn test_rejected_envelope() {
    let err = interpret::<Value>(&HttpResponse::new(
        200,
        json!({ "success": false, "data": {}, "message": "already liked" }).to_string(),
    ))
    .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Rejected);
    assert_eq!(err.message(), "already liked");

    let err = interpret::<Value>(&HttpResponse::new(200, r#"{"success":false}"#)).unwrap_err();
    assert_eq!(err.message(), "Request was not successful");
}

#[test]
fn test_envelope_without_data_decodes_as_null() {
    let ack: Ack = interpret(&HttpResponse::new(200, r#"{"success":true,"message":"ok"}"#)).unwrap();
    assert_eq!(ack, Value::Null);

    let unit: () = interpret(&HttpResponse::new(204, "")).unwrap();
    assert_eq!(unit, ());
}

#[test]
fn test_plain_text_success_body() {
    let ack: Ack = interpret(&HttpResponse::new(200, "Post deleted successfully")).unwrap();
    assert_eq!(ack, json!("Post deleted successfully"));

    let err = interpret::<Post>(&HttpResponse::new(200, "Post deleted successfully")).unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Decode);
    assert_eq!(err.status, Some(200));
}

#[test]
fn test_shape_mismatch_is_decode_error() {
    let err = interpret::<Vec<Post>>(&HttpResponse::new(200, r#"{"id":"1"}"#)).unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Decode);
}

// =========================================================
// Protocol requests
// =========================================================

#[tokio::test]
async fn test_protected_request_without_token_is_not_sent() {
    let mock = MockHttpClient::new();
    let (client, _) = test_client(&mock);

    let err = client
        .send(&DeletePostRequest {
            post_id: "1".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Unauthenticated);
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_public_request_is_sent_without_token() {
    let mock = MockHttpClient::new();
    let (client, _) = test_client(&mock);
    mock.respond(200, json!([]));

    let posts = client.send(&ListPostsRequest).await.unwrap();
    assert!(posts.is_empty());

    let sent = mock.last_request().unwrap();
    assert_eq!(sent.url, format!("{}/api/posts", TEST_BASE_URL));
    assert_eq!(sent.method, HttpMethod::Get);
}

#[test]
fn test_require_username() {
    let mock = MockHttpClient::new();
    let (client, _) = test_client(&mock);
    assert_eq!(
        client.require_username().unwrap_err().kind,
        ApiErrorKind::Unauthenticated
    );

    client.tokens().set("opaque-token");
    assert!(client.require_token().is_ok());
    assert_eq!(
        client.require_username().unwrap_err().kind,
        ApiErrorKind::Unauthenticated
    );

    client.tokens().set(&token_for("alice"));
    assert_eq!(client.require_username().unwrap(), "alice");
}
