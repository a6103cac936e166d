use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::ApiErrorKind;
use crate::request::{HttpMethod, HttpRequest};
use crate::test_support::{
    MockHttpClient, StickyStorage, TEST_BASE_URL, logged_in_client, test_client, token_for,
};
use pixshare_shared::{CreatePostData, UpdateProfileData};
use serde_json::{Value, json};

fn url(path: &str) -> String {
    format!("{}{}", TEST_BASE_URL, path)
}

fn body_of(req: &HttpRequest) -> Value {
    req.body
        .as_deref()
        .map(|b| serde_json::from_str(b).unwrap())
        .unwrap_or(Value::Null)
}

// =========================================================
// Auth
// =========================================================

#[tokio::test]
async fn test_login_stores_token() {
    let mock = MockHttpClient::new();
    let (client, _) = test_client(&mock);
    let token = token_for("alice");
    mock.respond(200, json!({ "token": token }));

    let resp = client.auth().login("alice", "secret").await.unwrap();
    assert_eq!(resp.token, token);
    assert_eq!(client.tokens().get(), Some(token));
    assert_eq!(client.session().current_username().as_deref(), Some("alice"));

    let sent = mock.last_request().unwrap();
    assert_eq!(sent.url, url("/api/auth/login"));
    assert_eq!(sent.method, HttpMethod::Post);
    assert!(sent.header("Authorization").is_none());
    assert_eq!(body_of(&sent), json!({ "username": "alice", "password": "secret" }));
}

#[tokio::test]
async fn test_failed_login_keeps_store_empty() {
    let mock = MockHttpClient::new();
    let (client, _) = test_client(&mock);
    mock.respond(401, json!({ "message": "Invalid credentials" }));

    let err = client.auth().login("alice", "wrong").await.unwrap_err();
    assert_eq!(err.message(), "Invalid credentials");
    assert!(err.is_unauthenticated());
    assert!(!client.tokens().has_token());
}

#[tokio::test]
async fn test_login_without_token_in_response_is_rejected() {
    let mock = MockHttpClient::new();
    let (client, _) = test_client(&mock);
    mock.respond(200, json!({ "success": true, "data": { "token": "" } }));

    let err = client.auth().login("alice", "secret").await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Rejected);
    assert!(!client.tokens().has_token());
}

#[tokio::test]
async fn test_login_rejects_blank_input_locally() {
    let mock = MockHttpClient::new();
    let (client, _) = test_client(&mock);

    let err = client.auth().login("  ", "secret").await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::InvalidInput);
    let err = client.auth().register("bob", "bob@example.com", "").await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::InvalidInput);
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_register_and_validate() {
    let mock = MockHttpClient::new();
    let client = logged_in_client(&mock, "bob");
    mock.respond(201, json!({ "message": "User registered successfully" }));
    mock.respond(200, json!({ "username": "bob" }));

    let registered = client
        .auth()
        .register("bob", "bob@example.com", "pw")
        .await
        .unwrap();
    assert_eq!(registered.message.as_deref(), Some("User registered successfully"));

    let validated = client.auth().validate().await.unwrap();
    assert_eq!(validated.username, "bob");

    let requests = mock.requests();
    assert_eq!(requests[0].url, url("/api/auth/register"));
    assert_eq!(requests[1].url, url("/api/auth/validate"));
    assert!(requests[1].header("Authorization").is_some());
}

#[tokio::test]
async fn test_logout_clears_session() {
    let mock = MockHttpClient::new();
    let client = logged_in_client(&mock, "alice");

    assert!(client.auth().logout());
    assert!(!client.session().is_authenticated());

    let err = client.auth().validate().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Unauthenticated);
    assert_eq!(mock.request_count(), 0);
}

#[test]
fn test_logout_reports_token_that_could_not_be_removed() {
    let mock = MockHttpClient::new();
    let config = ClientConfig::default().with_base_url(TEST_BASE_URL);
    let client = ApiClient::new(&config, mock.clone(), StickyStorage::default());
    client.tokens().set(&token_for("alice"));

    assert!(!client.auth().logout());
    assert!(client.session().is_authenticated());
}

// =========================================================
// Posts
// =========================================================

#[tokio::test]
async fn test_like_and_unlike_use_current_user() {
    let mock = MockHttpClient::new();
    let client = logged_in_client(&mock, "alice");
    mock.respond_raw(200, "Post liked");
    mock.respond(200, json!({ "success": true, "data": null }));

    client.posts().like("7").await.unwrap();
    client.posts().unlike("7").await.unwrap();

    let requests = mock.requests();
    assert_eq!(requests[0].url, url("/api/posts/7/like?username=alice"));
    assert_eq!(requests[1].url, url("/api/posts/7/unlike?username=alice"));
    assert!(requests.iter().all(|r| r.method == HttpMethod::Post));
}

#[tokio::test]
async fn test_privileged_post_actions_without_token_send_nothing() {
    let mock = MockHttpClient::new();
    let (client, _) = test_client(&mock);

    let like = client.posts().like("1").await.unwrap_err();
    let comment = client.posts().comment("1", "nice").await.unwrap_err();
    let delete = client.posts().delete("1").await.unwrap_err();

    for err in [like, comment, delete] {
        assert_eq!(err.kind, ApiErrorKind::Unauthenticated);
    }
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_comment_sends_query_and_body() {
    let mock = MockHttpClient::new();
    let client = logged_in_client(&mock, "alice");
    mock.respond(200, json!({ "id": "c1" }));

    client.posts().comment("3", "  lovely light  ").await.unwrap();

    let sent = mock.last_request().unwrap();
    assert_eq!(
        sent.url,
        url("/api/posts/3/comments?username=alice&text=lovely%20light")
    );
    assert_eq!(body_of(&sent), json!({ "username": "alice", "text": "lovely light" }));

    let err = client.posts().comment("3", "   ").await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::InvalidInput);
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn test_create_post_fills_author() {
    let mock = MockHttpClient::new();
    let client = logged_in_client(&mock, "alice");
    mock.respond(
        201,
        json!({ "id": "11", "title": "Dunes", "author": "alice", "imageUrl": "d.jpg" }),
    );

    let post = client
        .posts()
        .create(CreatePostData {
            title: " Dunes ".to_string(),
            description: String::new(),
            image_url: "d.jpg".to_string(),
            author: String::new(),
            group_id: Some("g1".to_string()),
            article: None,
        })
        .await
        .unwrap();
    assert_eq!(post.id, "11");

    let sent = mock.last_request().unwrap();
    assert_eq!(sent.url, url("/api/posts"));
    assert_eq!(
        body_of(&sent),
        json!({
            "title": "Dunes", "description": "", "imageUrl": "d.jpg",
            "author": "alice", "groupId": "g1"
        })
    );
}

#[tokio::test]
async fn test_posts_by_author_filters_locally() {
    let mock = MockHttpClient::new();
    let (client, _) = test_client(&mock);
    mock.respond(
        200,
        json!([
            { "id": "1", "title": "a", "author": "alice" },
            { "id": "2", "title": "b", "author": "bob" },
            { "id": "3", "title": "c", "author": "alice" }
        ]),
    );

    let posts = client.posts().by_author("alice").await.unwrap();
    let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
    assert_eq!(mock.last_request().unwrap().url, url("/api/posts"));
}

#[tokio::test]
async fn test_post_detail_error_carries_trace() {
    let mock = MockHttpClient::new();
    let (client, _) = test_client(&mock);
    mock.respond(404, json!({ "message": "Post not found" }));

    let err = client.posts().get("a/b").await.unwrap_err();
    assert_eq!(err.status, Some(404));
    assert_eq!(
        err.to_string(),
        "[HTTP_STATUS_ERROR] Post not found | trace: api.request(/api/posts/a%2Fb) -> posts.get(a/b)"
    );
}

// =========================================================
// Groups
// =========================================================

#[tokio::test]
async fn test_create_group_as_current_user() {
    let mock = MockHttpClient::new();
    let client = logged_in_client(&mock, "alice");
    mock.respond(200, json!({ "success": true, "data": { "id": "g9" } }));

    let created = client.groups().create("Night Sky", "stars").await.unwrap();
    assert_eq!(created.id.as_deref(), Some("g9"));
    assert_eq!(
        body_of(&mock.last_request().unwrap()),
        json!({ "name": "Night Sky", "description": "stars", "createdBy": "alice" })
    );

    let err = client.groups().create(" ", "").await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::InvalidInput);
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn test_join_leave_and_members() {
    let mock = MockHttpClient::new();
    let client = logged_in_client(&mock, "bob");
    mock.respond(200, json!({ "joined": true }));
    mock.respond(200, json!({ "joined": false }));
    mock.respond(200, json!({}));
    mock.respond(200, json!([{ "id": "1", "username": "alice", "email": "a@x" }]));
    mock.respond(200, json!({}));

    let groups = client.groups();
    groups.join("g1").await.unwrap();
    groups.leave("g1").await.unwrap();
    groups.add_member("g1", " carol ").await.unwrap();
    let members = groups.members("g1").await.unwrap();
    groups.remove_member("g1", "carol").await.unwrap();

    assert_eq!(members[0].username, "alice");

    let requests = mock.requests();
    let lines: Vec<_> = requests
        .iter()
        .map(|r| format!("{} {}", r.method.as_str(), r.url.trim_start_matches(TEST_BASE_URL)))
        .collect();
    assert_eq!(
        lines,
        vec![
            "POST /api/groups/g1/join?username=bob",
            "POST /api/groups/g1/leave?username=bob",
            "POST /api/groups/g1/add-member",
            "GET /api/groups/g1/members",
            "DELETE /api/groups/g1/members/carol",
        ]
    );
    assert_eq!(body_of(&requests[2]), json!({ "username": "carol" }));
}

// =========================================================
// Notifications & users
// =========================================================

#[tokio::test]
async fn test_my_notifications() {
    let mock = MockHttpClient::new();
    let client = logged_in_client(&mock, "alice");
    mock.respond(
        200,
        json!([{ "id": "n1", "recipient": "alice", "message": "bob liked your post", "read": false }]),
    );
    mock.respond_raw(200, "");

    let list = client.notifications().mine().await.unwrap();
    assert_eq!(list.len(), 1);
    client.notifications().mark_read("n1").await.unwrap();

    let requests = mock.requests();
    assert_eq!(requests[0].url, url("/api/notifications/user/alice"));
    assert_eq!(requests[1].url, url("/api/notifications/n1/read"));
}

#[tokio::test]
async fn test_notifications_require_login() {
    let mock = MockHttpClient::new();
    let (client, _) = test_client(&mock);

    let err = client.notifications().mine().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Unauthenticated);
    let err = client.notifications().for_user("alice").await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Unauthenticated);
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_profile_update_targets_current_user() {
    let mock = MockHttpClient::new();
    let client = logged_in_client(&mock, "alice");
    mock.respond(200, json!({ "username": "alice", "email": "a@x", "bio": "hi" }));

    let profile = client
        .users()
        .update_my_profile(UpdateProfileData {
            profile_picture: "p.png".to_string(),
            bio: "hi".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(profile.bio.as_deref(), Some("hi"));

    let sent = mock.last_request().unwrap();
    assert_eq!(sent.method, HttpMethod::Put);
    assert_eq!(sent.url, url("/api/users/alice"));
    assert_eq!(body_of(&sent), json!({ "profilePicture": "p.png", "bio": "hi" }));
}

#[tokio::test]
async fn test_search_users() {
    let mock = MockHttpClient::new();
    let (client, _) = test_client(&mock);
    mock.respond(200, json!([{ "username": "ann lee" }]));

    assert!(client.users().search("   ").await.unwrap().is_empty());
    assert_eq!(mock.request_count(), 0);

    let found = client.users().search("ann lee").await.unwrap();
    assert_eq!(found[0].username, "ann lee");
    assert_eq!(mock.last_request().unwrap().url, url("/api/users/search?q=ann%20lee"));
}

// =========================================================
// Chat
// =========================================================

#[tokio::test]
async fn test_send_chat_message_trims_text() {
    let mock = MockHttpClient::new();
    let client = logged_in_client(&mock, "alice");
    mock.respond_raw(200, "Message sent");

    client.chat().send("  hello there \n").await.unwrap();
    assert_eq!(
        mock.last_request().unwrap().url,
        url("/api/messages?username=alice&text=hello%20there")
    );

    let err = client.chat().send(" \t ").await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::InvalidInput);
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn test_edit_and_delete_chat_message() {
    let mock = MockHttpClient::new();
    let client = logged_in_client(&mock, "alice");
    mock.respond(200, json!({}));
    mock.respond(200, json!({}));
    mock.respond(200, json!([{ "id": "m1", "username": "alice", "text": "edited" }]));

    client.chat().edit("m1", "edited").await.unwrap();
    client.chat().delete("m2").await.unwrap();
    let messages = client.chat().list().await.unwrap();
    assert_eq!(messages[0].text, "edited");

    let requests = mock.requests();
    assert_eq!(requests[0].method, HttpMethod::Put);
    assert_eq!(requests[0].url, url("/api/messages/m1?updatedText=edited"));
    assert_eq!(requests[1].method, HttpMethod::Delete);
    assert_eq!(requests[1].url, url("/api/messages/m2"));
    assert!(requests[2].header("Authorization").is_some());
}
