use crate::{
    Ack, CommentBody, CreateGroupData, CreatePostData, Created, Group, GroupMessage, LoginResponse,
    Notification, Post, RegisterResponse, UpdateGroupData, UpdatePostData, UpdateProfileData, User,
    UserProfile, UsernameBody, ValidateResponse,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use urlencoding::encode;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether a bearer token must be present before the request is sent.
    const REQUIRES_AUTH: bool;

    /// The URL path, with path parameters already percent-encoded.
    fn path(&self) -> String;

    /// Query parameters (unencoded).
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// JSON body, if any.
    fn body(&self) -> serde_json::Result<Option<Value>> {
        Ok(None)
    }
}

fn json_body<T: Serialize>(value: &T) -> serde_json::Result<Option<Value>> {
    serde_json::to_value(value).map(Some)
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        "/api/auth/login".to_string()
    }

    fn body(&self) -> serde_json::Result<Option<Value>> {
        json_body(self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl ApiRequest for RegisterRequest {
    type Response = RegisterResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        "/api/auth/register".to_string()
    }

    fn body(&self) -> serde_json::Result<Option<Value>> {
        json_body(self)
    }
}

/// Ask the server whether the stored token is still valid.
#[derive(Debug, Clone)]
pub struct ValidateTokenRequest;

impl ApiRequest for ValidateTokenRequest {
    type Response = ValidateResponse;
    const METHOD: HttpMethod = HttpMethod::Get;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        "/api/auth/validate".to_string()
    }
}

// =========================================================
// Posts
// =========================================================

#[derive(Debug, Clone)]
pub struct ListPostsRequest;

impl ApiRequest for ListPostsRequest {
    type Response = Vec<Post>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        "/api/posts".to_string()
    }
}

#[derive(Debug, Clone)]
pub struct GetPostRequest {
    pub post_id: String,
}

impl ApiRequest for GetPostRequest {
    type Response = Post;
    const METHOD: HttpMethod = HttpMethod::Get;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        format!("/api/posts/{}", encode(&self.post_id))
    }
}

#[derive(Debug, Clone)]
pub struct CreatePostRequest {
    pub data: CreatePostData,
}

impl ApiRequest for CreatePostRequest {
    type Response = Post;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        "/api/posts".to_string()
    }

    fn body(&self) -> serde_json::Result<Option<Value>> {
        json_body(&self.data)
    }
}

#[derive(Debug, Clone)]
pub struct UpdatePostRequest {
    pub post_id: String,
    pub data: UpdatePostData,
}

impl ApiRequest for UpdatePostRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Put;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        format!("/api/posts/{}", encode(&self.post_id))
    }

    fn body(&self) -> serde_json::Result<Option<Value>> {
        json_body(&self.data)
    }
}

#[derive(Debug, Clone)]
pub struct DeletePostRequest {
    pub post_id: String,
}

impl ApiRequest for DeletePostRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        format!("/api/posts/{}", encode(&self.post_id))
    }
}

#[derive(Debug, Clone)]
pub struct GroupPostsRequest {
    pub group_id: String,
}

impl ApiRequest for GroupPostsRequest {
    type Response = Vec<Post>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        format!("/api/posts/group/{}", encode(&self.group_id))
    }
}

/// Like or unlike, depending on `like`.
#[derive(Debug, Clone)]
pub struct LikePostRequest {
    pub post_id: String,
    pub username: String,
    pub like: bool,
}

impl ApiRequest for LikePostRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        let action = if self.like { "like" } else { "unlike" };
        format!("/api/posts/{}/{}", encode(&self.post_id), action)
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("username", self.username.clone())]
    }
}

/// The server reads the comment from the query string; the body mirrors it.
#[derive(Debug, Clone)]
pub struct AddCommentRequest {
    pub post_id: String,
    pub comment: CommentBody,
}

impl ApiRequest for AddCommentRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        format!("/api/posts/{}/comments", encode(&self.post_id))
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("username", self.comment.username.clone()),
            ("text", self.comment.text.clone()),
        ]
    }

    fn body(&self) -> serde_json::Result<Option<Value>> {
        json_body(&self.comment)
    }
}

// =========================================================
// Groups
// =========================================================

#[derive(Debug, Clone)]
pub struct ListGroupsRequest;

impl ApiRequest for ListGroupsRequest {
    type Response = Vec<Group>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        "/api/groups".to_string()
    }
}

#[derive(Debug, Clone)]
pub struct GetGroupRequest {
    pub group_id: String,
}

impl ApiRequest for GetGroupRequest {
    type Response = Group;
    const METHOD: HttpMethod = HttpMethod::Get;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        format!("/api/groups/{}", encode(&self.group_id))
    }
}

#[derive(Debug, Clone)]
pub struct CreateGroupRequest {
    pub data: CreateGroupData,
}

impl ApiRequest for CreateGroupRequest {
    type Response = Created;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        "/api/groups".to_string()
    }

    fn body(&self) -> serde_json::Result<Option<Value>> {
        json_body(&self.data)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateGroupRequest {
    pub group_id: String,
    pub data: UpdateGroupData,
}

impl ApiRequest for UpdateGroupRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Put;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        format!("/api/groups/{}", encode(&self.group_id))
    }

    fn body(&self) -> serde_json::Result<Option<Value>> {
        json_body(&self.data)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteGroupRequest {
    pub group_id: String,
}

impl ApiRequest for DeleteGroupRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        format!("/api/groups/{}", encode(&self.group_id))
    }
}

/// Join or leave, depending on `join`.
#[derive(Debug, Clone)]
pub struct MembershipRequest {
    pub group_id: String,
    pub username: String,
    pub join: bool,
}

impl ApiRequest for MembershipRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        let action = if self.join { "join" } else { "leave" };
        format!("/api/groups/{}/{}", encode(&self.group_id), action)
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("username", self.username.clone())]
    }
}

#[derive(Debug, Clone)]
pub struct AddMemberRequest {
    pub group_id: String,
    pub member: UsernameBody,
}

impl ApiRequest for AddMemberRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        format!("/api/groups/{}/add-member", encode(&self.group_id))
    }

    fn body(&self) -> serde_json::Result<Option<Value>> {
        json_body(&self.member)
    }
}

#[derive(Debug, Clone)]
pub struct GroupMembersRequest {
    pub group_id: String,
}

impl ApiRequest for GroupMembersRequest {
    type Response = Vec<User>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        format!("/api/groups/{}/members", encode(&self.group_id))
    }
}

#[derive(Debug, Clone)]
pub struct RemoveMemberRequest {
    pub group_id: String,
    pub username: String,
}

impl ApiRequest for RemoveMemberRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        format!(
            "/api/groups/{}/members/{}",
            encode(&self.group_id),
            encode(&self.username)
        )
    }
}

// =========================================================
// Notifications
// =========================================================

#[derive(Debug, Clone)]
pub struct UserNotificationsRequest {
    pub username: String,
}

impl ApiRequest for UserNotificationsRequest {
    type Response = Vec<Notification>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        format!("/api/notifications/user/{}", encode(&self.username))
    }
}

#[derive(Debug, Clone)]
pub struct MarkNotificationReadRequest {
    pub notification_id: String,
}

impl ApiRequest for MarkNotificationReadRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        format!("/api/notifications/{}/read", encode(&self.notification_id))
    }
}

// =========================================================
// Users
// =========================================================

#[derive(Debug, Clone)]
pub struct GetProfileRequest {
    pub username: String,
}

impl ApiRequest for GetProfileRequest {
    type Response = UserProfile;
    const METHOD: HttpMethod = HttpMethod::Get;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        format!("/api/users/{}", encode(&self.username))
    }
}

#[derive(Debug, Clone)]
pub struct UpdateProfileRequest {
    pub username: String,
    pub data: UpdateProfileData,
}

impl ApiRequest for UpdateProfileRequest {
    type Response = UserProfile;
    const METHOD: HttpMethod = HttpMethod::Put;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        format!("/api/users/{}", encode(&self.username))
    }

    fn body(&self) -> serde_json::Result<Option<Value>> {
        json_body(&self.data)
    }
}

#[derive(Debug, Clone)]
pub struct SearchUsersRequest {
    pub query: String,
}

impl ApiRequest for SearchUsersRequest {
    type Response = Vec<User>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        "/api/users/search".to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("q", self.query.clone())]
    }
}

// =========================================================
// Chat room
// =========================================================

#[derive(Debug, Clone)]
pub struct ListMessagesRequest;

impl ApiRequest for ListMessagesRequest {
    type Response = Vec<GroupMessage>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        "/api/messages".to_string()
    }
}

#[derive(Debug, Clone)]
pub struct SendMessageRequest {
    pub username: String,
    pub text: String,
}

impl ApiRequest for SendMessageRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        "/api/messages".to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("username", self.username.clone()),
            ("text", self.text.clone()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct EditMessageRequest {
    pub message_id: String,
    pub updated_text: String,
}

impl ApiRequest for EditMessageRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Put;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        format!("/api/messages/{}", encode(&self.message_id))
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("updatedText", self.updated_text.clone())]
    }
}

#[derive(Debug, Clone)]
pub struct DeleteMessageRequest {
    pub message_id: String,
}

impl ApiRequest for DeleteMessageRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        format!("/api/messages/{}", encode(&self.message_id))
    }
}
