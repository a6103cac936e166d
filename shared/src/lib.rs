use serde::{Deserialize, Serialize};

pub mod date;
pub mod envelope;
pub mod protocol;
pub mod share;

pub use envelope::{Envelope, ErrorBody};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const TOKEN_STORAGE_KEY: &str = "token";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const BEARER_PREFIX: &str = "Bearer ";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 点赞信息
///
/// 服务端在不同接口中返回点赞数或点赞用户列表，两种形态都要能解析。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Likes {
    Count(u64),
    Users(Vec<String>),
}

impl Default for Likes {
    fn default() -> Self {
        Likes::Count(0)
    }
}

impl Likes {
    pub fn count(&self) -> u64 {
        match self {
            Likes::Count(n) => *n,
            Likes::Users(users) => users.len() as u64,
        }
    }

    /// 只有用户列表形态才能判断某人是否点过赞
    pub fn liked_by(&self, username: &str) -> bool {
        match self {
            Likes::Count(_) => false,
            Likes::Users(users) => users.iter().any(|u| u == username),
        }
    }

    pub fn add(&mut self, username: &str) {
        match self {
            Likes::Count(n) => *n += 1,
            Likes::Users(users) => {
                if !users.iter().any(|u| u == username) {
                    users.push(username.to_string());
                }
            }
        }
    }

    pub fn remove(&mut self, username: &str) {
        match self {
            Likes::Count(n) => *n = n.saturating_sub(1),
            Likes::Users(users) => users.retain(|u| u != username),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub post_id: String,
    pub content: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub username: String,
    pub text: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    pub author: String,
    #[serde(default)]
    pub likes: Likes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u64>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article: Option<Article>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Post {
    /// 评论数：优先使用服务端给出的计数
    pub fn comment_total(&self) -> u64 {
        self.comment_count
            .unwrap_or_else(|| self.comments.len() as u64)
    }

    pub fn is_liked_by(&self, username: &str) -> bool {
        self.liked.unwrap_or(false) || self.likes.liked_by(username)
    }
}

/// 信息流排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostOrder {
    /// 按 id 倒序（服务端 id 单调递增）
    #[default]
    Latest,
    /// 按点赞数倒序
    Popular,
}

/// 按给定方式排序帖子
///
/// 非数字 id 视为 0，排在最后，稳定排序保持其原有顺序。
pub fn sort_posts(posts: &mut [Post], order: PostOrder) {
    match order {
        PostOrder::Latest => {
            posts.sort_by_key(|p| std::cmp::Reverse(p.id.parse::<i64>().unwrap_or(0)))
        }
        PostOrder::Popular => posts.sort_by_key(|p| std::cmp::Reverse(p.likes.count())),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMessage {
    pub id: String,
    pub username: String,
    pub text: String,
    #[serde(default)]
    pub created_at: String,
}

/// 聊天室消息与群组消息结构一致
pub type ChatMessage = GroupMessage;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// 群组成员信息
///
/// 列表接口返回成员数，详情接口返回用户名列表或用户对象列表。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupMembers {
    Count(u64),
    Usernames(Vec<String>),
    Users(Vec<User>),
}

impl Default for GroupMembers {
    fn default() -> Self {
        GroupMembers::Count(0)
    }
}

impl GroupMembers {
    pub fn count(&self) -> u64 {
        match self {
            GroupMembers::Count(n) => *n,
            GroupMembers::Usernames(names) => names.len() as u64,
            GroupMembers::Users(users) => users.len() as u64,
        }
    }

    pub fn contains(&self, username: &str) -> bool {
        match self {
            GroupMembers::Count(_) => false,
            GroupMembers::Usernames(names) => names.iter().any(|n| n == username),
            GroupMembers::Users(users) => users.iter().any(|u| u.username == username),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub members: GroupMembers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined: Option<bool>,
    #[serde(default)]
    pub messages: Vec<GroupMessage>,
    #[serde(default)]
    pub posts: Vec<Post>,
}

impl Group {
    pub fn is_member(&self, username: &str) -> bool {
        self.joined.unwrap_or(false) || self.members.contains(username)
    }

    /// 群组创建者即管理员
    pub fn is_admin(&self, username: &str) -> bool {
        !username.is_empty() && self.created_by == username
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(default)]
    pub recipient: String,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: String,
}

pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<String>,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

// =========================================================
// 请求载荷 (Request Payloads)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleInput {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostData {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<ArticleInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostData {
    pub title: String,
    pub description: String,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<ArticleInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupData {
    pub name: String,
    pub description: String,
    pub created_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateGroupData {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileData {
    pub profile_picture: String,
    pub bio: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsernameBody {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentBody {
    pub username: String,
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ValidateResponse {
    pub username: String,
}

/// 创建类接口的响应
///
/// 服务端可能返回 `{ id }` 或整个资源，这里只关心 id。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Created {
    #[serde(default)]
    pub id: Option<String>,
}

/// 服务端的确认型响应（可能为空、字符串或任意 JSON）
pub type Ack = serde_json::Value;
