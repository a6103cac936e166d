//! 各资源的请求函数
//!
//! 每组函数只是把固定的接口模板交给 [`ApiClient::send`]，不做重试、缓存或去重。
//! 通过 `api.posts()`、`api.groups()` 等访问器取得，借用客户端本身。

mod auth;
mod chat;
mod groups;
mod notifications;
mod posts;
mod users;

pub use auth::AuthService;
pub use chat::ChatService;
pub use groups::GroupService;
pub use notifications::NotificationService;
pub use posts::PostService;
pub use users::UserService;

use crate::api::ApiClient;
use crate::error::{ApiError, ApiResponse};
use crate::request::HttpClient;
use crate::storage::Storage;

impl<C: HttpClient, S: Storage> ApiClient<C, S> {
    pub fn auth(&self) -> AuthService<'_, C, S> {
        AuthService::new(self)
    }

    pub fn posts(&self) -> PostService<'_, C, S> {
        PostService::new(self)
    }

    pub fn groups(&self) -> GroupService<'_, C, S> {
        GroupService::new(self)
    }

    pub fn notifications(&self) -> NotificationService<'_, C, S> {
        NotificationService::new(self)
    }

    pub fn users(&self) -> UserService<'_, C, S> {
        UserService::new(self)
    }

    pub fn chat(&self) -> ChatService<'_, C, S> {
        ChatService::new(self)
    }
}

/// 去掉首尾空白，空字符串视为无效输入
fn non_blank(value: &str, field: &str) -> ApiResponse<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::invalid_input(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests;
