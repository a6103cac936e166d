use pixshare_shared::protocol::{GetProfileRequest, SearchUsersRequest, UpdateProfileRequest};
use pixshare_shared::{UpdateProfileData, User, UserProfile};

use crate::api::ApiClient;
use crate::error::ApiResponse;
use crate::request::HttpClient;
use crate::storage::Storage;

pub struct UserService<'a, C, S> {
    api: &'a ApiClient<C, S>,
}

impl<'a, C: HttpClient, S: Storage> UserService<'a, C, S> {
    pub(super) fn new(api: &'a ApiClient<C, S>) -> Self {
        Self { api }
    }

    pub async fn profile(&self, username: &str) -> ApiResponse<UserProfile> {
        self.api
            .send(&GetProfileRequest {
                username: username.to_string(),
            })
            .await
            .map_err(|e| e.in_op_with("users.profile", username))
    }

    /// 只能修改自己的资料
    pub async fn update_my_profile(&self, data: UpdateProfileData) -> ApiResponse<UserProfile> {
        let username = self
            .api
            .require_username()
            .map_err(|e| e.in_op("users.update_profile"))?;

        self.api
            .send(&UpdateProfileRequest {
                username: username.clone(),
                data,
            })
            .await
            .map_err(|e| e.in_op_with("users.update_profile", username))
    }

    /// 空白关键字直接返回空列表，不发请求
    pub async fn search(&self, query: &str) -> ApiResponse<Vec<User>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        self.api
            .send(&SearchUsersRequest {
                query: query.to_string(),
            })
            .await
            .map_err(|e| e.in_op_with("users.search", query))
    }
}
