use pixshare_shared::protocol::{LoginRequest, RegisterRequest, ValidateTokenRequest};
use pixshare_shared::{LoginResponse, RegisterResponse, ValidateResponse};

use super::non_blank;
use crate::api::ApiClient;
use crate::error::{ApiError, ApiResponse};
use crate::request::HttpClient;
use crate::storage::Storage;

/// 登录、注册与 Token 校验
pub struct AuthService<'a, C, S> {
    api: &'a ApiClient<C, S>,
}

impl<'a, C: HttpClient, S: Storage> AuthService<'a, C, S> {
    pub(super) fn new(api: &'a ApiClient<C, S>) -> Self {
        Self { api }
    }

    /// 登录成功后把返回的 Token 写入存储
    pub async fn login(&self, username: &str, password: &str) -> ApiResponse<LoginResponse> {
        let req = LoginRequest {
            username: non_blank(username, "username")?,
            password: password.to_string(),
        };
        if req.password.is_empty() {
            return Err(ApiError::invalid_input("password must not be empty"));
        }

        let resp = self
            .api
            .send(&req)
            .await
            .map_err(|e| e.in_op_with("auth.login", req.username.clone()))?;

        if resp.token.is_empty() {
            return Err(ApiError::rejected("Login response carried no token")
                .in_op_with("auth.login", req.username));
        }
        self.api.tokens().set(&resp.token);
        log::info!("logged in as {}", req.username);
        Ok(resp)
    }

    /// 注册不会自动登录
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ApiResponse<RegisterResponse> {
        let req = RegisterRequest {
            username: non_blank(username, "username")?,
            email: non_blank(email, "email")?,
            password: password.to_string(),
        };
        if req.password.is_empty() {
            return Err(ApiError::invalid_input("password must not be empty"));
        }

        self.api
            .send(&req)
            .await
            .map_err(|e| e.in_op_with("auth.register", req.username.clone()))
    }

    pub async fn validate(&self) -> ApiResponse<ValidateResponse> {
        self.api
            .send(&ValidateTokenRequest)
            .await
            .map_err(|e| e.in_op("auth.validate"))
    }

    /// 清除本地 Token，返回是否真正删除成功
    pub fn logout(&self) -> bool {
        let cleared = self.api.tokens().clear();
        if cleared {
            log::info!("logged out");
        }
        cleared
    }
}
