//! API 客户端
//!
//! 所有对后端的调用都经过 [`ApiClient`]：
//! 1. 组装请求头（JSON 内容类型 + 可选的 Bearer Token + 调用方自定义头）
//! 2. 通过注入的 [`HttpClient`] 发送
//! 3. 把传输失败、非 2xx、响应体解析失败统一转换为 [`ApiError`]
//!
//! 调用方只需要根据 `Result` 分支，不会遇到 panic。

use pixshare_shared::protocol::ApiRequest;
use pixshare_shared::{
    BEARER_PREFIX, CONTENT_TYPE_JSON, Envelope, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use urlencoding::encode;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResponse};
use crate::request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::session::Session;
use crate::storage::{Storage, TokenStore};

/// 单次请求的可选项
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub method: HttpMethod,
    /// 调用方自定义请求头，同名时覆盖默认头
    pub headers: Vec<(String, String)>,
    /// 查询参数（未编码）
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(HttpMethod::Get)
    }
}

impl RequestOptions {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get() -> Self {
        Self::new(HttpMethod::Get)
    }

    pub fn post() -> Self {
        Self::new(HttpMethod::Post)
    }

    pub fn put() -> Self {
        Self::new(HttpMethod::Put)
    }

    pub fn delete() -> Self {
        Self::new(HttpMethod::Delete)
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// API 客户端
///
/// 持有传输层和 Token 存储，本身无其他状态。
pub struct ApiClient<C, S> {
    http: C,
    tokens: TokenStore<S>,
    base_url: String,
}

impl<C: HttpClient, S: Storage> ApiClient<C, S> {
    pub fn new(config: &ClientConfig, http: C, storage: S) -> Self {
        Self {
            http,
            tokens: TokenStore::with_key(storage, config.token_storage_key.clone()),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &TokenStore<S> {
        &self.tokens
    }

    pub fn session(&self) -> Session {
        self.tokens.session()
    }

    fn url(&self, path: &str, query: &[(String, String)]) -> String {
        let mut url = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };

        for (i, (key, value)) in query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(&encode(key));
            url.push('=');
            url.push_str(&encode(value));
        }
        url
    }

    /// 组装请求头
    ///
    /// 只有 TokenStore 中存在 Token 时才带 `Authorization`。
    pub fn build_headers(&self, extra: &[(String, String)]) -> Vec<(String, String)> {
        let mut req = HttpRequest::new("", HttpMethod::Get)
            .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON);

        if let Some(token) = self.tokens.get() {
            req = req.with_header(HEADER_AUTHORIZATION, &format!("{}{}", BEARER_PREFIX, token));
        }

        for (key, value) in extra {
            req = req.with_header(key, value);
        }
        req.headers
    }

    /// 构建完整请求（不发送）
    pub fn build_request(&self, path: &str, options: &RequestOptions) -> HttpRequest {
        HttpRequest {
            url: self.url(path, &options.query),
            method: options.method,
            headers: self.build_headers(&options.headers),
            body: options.body.as_ref().map(Value::to_string),
        }
    }

    /// 发送请求并解析为统一结果
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ApiResponse<T> {
        let req = self.build_request(path, &options);
        log::debug!("{} {}", req.method.as_str(), req.url);

        let result = match self.http.send(req).await {
            Ok(resp) => interpret(&resp),
            Err(e) => Err(e),
        };

        result.map_err(|e| {
            log::error!("API request failed: {} {}: {}", options.method.as_str(), path, e);
            e.in_op_with("api.request", path)
        })
    }

    /// 发送协议中定义的请求
    ///
    /// 需要认证的接口在未登录时直接返回错误，不会发出请求。
    pub async fn send<R: ApiRequest>(&self, req: &R) -> ApiResponse<R::Response> {
        let path = req.path();

        if R::REQUIRES_AUTH && !self.tokens.has_token() {
            log::warn!("refusing {} {}: no token", R::METHOD.as_str(), path);
            return Err(ApiError::unauthenticated("No token found").in_op_with("api.send", path));
        }

        let mut options = RequestOptions::new(R::METHOD);
        options.query = req
            .query()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        options.body = req.body().map_err(|e| {
            ApiError::invalid_input(format!("failed to encode request body: {}", e))
                .in_op_with("api.send", path.clone())
        })?;

        self.request(&path, options).await
    }

    /// 需要 Token 的本地前置检查
    pub fn require_token(&self) -> ApiResponse<String> {
        self.tokens
            .get()
            .ok_or_else(|| ApiError::unauthenticated("No token found"))
    }

    /// 需要当前用户名的本地前置检查
    pub fn require_username(&self) -> ApiResponse<String> {
        self.require_token()?;
        self.session()
            .current_username()
            .ok_or_else(|| ApiError::unauthenticated("Token carries no username"))
    }
}

/// 解释 HTTP 响应
///
/// - 非 2xx：优先使用响应体中的 `message`，否则为 `Error: <status>`；
///   响应体不是合法 JSON 时使用解析错误信息
/// - 2xx 且为信封：按信封的 `success` 判定
/// - 2xx 且为裸资源：整个响应体即数据
/// - 2xx 空响应体：按 `null` 解析（适用于 `()` 与 `Value`）
pub fn interpret<T: DeserializeOwned>(resp: &HttpResponse) -> ApiResponse<T> {
    let raw = resp.body.trim();
    let parsed: serde_json::Result<Value> = if raw.is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_str(raw)
    };

    if !resp.ok() {
        let message = match &parsed {
            Ok(value) => value
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Error: {}", resp.status)),
            Err(e) => e.to_string(),
        };
        return Err(ApiError::status(resp.status, message));
    }

    let mut value = match parsed {
        Ok(value) => value,
        Err(parse_err) => {
            // 非 JSON 的 2xx 响应体按字符串交给目标类型，能接受字符串的类型（如 Ack）照常成功
            return serde_json::from_value(Value::String(resp.body.clone()))
                .map_err(|_| ApiError::decode(parse_err.to_string()).with_status(resp.status));
        }
    };

    let data = if Envelope::detect(&value) {
        if value["success"] != Value::Bool(true) {
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Request was not successful");
            return Err(ApiError::rejected(message).with_status(resp.status));
        }
        value.get_mut("data").map(Value::take).unwrap_or(Value::Null)
    } else {
        value
    };

    serde_json::from_value(data)
        .map_err(|e| ApiError::decode(e.to_string()).with_status(resp.status))
}

/// 把统一结果投影为线上信封格式
///
/// 成功：`{ success: true, data }`；失败：`{ success: false, data: {}, message }`
pub fn to_envelope<T: Serialize>(result: &ApiResponse<T>) -> Envelope<Value> {
    match result {
        Ok(data) => match serde_json::to_value(data) {
            Ok(value) => Envelope::ok(value),
            Err(e) => Envelope::failure(e.to_string()),
        },
        Err(e) => Envelope::failure(e.message.clone()),
    }
}

#[cfg(test)]
mod tests;
