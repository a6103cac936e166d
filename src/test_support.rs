//! 测试辅助：可编排响应的 HTTP 客户端与 Token 构造

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::Value;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResponse};
use crate::request::{HttpClient, HttpRequest, HttpResponse};
use crate::storage::{MemoryStorage, Storage};

pub const TEST_BASE_URL: &str = "http://api.test";

/// 记录所有请求并按顺序回放预设响应
#[derive(Default)]
pub struct MockHttpClient {
    requests: RefCell<Vec<HttpRequest>>,
    responses: RefCell<VecDeque<ApiResponse<HttpResponse>>>,
}

impl MockHttpClient {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: Value) {
        self.respond_raw(status, &body.to_string());
    }

    pub fn respond_raw(&self, status: u16, body: &str) {
        self.responses
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    pub fn fail(&self, message: &str) {
        self.responses
            .borrow_mut()
            .push_back(Err(ApiError::transport(message)));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResponse<HttpResponse> {
        self.requests.borrow_mut().push(req);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::transport("no mocked response")))
    }
}

/// 可以写入但删除总是失败的存储（模拟浏览器拒绝删除）
#[derive(Default)]
pub struct StickyStorage(MemoryStorage);

impl Storage for StickyStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key)
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.0.set(key, value)
    }

    fn delete(&self, _key: &str) -> bool {
        false
    }
}

pub type TestClient = ApiClient<Rc<MockHttpClient>, Rc<MemoryStorage>>;

/// 构建指向测试地址的客户端
pub fn test_client(mock: &Rc<MockHttpClient>) -> (TestClient, Rc<MemoryStorage>) {
    let storage = Rc::new(MemoryStorage::new());
    let config = ClientConfig::default().with_base_url(TEST_BASE_URL);
    let client = ApiClient::new(&config, mock.clone(), storage.clone());
    (client, storage)
}

/// 构造 `sub` 为给定用户名的 Token（签名段为占位符）
pub fn token_for(sub: &str) -> String {
    let payload = serde_json::json!({ "sub": sub }).to_string();
    format!(
        "eyJhbGciOiJIUzI1NiJ9.{}.signature",
        URL_SAFE_NO_PAD.encode(payload)
    )
}

/// 以给定用户身份登录的客户端
pub fn logged_in_client(mock: &Rc<MockHttpClient>, username: &str) -> TestClient {
    let (client, _) = test_client(mock);
    client.tokens().set(&token_for(username));
    client
}
