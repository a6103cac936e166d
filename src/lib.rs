//! pixshare 客户端核心
//!
//! 与界面无关的部分都在这里：Token 存储、会话解码、API 客户端、
//! 各资源的请求函数以及聊天室轮询器。浏览器相关的实现（LocalStorage、
//! fetch、定时器）由前端 crate 通过 trait 注入。

pub mod api;
pub mod config;
pub mod error;
pub mod poller;
pub mod request;
pub mod services;
pub mod session;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;

pub use pixshare_shared as shared;

pub use api::{ApiClient, RequestOptions, to_envelope};
pub use config::ClientConfig;
pub use error::{ApiError, ApiErrorKind, ApiResponse};
pub use poller::{Poller, PollerState, Scheduler};
pub use request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use session::Session;
pub use storage::{MemoryStorage, Storage, TokenStore};

#[cfg(feature = "native")]
pub use request::ReqwestHttpClient;
