//! 前端使用的 API 客户端
//!
//! 配置来自编译期环境变量；传输层与存储都是无状态的单元结构体，
//! 因此每次调用 [`api()`] 新建客户端的开销可以忽略，也不必在组件之间共享实例。

use pixshare::config::{ENV_API_BASE_URL, ENV_CHAT_POLL_MS, ENV_TOKEN_KEY};
use pixshare::{ApiClient, ClientConfig};

use crate::web::{BrowserHttpClient, BrowserStorage};

pub type Api = ApiClient<BrowserHttpClient, BrowserStorage>;

/// 编译期注入的配置，未设置的项使用默认值
pub fn client_config() -> ClientConfig {
    ClientConfig::from_lookup(|name| {
        let value = match name {
            ENV_API_BASE_URL => option_env!("PIXSHARE_API_BASE_URL"),
            ENV_TOKEN_KEY => option_env!("PIXSHARE_TOKEN_KEY"),
            ENV_CHAT_POLL_MS => option_env!("PIXSHARE_CHAT_POLL_MS"),
            _ => None,
        };
        value.map(str::to_string)
    })
}

pub fn api() -> Api {
    ApiClient::new(&client_config(), BrowserHttpClient, BrowserStorage)
}
