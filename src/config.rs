//! 运行时配置
//!
//! 所有配置项都有默认值；外部来源（环境变量或编译期变量）只做覆盖。

use std::time::Duration;

use pixshare_shared::{DEFAULT_API_BASE_URL, TOKEN_STORAGE_KEY};

pub const ENV_API_BASE_URL: &str = "PIXSHARE_API_BASE_URL";
pub const ENV_TOKEN_KEY: &str = "PIXSHARE_TOKEN_KEY";
pub const ENV_CHAT_POLL_MS: &str = "PIXSHARE_CHAT_POLL_MS";

const DEFAULT_CHAT_POLL_MS: u64 = 3000;

/// 客户端配置
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// 后端地址（不含结尾的 `/`）
    pub api_base_url: String,
    /// Token 在持久化存储中的键名
    pub token_storage_key: String,
    /// 聊天室轮询间隔
    pub chat_poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_storage_key: TOKEN_STORAGE_KEY.to_string(),
            chat_poll_interval: Duration::from_millis(DEFAULT_CHAT_POLL_MS),
        }
    }
}

impl ClientConfig {
    /// 通过查找函数构建配置
    ///
    /// 读不到或解析失败的项使用默认值
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let chat_poll_interval = match non_empty(ENV_CHAT_POLL_MS) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    log::warn!("invalid {}: {:?}, using default", ENV_CHAT_POLL_MS, raw);
                    defaults.chat_poll_interval
                }
            },
            None => defaults.chat_poll_interval,
        };

        Self {
            api_base_url: non_empty(ENV_API_BASE_URL)
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            token_storage_key: non_empty(ENV_TOKEN_KEY).unwrap_or(defaults.token_storage_key),
            chat_poll_interval,
        }
    }

    /// 从进程环境变量读取
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}
