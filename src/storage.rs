//! 持久化存储与 Token 存储
//!
//! `Storage` 抽象了浏览器 LocalStorage 这类键值存储，
//! `TokenStore` 在其上固定一个键，只保存 Bearer Token 字符串。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use pixshare_shared::TOKEN_STORAGE_KEY;

use crate::session::Session;

/// 键值存储特性
///
/// 单线程访问，不需要任何同步。
pub trait Storage {
    /// 获取存储的字符串值，键不存在或发生错误时返回 None
    fn get(&self, key: &str) -> Option<String>;

    /// 设置存储值，返回操作是否成功
    fn set(&self, key: &str, value: &str) -> bool;

    /// 删除存储的键值对，返回操作是否成功
    fn delete(&self, key: &str) -> bool;
}

impl<S: Storage + ?Sized> Storage for Rc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> bool {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> bool {
        (**self).delete(key)
    }
}

/// 内存存储
///
/// 用于原生环境和测试；进程退出即丢失。
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.items.borrow_mut().remove(key);
        true
    }
}

/// Token 存储
///
/// 登录时写入，每次带认证的请求读取，登出时清除。不记录过期时间。
#[derive(Debug, Clone)]
pub struct TokenStore<S> {
    storage: S,
    key: String,
}

impl<S: Storage> TokenStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, TOKEN_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// 读取 Token；空字符串视为不存在
    pub fn get(&self) -> Option<String> {
        self.storage.get(&self.key).filter(|t| !t.is_empty())
    }

    pub fn set(&self, token: &str) -> bool {
        let ok = self.storage.set(&self.key, token);
        if !ok {
            log::warn!("token could not be persisted under {:?}", self.key);
        }
        ok
    }

    pub fn clear(&self) -> bool {
        let ok = self.storage.delete(&self.key);
        if !ok {
            log::warn!("token under {:?} could not be removed", self.key);
        }
        ok
    }

    pub fn has_token(&self) -> bool {
        self.get().is_some()
    }

    /// 基于当前存储内容的会话视图
    pub fn session(&self) -> Session {
        Session::from_token(self.get())
    }
}
