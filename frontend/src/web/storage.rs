//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 替代 `gloo-storage`，并实现核心库的 Token 存储。

use flightontime::token::{TokenProvider, TokenStore};

/// 本地存储操作封装
///
/// 提供静态方法访问浏览器 LocalStorage API。
pub struct LocalStorage;

impl LocalStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 获取存储的字符串值
    ///
    /// # 返回
    /// - `Some(String)` 如果键存在且有值
    /// - `None` 如果键不存在或发生错误
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 设置存储值，返回操作是否成功
    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    /// 删除存储的键值对，返回操作是否成功
    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

/// 持久化在 LocalStorage 中的 Session Token
///
/// 每次读取都直接访问 LocalStorage，API Client 因此总能拿到最新值。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserTokenStore {
    key: String,
}

impl BrowserTokenStore {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }
}

impl TokenProvider for BrowserTokenStore {
    fn token(&self) -> Option<String> {
        LocalStorage::get(&self.key).filter(|t| !t.is_empty())
    }
}

impl TokenStore for BrowserTokenStore {
    fn save(&self, token: &str) {
        if !LocalStorage::set(&self.key, token) {
            web_sys::console::warn_1(&"[Storage] Failed to persist token".into());
        }
    }

    fn clear(&self) {
        if !LocalStorage::delete(&self.key) {
            web_sys::console::warn_1(&"[Storage] Failed to remove token".into());
        }
    }
}
