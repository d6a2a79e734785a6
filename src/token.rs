//! Session Token 的存取抽象
//!
//! API Client 通过 `TokenProvider` 在每次调用时读取最新的 Token，
//! 不在客户端内缓存；`TokenStore` 额外提供持久化写入，由认证会话使用。

#[cfg(test)]
use std::{cell::RefCell, rc::Rc};

/// 读取当前 Token
pub trait TokenProvider {
    fn token(&self) -> Option<String>;
}

/// 可写的持久化 Token 存储
pub trait TokenStore: TokenProvider {
    fn save(&self, token: &str);
    fn clear(&self);
}

/// 日志中只显示 Token 的前缀
pub fn mask_token(token: &str) -> String {
    let prefix: String = token.chars().take(8).collect();
    format!("{}...", prefix)
}

/// 内存中的 Token 存储，克隆体共享同一份数据
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryTokenStore(Rc<RefCell<Option<String>>>);

#[cfg(test)]
impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self(Rc::new(RefCell::new(Some(token.to_string()))))
    }
}

#[cfg(test)]
impl TokenProvider for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.0.borrow().clone()
    }
}

#[cfg(test)]
impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &str) {
        *self.0.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.0.borrow_mut() = None;
    }
}
