//! 认证会话
//!
//! "谁已登录"的唯一来源。只管理凭据本身，不发起网络请求，也不校验 Token。

use crate::token::{TokenProvider, TokenStore, mask_token};

/// 认证状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSession {
    token: Option<String>,
}

impl AuthSession {
    /// 从持久化存储恢复上次的 Token
    pub fn restore<S: TokenProvider>(store: &S) -> Self {
        Self {
            token: store.token(),
        }
    }

    /// 保存 Token 到内存与持久化存储，之后的已认证请求立即生效
    pub fn login<S: TokenStore>(&mut self, store: &S, token: impl Into<String>) {
        let token = token.into();
        log_info!("[Auth] Logged in with token {}", mask_token(&token));
        store.save(&token);
        self.token = Some(token);
    }

    /// 从内存与持久化存储中清除 Token
    pub fn logout<S: TokenStore>(&mut self, store: &S) {
        log_info!("[Auth] Logged out");
        store.clear();
        self.token = None;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// 持有非空 Token 即视为已认证
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::MemoryTokenStore;

    #[test]
    fn test_restore_from_storage() {
        let store = MemoryTokenStore::with_token("T1");
        let session = AuthSession::restore(&store);
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("T1"));
    }

    #[test]
    fn test_restore_without_token() {
        let session = AuthSession::restore(&MemoryTokenStore::default());
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_login_persists_and_logout_clears() {
        let store = MemoryTokenStore::default();
        let mut session = AuthSession::default();

        session.login(&store, "T1");
        assert!(session.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("T1"));

        session.logout(&store);
        assert!(!session.is_authenticated());
        assert!(store.token().is_none());
    }

    #[test]
    fn test_empty_token_is_not_authenticated() {
        let store = MemoryTokenStore::default();
        let mut session = AuthSession::default();
        session.login(&store, "");
        assert!(!session.is_authenticated());
    }
}
