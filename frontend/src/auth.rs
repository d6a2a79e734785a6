//! 认证模块
//!
//! 以 signal 持有核心库的 `AuthSession`，与路由系统解耦：
//! 路由服务通过注入的认证信号检查状态。

use crate::data::DataContext;
use crate::web::BrowserTokenStore;
use flightontime::AuthSession;
use leptos::prelude::*;

/// 认证上下文
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 当前会话
    pub session: RwSignal<AuthSession>,
    tokens: StoredValue<BrowserTokenStore>,
}

impl AuthContext {
    /// 从 LocalStorage 恢复上次的会话
    pub fn new(tokens: BrowserTokenStore) -> Self {
        let session = AuthSession::restore(&tokens);
        Self {
            session: RwSignal::new(session),
            tokens: StoredValue::new(tokens),
        }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.with(AuthSession::is_authenticated))
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 保存 Token 并同步清空缓存
///
/// 导航由路由服务的认证状态监听处理。
pub fn login(ctx: &AuthContext, data: &DataContext, token: String) {
    let tokens = ctx.tokens.get_value();
    ctx.session.update(|session| session.login(&tokens, token));
    data.observe(&ctx.session.get_untracked());
}

/// 清除 Token 并同步清空缓存
pub fn logout(ctx: &AuthContext, data: &DataContext) {
    let tokens = ctx.tokens.get_value();
    ctx.session.update(|session| session.logout(&tokens));
    data.observe(&ctx.session.get_untracked());
}
