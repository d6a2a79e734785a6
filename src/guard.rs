//! 路由定义与守卫规则
//!
//! 纯粹的领域逻辑，不依赖于 DOM。浏览器端的路由服务根据 `guard` 的结果
//! 决定渲染页面还是跳转。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 首页 (默认路由)
    #[default]
    Home,
    Login,
    Register,
    /// 预测面板 (需要认证)
    Dashboard,
    /// 历史记录 (需要认证)
    Flights,
    /// 统计 (需要认证)
    Stats,
    Team,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举，忽略结尾的 `/`
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::Home,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/dashboard" => Self::Dashboard,
            "/flights" => Self::Flights,
            "/stats" => Self::Stats,
            "/team" => Self::Team,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
            Self::Flights => "/flights",
            Self::Stats => "/stats",
            Self::Team => "/team",
            Self::NotFound => "/404",
        }
    }

    /// 该路由是否需要认证
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Dashboard | Self::Flights | Self::Stats)
    }

    /// 已认证用户是否应该离开此路由（登录 / 注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 登录成功后的重定向目标
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 守卫的判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// 渲染该路由
    Allow(AppRoute),
    /// 不渲染，跳转到目标路由
    Redirect(AppRoute),
}

impl GuardDecision {
    /// 最终要显示的路由
    pub fn target(&self) -> AppRoute {
        match self {
            GuardDecision::Allow(route) | GuardDecision::Redirect(route) => *route,
        }
    }
}

/// 根据当前认证状态判定路由
///
/// 只依赖同步的 `is_authenticated`，没有自己的加载状态。
pub fn guard(route: AppRoute, authenticated: bool) -> GuardDecision {
    if route.requires_auth() && !authenticated {
        GuardDecision::Redirect(AppRoute::auth_failure_redirect())
    } else if route.should_redirect_when_authenticated() && authenticated {
        GuardDecision::Redirect(AppRoute::auth_success_redirect())
    } else {
        GuardDecision::Allow(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [AppRoute; 8] = [
        AppRoute::Home,
        AppRoute::Login,
        AppRoute::Register,
        AppRoute::Dashboard,
        AppRoute::Flights,
        AppRoute::Stats,
        AppRoute::Team,
        AppRoute::NotFound,
    ];

    #[test]
    fn test_path_round_trip() {
        for route in ALL.into_iter().filter(|r| *r != AppRoute::NotFound) {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }

    #[test]
    fn test_from_path_tolerates_trailing_slash_and_query() {
        assert_eq!(AppRoute::from_path("/flights/"), AppRoute::Flights);
        assert_eq!(AppRoute::from_path("/stats?tab=routes"), AppRoute::Stats);
        assert_eq!(AppRoute::from_path(""), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/admin"), AppRoute::NotFound);
    }

    #[test]
    fn test_protected_routes_redirect_to_login() {
        for route in [AppRoute::Dashboard, AppRoute::Flights, AppRoute::Stats] {
            assert_eq!(guard(route, false), GuardDecision::Redirect(AppRoute::Login));
            assert_eq!(guard(route, true), GuardDecision::Allow(route));
        }
    }

    #[test]
    fn test_authenticated_user_leaves_auth_pages() {
        assert_eq!(
            guard(AppRoute::Register, true),
            GuardDecision::Redirect(AppRoute::Dashboard)
        );
        assert_eq!(guard(AppRoute::Login, false), GuardDecision::Allow(AppRoute::Login));
    }

    #[test]
    fn test_public_routes_always_render() {
        for route in [AppRoute::Home, AppRoute::Team, AppRoute::NotFound] {
            assert_eq!(guard(route, false).target(), route);
            assert_eq!(guard(route, true).target(), route);
        }
    }
}
