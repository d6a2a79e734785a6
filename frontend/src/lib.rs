//! Flight On Time 前端应用
//!
//! 采用 Context-Driven 架构，业务规则全部来自核心库 `flightontime`：
//! - `web::router`: 路由服务（守卫规则见 `flightontime::guard`）
//! - `auth`: 认证会话
//! - `data`: 参考数据缓存
//! - `components`: UI 组件层

mod api;
mod auth;
mod data;
mod components {
    pub mod dashboard;
    pub mod flights;
    pub mod home;
    pub mod layout;
    pub mod login;
    pub mod register;
    pub mod stats;
    pub mod team;
}

use crate::api::create_api;
use crate::auth::AuthContext;
use crate::components::dashboard::DashboardPage;
use crate::components::flights::FlightsPage;
use crate::components::home::HomePage;
use crate::components::layout::{Footer, Header};
use crate::components::login::LoginPage;
use crate::components::register::RegisterPage;
use crate::components::stats::StatsPage;
use crate::components::team::TeamPage;
use crate::data::provide_data;

use flightontime::AppRoute;
use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    pub mod google;
    mod http;
    pub mod router;
    mod storage;

    pub use http::BrowserHttpClient;
    pub use storage::BrowserTokenStore;
}

use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Flights => view! { <FlightsPage /> }.into_any(),
        AppRoute::Stats => view! { <StatsPage /> }.into_any(),
        AppRoute::Team => view! { <TeamPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-[60vh]">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Página não encontrada"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. API Client 与认证上下文（从 LocalStorage 恢复 Token）
    let api = create_api();
    let auth_ctx = AuthContext::new(api.tokens().clone());
    provide_context(auth_ctx);
    provide_context(api.clone());

    // 2. 参考数据上下文，跟随 Token 变化
    provide_data(auth_ctx, api);

    // 3. 认证状态信号注入路由服务
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <div class="min-h-screen flex flex-col bg-base-200">
                <Header />
                <main class="flex-1">
                    <RouterOutlet matcher=route_matcher />
                </main>
                <Footer />
            </div>
        </Router>
    }
}
