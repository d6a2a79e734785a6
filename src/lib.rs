//! Flight On Time 客户端核心
//!
//! 与平台无关的客户端逻辑，浏览器前端与原生环境共用：
//! - `api`: 后端 REST 接口的唯一出口
//! - `session`: 认证会话（当前 Bearer Token）
//! - `cache`: 参考数据缓存（航空公司 / 机场 / 历史记录）
//! - `predict`: 预测表单的状态机
//! - `guard`: 路由守卫规则
//! - `forms` / `history`: 认证表单与历史记录页面的规则

// =========================================================
// 跨平台日志宏
// =========================================================

#[cfg(target_arch = "wasm32")]
#[doc(hidden)]
pub use web_sys::console as __console;

#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! log_info {
    ($($t:tt)*) => ($crate::__console::log_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! log_info {
    ($($t:tt)*) => (println!($($t)*))
}

#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! log_warn {
    ($($t:tt)*) => ($crate::__console::warn_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! log_warn {
    ($($t:tt)*) => (eprintln!($($t)*))
}

#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! log_error {
    ($($t:tt)*) => ($crate::__console::error_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! log_error {
    ($($t:tt)*) => (eprintln!($($t)*))
}

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod forms;
pub mod guard;
pub mod history;
pub mod predict;
pub mod request;
pub mod session;
pub mod token;

pub use api::ApiClient;
pub use cache::{CacheHandle, ReferenceCache, UnitState};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ErrorKind};
pub use guard::{AppRoute, GuardDecision};
pub use history::{HistoryFilter, HistoryRow};
pub use predict::{PredictionForm, PredictionResult, PredictionState};
pub use request::{HttpClient, HttpRequest, HttpResponse};
pub use session::AuthSession;
pub use token::{TokenProvider, TokenStore};

pub use flightontime_shared as shared;
