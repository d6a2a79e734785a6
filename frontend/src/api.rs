//! 浏览器端的 API Client 实例
//!
//! 核心库的 `ApiClient` 搭配 fetch 传输层与 LocalStorage Token 存储。

use crate::web::{BrowserHttpClient, BrowserTokenStore};
use flightontime::{ApiClient, ClientConfig};
use leptos::prelude::*;

pub type FrontendApi = ApiClient<BrowserHttpClient, BrowserTokenStore>;

/// 使用编译期配置创建 API Client
pub fn create_api() -> FrontendApi {
    let config = ClientConfig::from_build_env();
    let tokens = BrowserTokenStore::new(&config.token_storage_key);
    ApiClient::new(config, BrowserHttpClient, tokens)
}

/// 从 Context 获取 API Client
pub fn use_api() -> FrontendApi {
    use_context::<FrontendApi>().expect("FrontendApi should be provided")
}
