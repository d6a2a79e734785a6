//! 运行时配置
//!
//! CSR 产物在浏览器中没有环境变量，因此覆盖值在构建时通过
//! `FLIGHTONTIME_API_URL` / `FLIGHTONTIME_TOKEN_KEY` / `FLIGHTONTIME_GOOGLE_CLIENT_ID`
//! 注入，未设置时使用默认值。

/// 这些是默认值，构建环境中没有定义时使用
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TOKEN_STORAGE_KEY: &str = "token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// 后端 API 根地址（不含结尾的 `/`）
    pub api_base_url: String,
    /// Session Token 在持久化存储中的键名
    pub token_storage_key: String,
    /// Google Identity Services 的 OAuth Client ID，未配置时不提供 Google 登录
    pub google_client_id: Option<String>,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>, token_storage_key: impl Into<String>) -> Self {
        let api_base_url = api_base_url.into().trim_end_matches('/').to_string();
        Self {
            api_base_url,
            token_storage_key: token_storage_key.into(),
            google_client_id: None,
        }
    }

    /// 设置 Google Client ID，空白值视为未配置
    pub fn with_google_client_id(mut self, client_id: Option<&str>) -> Self {
        self.google_client_id = client_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        self
    }

    /// 读取构建时注入的覆盖值
    pub fn from_build_env() -> Self {
        Self::new(
            option_env!("FLIGHTONTIME_API_URL").unwrap_or(DEFAULT_API_BASE_URL),
            option_env!("FLIGHTONTIME_TOKEN_KEY").unwrap_or(DEFAULT_TOKEN_STORAGE_KEY),
        )
        .with_google_client_id(option_env!("FLIGHTONTIME_GOOGLE_CLIENT_ID"))
    }

    /// 拼接完整 URL
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.api_base_url, path)
        } else {
            format!("{}/{}", self.api_base_url, path)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL, DEFAULT_TOKEN_STORAGE_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = ClientConfig::new("https://api.example.com/api/", "token");
        assert_eq!(config.api_base_url, "https://api.example.com/api");
        assert_eq!(config.url("/flights"), "https://api.example.com/api/flights");
        assert_eq!(config.url("airlines"), "https://api.example.com/api/airlines");
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.url("/auth/login"), "http://localhost:8080/api/auth/login");
        assert_eq!(config.token_storage_key, "token");
        assert_eq!(config.google_client_id, None);
    }

    #[test]
    fn test_google_client_id() {
        let config = ClientConfig::default()
            .with_google_client_id(Some(" 123.apps.googleusercontent.com "));
        assert_eq!(
            config.google_client_id.as_deref(),
            Some("123.apps.googleusercontent.com")
        );

        let config = ClientConfig::default().with_google_client_id(Some("  "));
        assert_eq!(config.google_client_id, None);
    }
}
