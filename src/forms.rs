//! 登录与注册表单
//!
//! 只负责校验与调用认证接口，返回的 Token 由调用方交给 `AuthSession`。

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::request::HttpClient;
use crate::token::TokenProvider;
use flightontime_shared::{LoginRequest, RegisterRequest};

pub const MIN_PASSWORD_LEN: usize = 6;
pub const REGISTER_SUCCESS: &str = "Usuário registrado com sucesso! Redirecionando...";

const PASSWORD_MISMATCH: &str = "As senhas não coincidem";
const PASSWORD_TOO_SHORT: &str = "A senha deve ter pelo menos 6 caracteres";
const MISSING_GOOGLE_CREDENTIAL: &str = "Credencial do Google não recebida";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    /// 先检查两次密码一致，再检查长度
    pub fn validate(&self) -> ClientResult<RegisterRequest> {
        if self.password != self.confirm_password {
            return Err(ClientError::validation(PASSWORD_MISMATCH));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ClientError::validation(PASSWORD_TOO_SHORT));
        }
        Ok(RegisterRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Google 回调给出的凭据，缺失或为空时报错
pub fn google_credential(credential: Option<&str>) -> ClientResult<&str> {
    credential
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ClientError::validation(MISSING_GOOGLE_CREDENTIAL))
}

// =========================================================
// 提交
// =========================================================

/// 邮箱密码登录，返回 Token
pub async fn login<H, T>(api: &ApiClient<H, T>, form: &LoginForm) -> ClientResult<String>
where
    H: HttpClient,
    T: TokenProvider,
{
    let resp = api.login(&form.to_request()).await?;
    Ok(resp.token)
}

/// Google 登录，返回 Token
pub async fn google_login<H, T>(
    api: &ApiClient<H, T>,
    credential: Option<&str>,
) -> ClientResult<String>
where
    H: HttpClient,
    T: TokenProvider,
{
    let credential = google_credential(credential)?;
    let resp = api.google_login(credential).await?;
    Ok(resp.token)
}

/// 注册，校验失败时不发请求
pub async fn register<H, T>(api: &ApiClient<H, T>, form: &RegisterForm) -> ClientResult<String>
where
    H: HttpClient,
    T: TokenProvider,
{
    let req = form.validate()?;
    let confirmation = api.register(&req).await?;
    log_info!("[Auth] Registered {}: {}", req.email, confirmation.trim());
    Ok(confirmation)
}

#[cfg(test)]
mod tests;
