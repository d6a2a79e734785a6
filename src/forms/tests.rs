use super::*;
use crate::config::ClientConfig;
use crate::error::ErrorKind;
use crate::request::{HttpMethod, MockHttpClient};
use crate::session::AuthSession;
use crate::token::MemoryTokenStore;
use serde_json::json;

const BASE: &str = "http://localhost:8080/api";

fn create_api() -> ApiClient<MockHttpClient, MemoryTokenStore> {
    ApiClient::new(
        ClientConfig::default(),
        MockHttpClient::new(),
        MemoryTokenStore::default(),
    )
}

fn register_form(password: &str, confirm: &str) -> RegisterForm {
    RegisterForm {
        email: "a@b.com".into(),
        password: password.into(),
        confirm_password: confirm.into(),
    }
}

// =========================================================
// 注册
// =========================================================

#[test]
fn test_register_rejects_mismatched_passwords() {
    let err = register_form("secret", "secreT").validate().unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.message(), "As senhas não coincidem");
}

#[test]
fn test_register_rejects_short_password() {
    let err = register_form("12345", "12345").validate().unwrap_err();
    assert_eq!(err.message(), "A senha deve ter pelo menos 6 caracteres");
}

#[test]
fn test_mismatch_is_reported_before_length() {
    let err = register_form("1", "2").validate().unwrap_err();
    assert_eq!(err.message(), "As senhas não coincidem");
}

#[tokio::test]
async fn test_invalid_register_sends_nothing() {
    let api = create_api();
    assert!(register(&api, &register_form("abc", "abc")).await.is_err());
    assert_eq!(api.http().total_requests(), 0);
}

#[tokio::test]
async fn test_register_returns_plain_text_confirmation() {
    let api = create_api();
    api.http().mock_text(
        HttpMethod::Post,
        &format!("{}/auth/register", BASE),
        201,
        "Usuário criado",
    );

    let confirmation = register(&api, &register_form("secret", "secret")).await.unwrap();

    assert_eq!(confirmation, "Usuário criado");
}

#[tokio::test]
async fn test_register_conflict_shows_backend_text() {
    let api = create_api();
    api.http().mock_text(
        HttpMethod::Post,
        &format!("{}/auth/register", BASE),
        409,
        "Email já cadastrado",
    );

    let err = register(&api, &register_form("secret", "secret")).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Api { status: 409 });
    assert_eq!(err.message(), "Email já cadastrado");
}

// =========================================================
// 登录
// =========================================================

#[tokio::test]
async fn test_login_returns_token_for_session() {
    let api = create_api();
    api.http().mock_json(
        HttpMethod::Post,
        &format!("{}/auth/login", BASE),
        200,
        json!({"token": "T1"}),
    );
    let form = LoginForm {
        email: " a@b.com ".into(),
        password: "secret".into(),
    };

    let token = login(&api, &form).await.unwrap();
    let mut session = AuthSession::default();
    session.login(&MemoryTokenStore::default(), token);

    assert!(session.is_authenticated());
    let sent = api.http().requests.borrow()[0].body.clone().unwrap();
    assert!(sent.contains("\"email\":\"a@b.com\""));
}

#[tokio::test]
async fn test_wrong_password_is_not_session_expired() {
    let api = create_api();
    api.http().mock_text(
        HttpMethod::Post,
        &format!("{}/auth/login", BASE),
        401,
        "Credenciais inválidas",
    );

    let err = login(&api, &LoginForm::default()).await.unwrap_err();

    assert!(!err.is_session_expired());
    assert_eq!(err.message(), "Credenciais inválidas");
}

#[tokio::test]
async fn test_google_login_requires_credential() {
    let api = create_api();

    for credential in [None, Some(""), Some("  ")] {
        let err = google_login(&api, credential).await.unwrap_err();
        assert_eq!(err.message(), "Credencial do Google não recebida");
    }
    assert_eq!(api.http().total_requests(), 0);
}

#[tokio::test]
async fn test_google_login_posts_credential() {
    let api = create_api();
    api.http().mock_json(
        HttpMethod::Post,
        &format!("{}/auth/google", BASE),
        200,
        json!({"token": "G1"}),
    );

    let token = google_login(&api, Some("jwt-from-google")).await.unwrap();

    assert_eq!(token, "G1");
    let sent = api.http().requests.borrow()[0].body.clone().unwrap();
    assert_eq!(sent, r#"{"credential":"jwt-from-google"}"#);
}
