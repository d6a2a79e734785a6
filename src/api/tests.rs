use super::*;
use crate::error::ErrorKind;
use crate::request::{HttpMethod, MockHttpClient};
use crate::token::{MemoryTokenStore, TokenStore};
use serde_json::json;

const BASE: &str = "http://localhost:8080/api";

// =========================================================
// 辅助函数
// =========================================================

fn create_api(token: Option<&str>) -> ApiClient<MockHttpClient, MemoryTokenStore> {
    let store = match token {
        Some(t) => MemoryTokenStore::with_token(t),
        None => MemoryTokenStore::default(),
    };
    ApiClient::new(ClientConfig::default(), MockHttpClient::new(), store)
}

fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

fn last_request(api: &ApiClient<MockHttpClient, MemoryTokenStore>) -> crate::request::RecordedRequest {
    api.http.requests.borrow().last().cloned().unwrap()
}

// =========================================================
// 认证头
// =========================================================

#[tokio::test]
async fn test_authenticated_call_attaches_bearer_token() {
    let api = create_api(Some("T1"));
    api.http
        .mock_json(HttpMethod::Get, &url("/airlines"), 200, json!([]));

    api.airlines().await.unwrap();

    let req = last_request(&api);
    assert_eq!(req.headers.get("Authorization").map(String::as_str), Some("Bearer T1"));
    assert!(req.body.is_none());
    assert!(!req.headers.contains_key("Content-Type"));
}

#[tokio::test]
async fn test_token_is_read_fresh_on_each_call() {
    let api = create_api(Some("T1"));
    api.http
        .mock_json(HttpMethod::Get, &url("/flights"), 200, json!([]));

    api.flights().await.unwrap();
    api.tokens.save("T2");
    api.flights().await.unwrap();

    let requests = api.http.requests.borrow();
    assert_eq!(requests[0].headers["Authorization"], "Bearer T1");
    assert_eq!(requests[1].headers["Authorization"], "Bearer T2");
}

#[tokio::test]
async fn test_missing_token_sends_without_credentials() {
    let api = create_api(None);
    api.http
        .mock_json(HttpMethod::Get, &url("/airports"), 401, json!({}));

    let err = api.airports().await.unwrap_err();

    assert!(!last_request(&api).headers.contains_key("Authorization"));
    assert!(err.is_session_expired());
}

#[tokio::test]
async fn test_login_is_not_authenticated_and_sends_json_body() {
    let api = create_api(Some("old"));
    api.http
        .mock_json(HttpMethod::Post, &url("/auth/login"), 200, json!({"token": "T1"}));

    let resp = api
        .login(&LoginRequest {
            email: "a@b.com".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();

    assert_eq!(resp.token, "T1");
    let req = last_request(&api);
    assert!(!req.headers.contains_key("Authorization"));
    assert_eq!(req.headers["Content-Type"], "application/json");
    let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"email": "a@b.com", "password": "secret"}));
}

// =========================================================
// 响应解析
// =========================================================

#[tokio::test]
async fn test_register_returns_plain_text() {
    let api = create_api(None);
    api.http.mock_text(
        HttpMethod::Post,
        &url("/auth/register"),
        200,
        "Usuário registrado com sucesso",
    );

    let msg = api
        .register(&RegisterRequest {
            email: "a@b.com".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();

    assert_eq!(msg, "Usuário registrado com sucesso");
}

#[tokio::test]
async fn test_delete_accepts_empty_body() {
    let api = create_api(Some("T1"));
    api.http
        .mock_text(HttpMethod::Delete, &url("/flights/5"), 204, "");

    api.delete_flight(5).await.unwrap();

    assert_eq!(api.http.count(HttpMethod::Delete, &url("/flights/5")), 1);
}

#[tokio::test]
async fn test_search_paths() {
    let api = create_api(Some("T1"));
    api.http.mock_json(
        HttpMethod::Get,
        &url("/flights/search/origin?origin=GRU"),
        200,
        json!([]),
    );
    api.http.mock_json(
        HttpMethod::Get,
        &url("/flights/search/destination?destination=CGH"),
        200,
        json!([]),
    );
    api.http
        .mock_json(HttpMethod::Get, &url("/flights/search/delayed"), 200, json!([]));
    api.http
        .mock_json(HttpMethod::Get, &url("/flights/search/ontime"), 200, json!([]));

    api.flights_by_origin("GRU").await.unwrap();
    api.flights_by_destination("CGH").await.unwrap();
    api.delayed_flights().await.unwrap();
    api.on_time_flights().await.unwrap();

    assert_eq!(api.http.total_requests(), 4);
}

#[tokio::test]
async fn test_malformed_json_is_decode_error() {
    let api = create_api(Some("T1"));
    api.http
        .mock_text(HttpMethod::Get, &url("/flights/stats"), 200, "<html>");

    let err = api.flight_stats().await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Decode);
}

// =========================================================
// 错误契约
// =========================================================

#[tokio::test]
async fn test_predict_error_uses_detail_field() {
    let api = create_api(Some("T1"));
    api.http.mock_json(
        HttpMethod::Post,
        &url("/flights/predict"),
        422,
        json!({"detail": "Aeroporto desconhecido"}),
    );

    let req = PredictionRequest {
        airline: "AZU".into(),
        origin: "XXX".into(),
        destination: "CGH".into(),
        departure: "2025-01-01T10:00:00".into(),
    };
    let err = api.predict(&req).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Api { status: 422 });
    assert_eq!(err.message(), "Aeroporto desconhecido");
}

#[tokio::test]
async fn test_error_falls_back_to_erro_field() {
    let api = create_api(Some("T1"));
    api.http.mock_json(
        HttpMethod::Get,
        &url("/flights/9"),
        404,
        json!({"erro": "Voo não encontrado"}),
    );

    let err = api.flight(9).await.unwrap_err();

    assert_eq!(err.message(), "Voo não encontrado");
}

#[tokio::test]
async fn test_generic_message_is_specific_to_operation() {
    let api = create_api(Some("T1"));
    api.http
        .mock_text(HttpMethod::Get, &url("/airlines"), 500, "");
    api.http
        .mock_text(HttpMethod::Get, &url("/airports"), 500, "");

    let airlines_err = api.airlines().await.unwrap_err();
    let airports_err = api.airports().await.unwrap_err();

    assert_eq!(airlines_err.message(), "Erro ao buscar companhias aéreas");
    assert_eq!(airports_err.message(), "Erro ao buscar aeroportos");
}

#[tokio::test]
async fn test_auth_endpoint_uses_plain_text_error() {
    let api = create_api(None);
    api.http.mock_text(
        HttpMethod::Post,
        &url("/auth/login"),
        401,
        "Credenciais inválidas",
    );

    let err = api
        .login(&LoginRequest {
            email: "a@b.com".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();

    // 登录接口本身不是已认证请求，401 不是会话过期
    assert!(!err.is_session_expired());
    assert_eq!(err.message(), "Credenciais inválidas");
}

#[tokio::test]
async fn test_deleting_missing_flight_is_reported() {
    let api = create_api(Some("T1"));

    let err = api.delete_flight(77).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Api { status: 404 });
    assert_eq!(err.message(), "Erro ao deletar voo");
}

#[tokio::test]
async fn test_transport_failure_is_network_error() {
    let api = create_api(Some("T1"));
    api.http.set_offline(true);

    let err = api.flights().await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Network);
    assert_eq!(err.spans()[0].operation, "api.send");
}

#[test]
fn test_extract_error_message_ignores_blank_fields() {
    assert_eq!(
        extract_error_message(r#"{"detail": "", "erro": "falhou"}"#, ErrorBody::Json).as_deref(),
        Some("falhou")
    );
    assert_eq!(extract_error_message("texto", ErrorBody::Json), None);
    assert_eq!(extract_error_message("  ", ErrorBody::Text), None);
}
