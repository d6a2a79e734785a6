use super::*;
use crate::cache::{ReferenceCache, ensure_reference_data};
use crate::config::ClientConfig;
use crate::request::{HttpMethod, MockHttpClient};
use crate::session::AuthSession;
use crate::token::MemoryTokenStore;
use flightontime_shared::LoginRequest;
use serde_json::json;
use std::cell::{Cell, RefCell};

const PREDICT_URL: &str = "http://localhost:8080/api/flights/predict";

// =========================================================
// 辅助函数
// =========================================================

fn create_api(store: &MemoryTokenStore) -> ApiClient<MockHttpClient, MemoryTokenStore> {
    ApiClient::new(ClientConfig::default(), MockHttpClient::new(), store.clone())
}

fn filled_form() -> PredictionForm {
    PredictionForm {
        airline: "AZU".into(),
        origin: "GRU".into(),
        destination: "CGH".into(),
        date: "2025-01-01".into(),
        time: "10:00".into(),
    }
}

fn prediction_body(label: &str, probability: f64) -> serde_json::Value {
    json!({
        "predict": {"predictionResult": label, "predictionProbability": probability},
        "weather": {"temperature": "25°C", "precipitation": "0mm", "windSpeed": "10km/h"}
    })
}

// =========================================================
// 校验
// =========================================================

#[test]
fn test_validate_assembles_iso_departure() {
    let prepared = filled_form().validate().unwrap();
    assert_eq!(prepared.request.departure, "2025-01-01T10:00:00");
    assert_eq!(prepared.request.airline, "AZU");
}

#[test]
fn test_validate_names_every_missing_field() {
    let err = PredictionForm::default().validate().unwrap_err();
    assert_eq!(err.kind, crate::error::ErrorKind::Validation);
    assert!(err.message().ends_with("companhia, origem, destino, data, hora"));
}

#[test]
fn test_validate_names_only_the_missing_field() {
    let form = PredictionForm {
        destination: "  ".into(),
        ..filled_form()
    };
    assert_eq!(form.missing_fields(), vec!["destino"]);
}

#[test]
fn test_validate_rejects_unparsable_date() {
    let form = PredictionForm {
        date: "01/01/2025".into(),
        ..filled_form()
    };
    let err = form.validate().unwrap_err();
    assert_eq!(err.message(), "Data ou hora de partida inválida");
}

#[tokio::test]
async fn test_each_missing_field_blocks_the_request() {
    let store = MemoryTokenStore::with_token("T1");
    let api = create_api(&store);

    let blanks: [fn(&mut PredictionForm); 4] = [
        |f| f.airline.clear(),
        |f| f.origin.clear(),
        |f| f.destination.clear(),
        |f| f.time.clear(),
    ];
    for blank in blanks {
        let mut form = filled_form();
        blank(&mut form);
        let refreshed = Cell::new(false);

        let state = submit_prediction(&api, &form, || refreshed.set(true)).await;

        assert!(matches!(state, PredictionState::Invalid(_)));
        assert!(!refreshed.get());
    }
    assert_eq!(api.http().total_requests(), 0);
}

// =========================================================
// 提交
// =========================================================

#[tokio::test]
async fn test_success_refreshes_history_exactly_once() {
    let store = MemoryTokenStore::with_token("T1");
    let api = create_api(&store);
    api.http()
        .mock_json(HttpMethod::Post, PREDICT_URL, 200, prediction_body("Atrasado", 0.61));
    let refreshes = Cell::new(0);

    let state = submit_prediction(&api, &filled_form(), || refreshes.set(refreshes.get() + 1)).await;

    assert_eq!(refreshes.get(), 1);
    let result = state.result().unwrap();
    assert!(result.is_destructive());
    assert_eq!(result.badge_label(), "ATRASO PREVISTO");
    assert_eq!(result.caption(), "Probabilidade de atraso");
    assert_eq!(result.probability_text(), "61.0%");
    assert_eq!(result.departure_text(), "01/01 10:00");
}

#[tokio::test]
async fn test_failure_shows_backend_message_without_partial_result() {
    let store = MemoryTokenStore::with_token("T1");
    let api = create_api(&store);
    api.http().mock_json(
        HttpMethod::Post,
        PREDICT_URL,
        422,
        json!({"erro": "Aeroporto de origem inválido"}),
    );
    let refreshed = Cell::new(false);

    let state = submit_prediction(&api, &filled_form(), || refreshed.set(true)).await;

    assert_eq!(state, PredictionState::Failed("Aeroporto de origem inválido".into()));
    assert!(state.result().is_none());
    assert!(!refreshed.get());
}

#[tokio::test]
async fn test_missing_weather_is_tolerated() {
    let store = MemoryTokenStore::with_token("T1");
    let api = create_api(&store);
    api.http().mock_json(
        HttpMethod::Post,
        PREDICT_URL,
        200,
        json!({"predict": {"predictionResult": "Pontual", "predictionProbability": 0.7}}),
    );

    let state = submit_prediction(&api, &filled_form(), || {}).await;

    assert!(state.result().unwrap().weather().is_none());
}

#[tokio::test]
async fn test_resubmission_after_failure_revalidates() {
    let store = MemoryTokenStore::with_token("T1");
    let api = create_api(&store);
    api.http().mock_text(HttpMethod::Post, PREDICT_URL, 500, "");

    let first = submit_prediction(&api, &filled_form(), || {}).await;
    assert_eq!(first.error_message(), Some("Erro ao fazer predição"));

    let second = submit_prediction(&api, &PredictionForm::default(), || {}).await;
    assert!(matches!(second, PredictionState::Invalid(_)));
    assert_eq!(api.http().total_requests(), 1);
}

#[test]
fn test_names_fall_back_to_codes() {
    let result = PredictionResult {
        request: filled_form().validate().unwrap().request,
        departure: filled_form().validate().unwrap().departure,
        response: serde_json::from_value(prediction_body("Pontual", 0.9)).unwrap(),
    };
    let airlines = vec![Airline {
        code: "AZU".into(),
        name: "Azul".into(),
    }];

    assert_eq!(result.airline_name(&airlines), "Azul");
    assert_eq!(result.origin_name(&[]), "GRU");
}

// =========================================================
// 端到端
// =========================================================

#[tokio::test]
async fn test_login_then_reference_fetch_then_prediction() {
    let store = MemoryTokenStore::default();
    let api = create_api(&store);
    let http = api.http();
    http.mock_json(
        HttpMethod::Post,
        "http://localhost:8080/api/auth/login",
        200,
        json!({"token": "T1"}),
    );
    http.mock_json(HttpMethod::Get, "http://localhost:8080/api/airlines", 200, json!([]));
    http.mock_json(HttpMethod::Get, "http://localhost:8080/api/airports", 200, json!([]));
    http.mock_json(HttpMethod::Post, PREDICT_URL, 200, prediction_body("Pontual", 0.92));

    // 登录
    let mut session = AuthSession::restore(&store);
    let cache = RefCell::new(ReferenceCache::new(session.token()));
    let resp = api
        .login(&LoginRequest {
            email: "a@b.com".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();
    session.login(&store, resp.token);
    cache.borrow_mut().observe(&session);
    assert!(session.is_authenticated());

    // 参考数据只获取一次
    ensure_reference_data(&api, &cache).await;
    ensure_reference_data(&api, &cache).await;
    assert_eq!(http.count(HttpMethod::Get, "http://localhost:8080/api/airlines"), 1);
    assert_eq!(http.count(HttpMethod::Get, "http://localhost:8080/api/airports"), 1);

    // 预测
    let state = submit_prediction(&api, &filled_form(), || {}).await;
    let result = state.result().unwrap();
    assert_eq!(result.probability_text(), "92.0%");
    assert!(!result.is_destructive());
    assert_eq!(result.badge_label(), "VOO PONTUAL");

    let sent = http.requests.borrow().last().cloned().unwrap();
    let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(
        body,
        json!({
            "companhia": "AZU", "origem": "GRU", "destino": "CGH",
            "data_partida": "2025-01-01T10:00:00"
        })
    );
    assert_eq!(
        sent.headers.get("Authorization").map(String::as_str),
        Some("Bearer T1")
    );
}
