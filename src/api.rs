//! 后端 REST API 客户端
//!
//! 不包含业务逻辑，也不读写参考数据缓存。Token 在每次调用时通过注入的
//! `TokenProvider` 读取。

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::request::{HttpClient, HttpRequest, HttpResponse};
use crate::token::TokenProvider;
use flightontime_shared::protocol::{
    ApiRequest, DelayedFlightsRequest, DeleteFlightRequest, ErrorBody, FlightStatsRequest,
    GetFlightRequest, ListAirlinesRequest, ListAirportsRequest, ListFlightsRequest,
    OnTimeFlightsRequest, ResponseBody, SearchByDestinationRequest, SearchByOriginRequest,
};
use flightontime_shared::{
    Airline, Airport, CONTENT_TYPE_JSON, FlightRecord, FlightStats, GoogleLoginRequest,
    HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE, LoginRequest, LoginResponse, PredictionRequest,
    PredictionResponse, RegisterRequest,
};
use serde_json::Value;

#[derive(Clone, Debug)]
pub struct ApiClient<H, T> {
    config: ClientConfig,
    http: H,
    tokens: T,
}

impl<H: HttpClient, T: TokenProvider> ApiClient<H, T> {
    pub fn new(config: ClientConfig, http: H, tokens: T) -> Self {
        Self {
            config,
            http,
            tokens,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn http(&self) -> &H {
        &self.http
    }

    pub fn tokens(&self) -> &T {
        &self.tokens
    }

    /// 当前的 Session Token（空字符串视为无 Token）
    pub fn current_token(&self) -> Option<String> {
        self.tokens.token().filter(|t| !t.is_empty())
    }

    /// 发送一个类型化的请求并解析响应
    pub async fn execute<R: ApiRequest>(&self, req: &R) -> ClientResult<R::Response> {
        let path = req.path();
        let url = self.config.url(&path);
        let mut http_req = HttpRequest::new(&url, R::METHOD);

        if R::METHOD.has_body() {
            let body = serde_json::to_string(req)
                .map_err(|e| ClientError::from(e).in_op_with("api.encode", path.clone()))?;
            http_req = http_req
                .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)
                .with_body(body);
        }

        // 没有 Token 时照常发送，由后端拒绝
        if R::AUTHENTICATED {
            if let Some(token) = self.current_token() {
                http_req = http_req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
            }
        }

        let op = format!("{} {}", R::METHOD.as_str(), path);
        let resp = self
            .http
            .send(http_req)
            .await
            .map_err(|e| e.in_op_with("api.send", op.clone()))?;

        if !resp.ok() {
            return Err(failure::<R>(&resp).in_op_with("api.status", op));
        }

        decode::<R>(&resp).map_err(|e| e.in_op_with("api.decode", op))
    }

    // --- Auth ---

    /// 注册，返回后端的纯文本确认
    pub async fn register(&self, req: &RegisterRequest) -> ClientResult<String> {
        self.execute(req).await
    }

    pub async fn login(&self, req: &LoginRequest) -> ClientResult<LoginResponse> {
        self.execute(req).await
    }

    pub async fn google_login(&self, credential: &str) -> ClientResult<LoginResponse> {
        let req = GoogleLoginRequest {
            credential: credential.to_string(),
        };
        self.execute(&req).await
    }

    // --- Prediction ---

    pub async fn predict(&self, req: &PredictionRequest) -> ClientResult<PredictionResponse> {
        self.execute(req).await
    }

    // --- Flights ---

    pub async fn flights(&self) -> ClientResult<Vec<FlightRecord>> {
        self.execute(&ListFlightsRequest).await
    }

    pub async fn flight(&self, id: i64) -> ClientResult<FlightRecord> {
        self.execute(&GetFlightRequest { id }).await
    }

    pub async fn flights_by_origin(&self, origin: &str) -> ClientResult<Vec<FlightRecord>> {
        let req = SearchByOriginRequest {
            origin: origin.to_string(),
        };
        self.execute(&req).await
    }

    pub async fn flights_by_destination(
        &self,
        destination: &str,
    ) -> ClientResult<Vec<FlightRecord>> {
        let req = SearchByDestinationRequest {
            destination: destination.to_string(),
        };
        self.execute(&req).await
    }

    pub async fn delayed_flights(&self) -> ClientResult<Vec<FlightRecord>> {
        self.execute(&DelayedFlightsRequest).await
    }

    pub async fn on_time_flights(&self) -> ClientResult<Vec<FlightRecord>> {
        self.execute(&OnTimeFlightsRequest).await
    }

    pub async fn delete_flight(&self, id: i64) -> ClientResult<()> {
        self.execute(&DeleteFlightRequest { id }).await
    }

    pub async fn flight_stats(&self) -> ClientResult<FlightStats> {
        self.execute(&FlightStatsRequest).await
    }

    // --- Reference data ---

    pub async fn airlines(&self) -> ClientResult<Vec<Airline>> {
        self.execute(&ListAirlinesRequest).await
    }

    pub async fn airports(&self) -> ClientResult<Vec<Airport>> {
        self.execute(&ListAirportsRequest).await
    }
}

/// 将非 2xx 响应转换为错误
///
/// 已认证请求的 401 统一视为会话过期；其余优先取 JSON 的 `detail` / `erro`，
/// 纯文本接口取响应体本身，都没有时使用接口自己的兜底消息。
fn failure<R: ApiRequest>(resp: &HttpResponse) -> ClientError {
    if resp.status == 401 && R::AUTHENTICATED {
        return ClientError::session_expired();
    }
    let message = extract_error_message(&resp.body, R::ERROR_BODY)
        .unwrap_or_else(|| R::FAILURE_MESSAGE.to_string());
    ClientError::api(resp.status, message)
}

fn extract_error_message(body: &str, format: ErrorBody) -> Option<String> {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        let field = ["detail", "erro"]
            .iter()
            .filter_map(|key| map.get(*key).and_then(Value::as_str))
            .find(|msg| !msg.trim().is_empty());
        return field.map(str::to_string);
    }
    match format {
        ErrorBody::Text => {
            let text = body.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
        ErrorBody::Json => None,
    }
}

fn decode<R: ApiRequest>(resp: &HttpResponse) -> ClientResult<R::Response> {
    match R::RESPONSE_BODY {
        ResponseBody::Json => resp.json(),
        ResponseBody::Text => {
            serde_json::from_value(Value::String(resp.body.clone())).map_err(ClientError::from)
        }
        ResponseBody::Empty => serde_json::from_value(Value::Null).map_err(ClientError::from),
    }
}

#[cfg(test)]
mod tests;
