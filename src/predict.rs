//! 预测表单
//!
//! 每次提交的状态机：`Idle` → 校验 → (`Invalid` | `Submitting`) → (`Success` | `Failed`)。
//! 从任何终态重新提交都会重新校验。

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::request::HttpClient;
use crate::token::TokenProvider;
use flightontime_shared::date::Departure;
use flightontime_shared::format::format_probability;
use flightontime_shared::{
    Airline, Airport, PredictionOutcome, PredictionRequest, PredictionResponse, Weather,
    airline_name, airport_name,
};

pub const BADGE_DELAYED: &str = "ATRASO PREVISTO";
pub const BADGE_ON_TIME: &str = "VOO PONTUAL";
pub const CAPTION_DELAYED: &str = "Probabilidade de atraso";
pub const CAPTION_ON_TIME: &str = "Probabilidade de pontualidade";
pub const WEATHER_UNAVAILABLE: &str = "Dados meteorológicos não disponíveis";

const INVALID_DEPARTURE: &str = "Data ou hora de partida inválida";

// =========================================================
// 表单
// =========================================================

/// 预测表单的原始输入
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictionForm {
    pub airline: String,
    pub origin: String,
    pub destination: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
}

/// 通过校验、可以发送的预测请求
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedPrediction {
    pub request: PredictionRequest,
    pub departure: Departure,
}

impl PredictionForm {
    /// 空白的必填字段名
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("companhia", &self.airline),
            ("origem", &self.origin),
            ("destino", &self.destination),
            ("data", &self.date),
            ("hora", &self.time),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// 校验并组装请求
    pub fn validate(&self) -> ClientResult<PreparedPrediction> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ClientError::validation(format!(
                "Campos obrigatórios não preenchidos: {}",
                missing.join(", ")
            )));
        }

        let departure = Departure::from_form(&self.date, &self.time)
            .ok_or_else(|| ClientError::validation(INVALID_DEPARTURE))?;

        Ok(PreparedPrediction {
            request: PredictionRequest {
                airline: self.airline.trim().to_string(),
                origin: self.origin.trim().to_string(),
                destination: self.destination.trim().to_string(),
                departure: departure.to_iso(),
            },
            departure,
        })
    }
}

// =========================================================
// 结果
// =========================================================

/// 一次成功的预测，仅在内存中保留
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub request: PredictionRequest,
    pub departure: Departure,
    pub response: PredictionResponse,
}

impl PredictionResult {
    pub fn outcome(&self) -> PredictionOutcome {
        self.response.predict.prediction_result
    }

    /// 延误时使用醒目的徽章样式
    pub fn is_destructive(&self) -> bool {
        self.outcome().is_delayed()
    }

    pub fn badge_label(&self) -> &'static str {
        if self.is_destructive() {
            BADGE_DELAYED
        } else {
            BADGE_ON_TIME
        }
    }

    pub fn caption(&self) -> &'static str {
        if self.is_destructive() {
            CAPTION_DELAYED
        } else {
            CAPTION_ON_TIME
        }
    }

    /// 如 `92.0%`
    pub fn probability_text(&self) -> String {
        format_probability(self.response.predict.prediction_probability)
    }

    pub fn departure_text(&self) -> String {
        self.departure.display_short()
    }

    pub fn weather(&self) -> Option<&Weather> {
        self.response.weather.as_ref()
    }

    pub fn airline_name<'a>(&'a self, airlines: &'a [Airline]) -> &'a str {
        airline_name(airlines, &self.request.airline)
    }

    pub fn origin_name<'a>(&'a self, airports: &'a [Airport]) -> &'a str {
        airport_name(airports, &self.request.origin)
    }

    pub fn destination_name<'a>(&'a self, airports: &'a [Airport]) -> &'a str {
        airport_name(airports, &self.request.destination)
    }
}

// =========================================================
// 状态机
// =========================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub enum PredictionState {
    #[default]
    Idle,
    Invalid(String),
    Submitting,
    Success(PredictionResult),
    Failed(String),
}

impl PredictionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, PredictionState::Submitting)
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            PredictionState::Success(result) => Some(result),
            _ => None,
        }
    }

    /// Invalid 与 Failed 的提示文字
    pub fn error_message(&self) -> Option<&str> {
        match self {
            PredictionState::Invalid(msg) | PredictionState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// 校验并提交表单
///
/// 校验失败时不会调用 API。成功后调用一次 `on_success`（用于刷新历史记录），
/// 它不影响返回的结果。
pub async fn submit_prediction<H, T>(
    api: &ApiClient<H, T>,
    form: &PredictionForm,
    on_success: impl FnOnce(),
) -> PredictionState
where
    H: HttpClient,
    T: TokenProvider,
{
    match form.validate() {
        Ok(prepared) => send_prediction(api, prepared, on_success).await,
        Err(e) => {
            log_warn!("[Predict] Invalid form: {}", e);
            PredictionState::Invalid(e.message().to_string())
        }
    }
}

/// 发送已校验的请求，宿主可以先把状态置为 `Submitting` 再等待它
pub async fn send_prediction<H, T>(
    api: &ApiClient<H, T>,
    prepared: PreparedPrediction,
    on_success: impl FnOnce(),
) -> PredictionState
where
    H: HttpClient,
    T: TokenProvider,
{
    let PreparedPrediction { request, departure } = prepared;
    log_info!(
        "[Predict] {} {} -> {} at {}",
        request.airline,
        request.origin,
        request.destination,
        request.departure
    );

    match api.predict(&request).await {
        Ok(response) => {
            on_success();
            PredictionState::Success(PredictionResult {
                request,
                departure,
                response,
            })
        }
        Err(e) => {
            log_error!("[Predict] Request failed: {}", e);
            PredictionState::Failed(e.message().to_string())
        }
    }
}

#[cfg(test)]
mod tests;
