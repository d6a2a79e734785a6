use serde::{Deserialize, Serialize};

pub mod date;
pub mod format;
pub mod protocol;
pub mod stats;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// 后端返回的预测结果标签
pub const LABEL_DELAYED: &str = "Atrasado";
pub const LABEL_ON_TIME: &str = "Pontual";

// =========================================================
// 认证 (Auth)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 第三方 (Google) 登录，携带 OAuth 凭据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoogleLoginRequest {
    pub credential: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

// =========================================================
// 参考数据 (Reference Data)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airline {
    #[serde(rename = "airlineCode")]
    pub code: String,
    #[serde(rename = "airlineName")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    #[serde(rename = "airportCode")]
    pub code: String,
    #[serde(rename = "airportName")]
    pub name: String,
    #[serde(rename = "airportCity")]
    pub city: String,
    #[serde(rename = "airportState")]
    pub state: String,
}

/// 按代码查找航空公司名称，找不到时回退为代码本身
pub fn airline_name<'a>(airlines: &'a [Airline], code: &'a str) -> &'a str {
    airlines
        .iter()
        .find(|a| a.code == code)
        .map(|a| a.name.as_str())
        .unwrap_or(code)
}

/// 按代码查找机场名称，找不到时回退为代码本身
pub fn airport_name<'a>(airports: &'a [Airport], code: &'a str) -> &'a str {
    airports
        .iter()
        .find(|a| a.code == code)
        .map(|a| a.name.as_str())
        .unwrap_or(code)
}

// =========================================================
// 预测 (Prediction)
// =========================================================

/// 预测结果
///
/// 后端使用葡语标签传输；除 "Atrasado" 外的任何值都视为准点。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PredictionOutcome {
    #[default]
    OnTime,
    Delayed,
}

impl PredictionOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            PredictionOutcome::OnTime => LABEL_ON_TIME,
            PredictionOutcome::Delayed => LABEL_DELAYED,
        }
    }

    pub fn is_delayed(&self) -> bool {
        matches!(self, PredictionOutcome::Delayed)
    }
}

impl From<String> for PredictionOutcome {
    fn from(s: String) -> Self {
        if s == LABEL_DELAYED {
            PredictionOutcome::Delayed
        } else {
            PredictionOutcome::OnTime
        }
    }
}

impl From<PredictionOutcome> for String {
    fn from(outcome: PredictionOutcome) -> Self {
        outcome.label().to_string()
    }
}

/// 预测请求，字段名沿用后端的葡语契约
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(rename = "companhia")]
    pub airline: String,
    #[serde(rename = "origem")]
    pub origin: String,
    #[serde(rename = "destino")]
    pub destination: String,
    /// ISO-8601 本地时间，如 `2025-01-01T10:00:00`
    #[serde(rename = "data_partida")]
    pub departure: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub prediction_result: PredictionOutcome,
    /// 取值范围 [0, 1]
    pub prediction_probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weather {
    pub temperature: String,
    pub precipitation: String,
    pub wind_speed: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predict: Prediction,
    #[serde(default)]
    pub weather: Option<Weather>,
}

// =========================================================
// 历史记录 (Flight Records)
// =========================================================

/// 历史预测记录
///
/// 后端字段在不同版本间存在漂移（`distanceKm` / `distanceMeters`，
/// `scheduledDeparture` / `scheduledDepartureDate`），在反序列化边界统一为
/// 公里与 `scheduled_departure`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "FlightRecordWire")]
pub struct FlightRecord {
    pub id: i64,
    pub airline: String,
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub scheduled_departure: String,
    pub scheduled_arrival: String,
    pub prediction_result: PredictionOutcome,
    pub prediction_probability: f64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlightRecordWire {
    id: i64,
    airline: String,
    origin: String,
    destination: String,
    #[serde(default)]
    distance_km: Option<f64>,
    #[serde(default)]
    distance_meters: Option<f64>,
    #[serde(default, alias = "scheduledDepartureDate")]
    scheduled_departure: String,
    #[serde(default, alias = "scheduledArrivalDate")]
    scheduled_arrival: String,
    prediction_result: PredictionOutcome,
    prediction_probability: f64,
    #[serde(default)]
    created_at: String,
    #[serde(default)]
    updated_at: String,
}

impl From<FlightRecordWire> for FlightRecord {
    fn from(w: FlightRecordWire) -> Self {
        let distance_km = match (w.distance_km, w.distance_meters) {
            (Some(km), _) => km,
            (None, Some(m)) => m / 1000.0,
            (None, None) => 0.0,
        };
        Self {
            id: w.id,
            airline: w.airline,
            origin: w.origin,
            destination: w.destination,
            distance_km,
            scheduled_departure: w.scheduled_departure,
            scheduled_arrival: w.scheduled_arrival,
            prediction_result: w.prediction_result,
            prediction_probability: w.prediction_probability,
            created_at: w.created_at,
            updated_at: w.updated_at,
        }
    }
}

// =========================================================
// 统计 (Statistics)
// =========================================================

/// 一组航班的延误计数
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayTally {
    pub total_flights: u64,
    pub delayed_flights: u64,
    /// 百分比，0–100
    pub delay_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total_flights: u64,
    pub delayed_flights: u64,
    pub ontime_flights: u64,
    pub delay_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateStats {
    pub date: String,
    #[serde(flatten)]
    pub tally: DelayTally,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirlineStats {
    pub airline: String,
    #[serde(flatten)]
    pub tally: DelayTally,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginStats {
    pub origin: String,
    #[serde(flatten)]
    pub tally: DelayTally,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationStats {
    pub destination: String,
    #[serde(flatten)]
    pub tally: DelayTally,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStats {
    pub origin: String,
    pub destination: String,
    #[serde(flatten)]
    pub tally: DelayTally,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightStats {
    pub overall_stats: OverallStats,
    #[serde(default)]
    pub stats_by_date: Vec<DateStats>,
    #[serde(default)]
    pub stats_by_airline: Vec<AirlineStats>,
    #[serde(default)]
    pub stats_by_origin: Vec<OriginStats>,
    #[serde(default)]
    pub stats_by_destination: Vec<DestinationStats>,
    #[serde(default)]
    pub stats_by_route: Vec<RouteStats>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flight_record_accepts_km_and_departure() {
        let json = r#"{
            "id": 7, "airline": "AZU", "origin": "GRU", "destination": "CGH",
            "distanceKm": 25.0, "scheduledDeparture": "2025-01-01T10:00:00",
            "scheduledArrival": "2025-01-01T11:00:00",
            "predictionResult": "Pontual", "predictionProbability": 0.92,
            "createdAt": "2025-01-01T09:00:00", "updatedAt": "2025-01-01T09:00:00"
        }"#;
        let record: FlightRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.distance_km, 25.0);
        assert_eq!(record.scheduled_departure, "2025-01-01T10:00:00");
        assert_eq!(record.prediction_result, PredictionOutcome::OnTime);
    }

    #[test]
    fn test_flight_record_converts_meters_and_legacy_date_field() {
        let json = r#"{
            "id": 8, "airline": "GLO", "origin": "GRU", "destination": "SDU",
            "distanceMeters": 366000, "scheduledDepartureDate": "2025-02-01 08:30:00",
            "predictionResult": "Atrasado", "predictionProbability": 0.61
        }"#;
        let record: FlightRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.distance_km, 366.0);
        assert_eq!(record.scheduled_departure, "2025-02-01 08:30:00");
        assert!(record.prediction_result.is_delayed());
        assert!(record.created_at.is_empty());
    }

    #[test]
    fn test_prediction_request_uses_backend_field_names() {
        let req = PredictionRequest {
            airline: "AZU".into(),
            origin: "GRU".into(),
            destination: "CGH".into(),
            departure: "2025-01-01T10:00:00".into(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "companhia": "AZU",
                "origem": "GRU",
                "destino": "CGH",
                "data_partida": "2025-01-01T10:00:00"
            })
        );
    }

    #[test]
    fn test_prediction_response_without_weather() {
        let json = r#"{"predict":{"predictionResult":"Atrasado","predictionProbability":0.7}}"#;
        let resp: PredictionResponse = serde_json::from_str(json).unwrap();
        assert!(resp.weather.is_none());
        assert!(resp.predict.prediction_result.is_delayed());
    }

    #[test]
    fn test_unknown_outcome_label_is_on_time() {
        let outcome: PredictionOutcome = serde_json::from_str("\"Indefinido\"").unwrap();
        assert_eq!(outcome, PredictionOutcome::OnTime);
    }

    #[test]
    fn test_name_lookup_falls_back_to_code() {
        let airlines = vec![Airline {
            code: "AZU".into(),
            name: "Azul".into(),
        }];
        assert_eq!(airline_name(&airlines, "AZU"), "Azul");
        assert_eq!(airline_name(&airlines, "TAM"), "TAM");
        assert_eq!(airport_name(&[], "GRU"), "GRU");
    }

    #[test]
    fn test_stats_flatten_tally() {
        let json = r#"{
            "overallStats": {"totalFlights": 10, "delayedFlights": 3, "ontimeFlights": 7, "delayPercentage": 30.0},
            "statsByRoute": [{"origin": "GRU", "destination": "CGH", "totalFlights": 4, "delayedFlights": 1, "delayPercentage": 25.0}]
        }"#;
        let stats: FlightStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.overall_stats.ontime_flights, 7);
        assert_eq!(stats.stats_by_route[0].tally.total_flights, 4);
        assert!(stats.stats_by_airline.is_empty());
    }
}
