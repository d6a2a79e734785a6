use crate::{
    Airline, Airport, FlightRecord, FlightStats, GoogleLoginRequest, LoginRequest, LoginResponse,
    PredictionRequest, PredictionResponse, RegisterRequest,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether requests with this method carry a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

/// How the backend formats the body of a failed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorBody {
    /// Plain-text message (legacy auth endpoints).
    Text,
    /// JSON object with a `detail` or `erro` field.
    Json,
}

/// How the backend formats the body of a successful response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseBody {
    Json,
    /// Plain text, decoded as a JSON string.
    Text,
    /// Ignored; decoded as `null`.
    Empty,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path (or prefix, see [`ApiRequest::path`]).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the bearer token is attached.
    const AUTHENTICATED: bool = true;
    /// Format of success bodies.
    const RESPONSE_BODY: ResponseBody = ResponseBody::Json;
    /// Format of error bodies.
    const ERROR_BODY: ErrorBody = ErrorBody::Json;
    /// Fallback message when the error body carries nothing usable.
    const FAILURE_MESSAGE: &'static str;

    /// Full path for this particular request. Defaults to [`ApiRequest::PATH`].
    fn path(&self) -> String {
        Self::PATH.to_string()
    }
}

// =========================================================
// Auth
// =========================================================

impl ApiRequest for RegisterRequest {
    /// Plain-text confirmation.
    type Response = String;
    const PATH: &'static str = "/auth/register";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;
    const RESPONSE_BODY: ResponseBody = ResponseBody::Text;
    const ERROR_BODY: ErrorBody = ErrorBody::Text;
    const FAILURE_MESSAGE: &'static str = "Erro ao registrar usuário";
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const PATH: &'static str = "/auth/login";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;
    const ERROR_BODY: ErrorBody = ErrorBody::Text;
    const FAILURE_MESSAGE: &'static str = "Erro ao fazer login";
}

impl ApiRequest for GoogleLoginRequest {
    type Response = LoginResponse;
    const PATH: &'static str = "/auth/google";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;
    const ERROR_BODY: ErrorBody = ErrorBody::Text;
    const FAILURE_MESSAGE: &'static str = "Erro ao fazer login com Google";
}

// =========================================================
// Prediction
// =========================================================

impl ApiRequest for PredictionRequest {
    type Response = PredictionResponse;
    const PATH: &'static str = "/flights/predict";
    const METHOD: HttpMethod = HttpMethod::Post;
    const FAILURE_MESSAGE: &'static str = "Erro ao fazer predição";
}

// =========================================================
// Flights
// =========================================================

/// List every flight record
#[derive(Debug, Serialize, Deserialize)]
pub struct ListFlightsRequest;

impl ApiRequest for ListFlightsRequest {
    type Response = Vec<FlightRecord>;
    const PATH: &'static str = "/flights";
    const METHOD: HttpMethod = HttpMethod::Get;
    const FAILURE_MESSAGE: &'static str = "Erro ao buscar voos";
}

/// Fetch a single flight record
#[derive(Debug, Serialize, Deserialize)]
pub struct GetFlightRequest {
    pub id: i64,
}

impl ApiRequest for GetFlightRequest {
    type Response = FlightRecord;
    const PATH: &'static str = "/flights";
    const METHOD: HttpMethod = HttpMethod::Get;
    const FAILURE_MESSAGE: &'static str = "Erro ao buscar voo";

    fn path(&self) -> String {
        format!("{}/{}", Self::PATH, self.id)
    }
}

/// Delete a flight record. Success carries an empty body (200 or 204).
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteFlightRequest {
    pub id: i64,
}

impl ApiRequest for DeleteFlightRequest {
    type Response = ();
    const PATH: &'static str = "/flights";
    const METHOD: HttpMethod = HttpMethod::Delete;
    const RESPONSE_BODY: ResponseBody = ResponseBody::Empty;
    const FAILURE_MESSAGE: &'static str = "Erro ao deletar voo";

    fn path(&self) -> String {
        format!("{}/{}", Self::PATH, self.id)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchByOriginRequest {
    pub origin: String,
}

impl ApiRequest for SearchByOriginRequest {
    type Response = Vec<FlightRecord>;
    const PATH: &'static str = "/flights/search/origin";
    const METHOD: HttpMethod = HttpMethod::Get;
    const FAILURE_MESSAGE: &'static str = "Erro ao buscar voos";

    fn path(&self) -> String {
        format!("{}?origin={}", Self::PATH, encode_query(&self.origin))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchByDestinationRequest {
    pub destination: String,
}

impl ApiRequest for SearchByDestinationRequest {
    type Response = Vec<FlightRecord>;
    const PATH: &'static str = "/flights/search/destination";
    const METHOD: HttpMethod = HttpMethod::Get;
    const FAILURE_MESSAGE: &'static str = "Erro ao buscar voos";

    fn path(&self) -> String {
        format!("{}?destination={}", Self::PATH, encode_query(&self.destination))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DelayedFlightsRequest;

impl ApiRequest for DelayedFlightsRequest {
    type Response = Vec<FlightRecord>;
    const PATH: &'static str = "/flights/search/delayed";
    const METHOD: HttpMethod = HttpMethod::Get;
    const FAILURE_MESSAGE: &'static str = "Erro ao buscar voos atrasados";
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OnTimeFlightsRequest;

impl ApiRequest for OnTimeFlightsRequest {
    type Response = Vec<FlightRecord>;
    const PATH: &'static str = "/flights/search/ontime";
    const METHOD: HttpMethod = HttpMethod::Get;
    const FAILURE_MESSAGE: &'static str = "Erro ao buscar voos pontuais";
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FlightStatsRequest;

impl ApiRequest for FlightStatsRequest {
    type Response = FlightStats;
    const PATH: &'static str = "/flights/stats";
    const METHOD: HttpMethod = HttpMethod::Get;
    const FAILURE_MESSAGE: &'static str = "Erro ao carregar estatísticas";
}

// =========================================================
// Reference data
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ListAirlinesRequest;

impl ApiRequest for ListAirlinesRequest {
    type Response = Vec<Airline>;
    const PATH: &'static str = "/airlines";
    const METHOD: HttpMethod = HttpMethod::Get;
    const FAILURE_MESSAGE: &'static str = "Erro ao buscar companhias aéreas";
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListAirportsRequest;

impl ApiRequest for ListAirportsRequest {
    type Response = Vec<Airport>;
    const PATH: &'static str = "/airports";
    const METHOD: HttpMethod = HttpMethod::Get;
    const FAILURE_MESSAGE: &'static str = "Erro ao buscar aeroportos";
}

/// Percent-encode a query value (RFC 3986 unreserved characters pass through).
fn encode_query(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_with_parameters() {
        assert_eq!(GetFlightRequest { id: 42 }.path(), "/flights/42");
        assert_eq!(DeleteFlightRequest { id: 3 }.path(), "/flights/3");
        assert_eq!(
            SearchByOriginRequest {
                origin: "GRU".into()
            }
            .path(),
            "/flights/search/origin?origin=GRU"
        );
        assert_eq!(
            SearchByDestinationRequest {
                destination: "São Paulo".into()
            }
            .path(),
            "/flights/search/destination?destination=S%C3%A3o%20Paulo"
        );
        assert_eq!(ListAirlinesRequest.path(), "/airlines");
    }

    #[test]
    fn test_auth_endpoints_are_unauthenticated_text_errors() {
        assert!(!LoginRequest::AUTHENTICATED);
        assert!(!RegisterRequest::AUTHENTICATED);
        assert_eq!(LoginRequest::ERROR_BODY, ErrorBody::Text);
        assert!(PredictionRequest::AUTHENTICATED);
        assert_eq!(PredictionRequest::ERROR_BODY, ErrorBody::Json);
    }

    #[test]
    fn test_only_post_and_put_carry_bodies() {
        assert!(HttpMethod::Post.has_body());
        assert!(!HttpMethod::Get.has_body());
        assert!(!HttpMethod::Delete.has_body());
    }
}
