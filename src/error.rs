use std::fmt;

// =========================================================
// 错误类型枚举
// =========================================================

/// 错误类型
///
/// 页面根据类型决定展示方式：校验与接口错误就地显示，
/// 会话过期提示重新登录。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 表单缺失字段等，在发出请求前检测
    Validation,
    /// 已认证请求收到 401
    SessionExpired,
    /// 其他非 2xx 响应
    Api { status: u16 },
    /// 请求未能送达（网络 / fetch 失败）
    Network,
    /// 请求或响应体的序列化失败
    Decode,
}

impl ErrorKind {
    /// 机器可读的错误代码
    pub fn error_code(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION",
            ErrorKind::SessionExpired => "SESSION_EXPIRED",
            ErrorKind::Api { .. } => "API_ERROR",
            ErrorKind::Network => "NETWORK_ERROR",
            ErrorKind::Decode => "DECODE_ERROR",
        }
    }

    /// 对应的 HTTP 状态码（若有）
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ErrorKind::SessionExpired => Some(401),
            ErrorKind::Api { status } => Some(*status),
            _ => None,
        }
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSpan {
    /// 操作名称，如 "api.airlines", "cache.reference"
    pub operation: String,
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 会话过期时展示给用户的消息
pub const SESSION_EXPIRED_MESSAGE: &str = "Sessão expirada. Faça login novamente.";

/// 客户端错误
///
/// `message` 是直接展示给用户的文本；`spans` 只用于日志。
#[derive(Debug, Clone, PartialEq)]
pub struct ClientError {
    pub kind: ErrorKind,
    pub message: String,
    spans: Vec<ErrorSpan>,
}

impl ClientError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn session_expired() -> Self {
        Self::new(ErrorKind::SessionExpired, SESSION_EXPIRED_MESSAGE)
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Api { status }, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    // --- Context builders ---

    /// 添加操作追踪（无额外细节）
    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    /// 添加操作追踪（带额外细节）
    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    // --- Accessors ---

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }

    pub fn is_session_expired(&self) -> bool {
        self.kind == ErrorKind::SessionExpired
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ClientError {}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::decode(e.to_string())
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_trace() {
        let err = ClientError::api(500, "Erro ao buscar voos")
            .in_op("api.flights")
            .in_op_with("http.send", "GET /flights");
        assert_eq!(
            err.to_string(),
            "[API_ERROR] Erro ao buscar voos | trace: api.flights -> http.send(GET /flights)"
        );
        assert_eq!(err.message(), "Erro ao buscar voos");
    }

    #[test]
    fn test_session_expired() {
        let err = ClientError::session_expired();
        assert!(err.is_session_expired());
        assert_eq!(err.kind.status_code(), Some(401));
        assert_eq!(err.message(), SESSION_EXPIRED_MESSAGE);
    }
}
