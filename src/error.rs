// region:    --- Imports
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

// endregion: --- Imports

// region:    --- Error
/// 마켓 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    /// 입찰 금액 부족, 잘못된 금액, 종료된 경매 등
    #[error("{message}")]
    Validation { code: &'static str, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    /// 동시에 들어온 더 높은 입찰에 밀린 경우
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 재시도 가능한 실패 (타임아웃, 커넥션 풀 고갈, I/O)
    #[error("Transient failure: {0}")]
    Transient(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type MarketResult<T> = Result<T, MarketError>;

impl MarketError {
    pub fn validation(code: &'static str, message: impl Into<String>) -> Self {
        MarketError::Validation {
            code,
            message: message.into(),
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, MarketError::Transient(_))
    }

    /// 응답 본문에 들어가는 에러 코드
    pub fn code(&self) -> &'static str {
        match self {
            MarketError::Validation { code, .. } => code,
            MarketError::NotFound(_) => "NOT_FOUND",
            MarketError::Conflict(_) => "CONFLICT",
            MarketError::Transient(_) => "TRANSIENT",
            MarketError::Database(_) => "DATABASE",
            MarketError::Config(_) => "CONFIG",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            MarketError::Validation { .. } => StatusCode::BAD_REQUEST,
            MarketError::NotFound(_) => StatusCode::NOT_FOUND,
            MarketError::Conflict(_) => StatusCode::CONFLICT,
            MarketError::Transient(_) => StatusCode::SERVICE_UNAVAILABLE,
            MarketError::Database(_) | MarketError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// 풀 타임아웃과 I/O 에러는 재시도 대상으로 분류
impl From<sqlx::Error> for MarketError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                MarketError::Transient(e.to_string())
            }
            sqlx::Error::RowNotFound => MarketError::NotFound("row not found".to_string()),
            other => MarketError::Database(other),
        }
    }
}

/// 추출기 거절도 같은 JSON 에러 형식으로 응답
impl From<QueryRejection> for MarketError {
    fn from(rejection: QueryRejection) -> Self {
        MarketError::validation("INVALID_QUERY", rejection.body_text())
    }
}

impl From<PathRejection> for MarketError {
    fn from(rejection: PathRejection) -> Self {
        MarketError::validation("INVALID_PATH", rejection.body_text())
    }
}

impl From<JsonRejection> for MarketError {
    fn from(rejection: JsonRejection) -> Self {
        MarketError::validation("INVALID_BODY", rejection.body_text())
    }
}

impl IntoResponse for MarketError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{:<12} --> 요청 처리 실패: {:?}", "Error", self);
        }
        (
            status,
            Json(serde_json::json!({
                "error": self.to_string(),
                "code": self.code(),
            })),
        )
            .into_response()
    }
}
// endregion: --- Error
