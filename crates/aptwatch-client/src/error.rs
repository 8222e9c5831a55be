//! 포털 API 클라이언트 에러.

use thiserror::Error;

/// 포털 API 호출 에러.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP 요청 실패 (연결/타임아웃 포함)
    #[error("HTTP 요청 실패: {0}")]
    Http(#[from] reqwest::Error),

    /// 비정상 상태 코드
    #[error("요청 실패 (상태코드 {status}): {url}")]
    Status {
        /// HTTP 상태 코드
        status: u16,
        /// 요청 URL
        url: String,
    },

    /// JSON 디코딩 실패. 원본 응답을 함께 보존합니다.
    #[error("JSON 디코딩 실패 ({url}): {source}")]
    Decode {
        /// 요청 URL
        url: String,
        /// 디코딩 에러
        source: serde_json::Error,
        /// 원본 응답 본문
        body: String,
    },
}

/// 클라이언트 작업을 위한 Result 타입.
pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for aptwatch_core::AptError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) => aptwatch_core::AptError::Network(e.to_string()),
            ClientError::Status { .. } => aptwatch_core::AptError::Network(err.to_string()),
            ClientError::Decode { .. } => aptwatch_core::AptError::Decode(err.to_string()),
        }
    }
}
