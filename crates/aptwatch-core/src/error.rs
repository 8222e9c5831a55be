//! 분석 파이프라인의 에러 타입.
//!
//! 이 모듈은 파이프라인 전반에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

/// 핵심 파이프라인 에러.
#[derive(Debug, Error)]
pub enum AptError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 네트워크 에러
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 응답 디코딩 에러
    #[error("디코딩 에러: {0}")]
    Decode(String),

    /// 데이터 에러
    #[error("데이터 에러: {0}")]
    Data(String),

    /// 스냅샷 파일 에러
    #[error("스냅샷 에러: {0}")]
    Snapshot(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 찾을 수 없음
    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 파이프라인 작업을 위한 Result 타입.
pub type AptResult<T> = Result<T, AptError>;

impl AptError {
    /// 호출 단위로 무시하고 계속 진행할 수 있는 에러인지 확인합니다.
    ///
    /// 네트워크 실패와 디코딩 실패는 해당 호출의 데이터만 비우고
    /// 파이프라인은 계속 진행합니다.
    pub fn is_soft(&self) -> bool {
        matches!(self, AptError::Network(_) | AptError::Decode(_))
    }
}

impl From<serde_json::Error> for AptError {
    fn from(err: serde_json::Error) -> Self {
        AptError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for AptError {
    fn from(err: std::io::Error) -> Self {
        AptError::Snapshot(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_soft() {
        let network_err = AptError::Network("timeout".to_string());
        assert!(network_err.is_soft());

        let config_err = AptError::Config("missing token".to_string());
        assert!(!config_err.is_soft());
    }

    #[test]
    fn test_error_display() {
        let err = AptError::Data("빈 응답".to_string());
        assert_eq!(err.to_string(), "데이터 에러: 빈 응답");
    }
}
