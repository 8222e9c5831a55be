//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//! 포털 세션 자격증명(쿠키, Bearer 토큰)은 소스에 하드코딩하지 않고
//! 환경 변수 또는 설정 파일에서만 로드합니다.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 부동산 포털 API 설정
    #[serde(default)]
    pub portal: PortalConfig,
    /// 스냅샷 출력 설정
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 부동산 포털 API 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PortalConfig {
    /// REST API 기본 URL
    pub base_url: String,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// 페이지네이션 루프 안전 상한
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    /// 동(棟) 조회 최대 시도 횟수
    #[serde(default = "default_max_dong")]
    pub max_dong_probe: u32,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: "https://new.land.naver.com".to_string(),
            timeout_secs: default_timeout(),
            max_pages: default_max_pages(),
            max_dong_probe: default_max_dong(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
fn default_max_pages() -> u32 {
    100
}
fn default_max_dong() -> u32 {
    50
}

/// 스냅샷 출력 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SnapshotConfig {
    /// CSV 스냅샷 디렉토리
    pub data_dir: PathBuf,
    /// 법정동 코드 CSV 경로
    pub region_file: PathBuf,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            region_file: PathBuf::from("data/cortarNo.csv"),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 환경 변수는 `APTWATCH__` 접두사와 `__` 구분자를 사용합니다.
    /// (예: `APTWATCH__PORTAL__BASE_URL`)
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("APTWATCH")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load("config/default.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.portal.timeout_secs, 30);
        assert_eq!(config.portal.max_dong_probe, 50);
        assert_eq!(config.snapshot.data_dir, PathBuf::from("data"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = AppConfig::load("does/not/exist.toml").unwrap();
        assert_eq!(config.portal.base_url, "https://new.land.naver.com");
    }
}
