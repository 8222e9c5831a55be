//! 포털 세션 자격증명.
//!
//! Bearer 토큰과 쿠키는 외부에서 공급됩니다 (환경 변수 또는 .env).
//! 토큰 갱신 로직은 없습니다. 소스에 자격증명을 하드코딩하지 마세요.

/// 포털 API 요청에 실리는 세션 자격증명.
#[derive(Debug, Clone, Default)]
pub struct PortalSession {
    /// Authorization 헤더 값 (예: "Bearer eyJ...")
    pub authorization: String,
    /// User-Agent 헤더 값
    pub user_agent: String,
    /// 쿠키 이름/값 쌍
    pub cookies: Vec<(String, String)>,
}

/// 세션 쿠키로 읽어 오는 환경 변수 이름들.
const COOKIE_ENV_KEYS: &[&str] = &["NNB", "ASID", "NAC"];

impl PortalSession {
    /// 환경 변수에서 세션을 구성합니다.
    ///
    /// `AUTHORIZATION`, `USER_AGENT` 및 쿠키 변수(`NNB`, `ASID`, `NAC`)를
    /// 읽습니다. 없는 쿠키는 건너뛰고, `landHomeFlashUseYn=Y`는 항상
    /// 포함됩니다.
    pub fn from_env() -> Self {
        let mut cookies: Vec<(String, String)> = COOKIE_ENV_KEYS
            .iter()
            .filter_map(|key| std::env::var(key).ok().map(|v| (key.to_string(), v)))
            .collect();
        cookies.push(("landHomeFlashUseYn".to_string(), "Y".to_string()));

        Self {
            authorization: std::env::var("AUTHORIZATION").unwrap_or_default(),
            user_agent: std::env::var("USER_AGENT")
                .unwrap_or_else(|_| "Mozilla/5.0".to_string()),
            cookies,
        }
    }

    /// Cookie 헤더 값을 조립합니다.
    pub fn cookie_header(&self) -> String {
        self.cookies
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// 인증 토큰이 설정되어 있는지 확인합니다.
    pub fn has_authorization(&self) -> bool {
        !self.authorization.trim().is_empty()
    }
}
