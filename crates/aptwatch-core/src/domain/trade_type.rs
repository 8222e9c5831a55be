//! 거래 유형 구분.

use serde::{Deserialize, Serialize};

/// 매물/실거래의 거래 유형.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TradeType {
    /// 매매
    #[default]
    Sale,
    /// 전세
    Lease,
    /// 월세
    MonthlyRent,
    /// 단기임대
    ShortTermRent,
}

impl TradeType {
    /// 포털 API의 거래 유형 코드.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sale => "A1",
            Self::Lease => "B1",
            Self::MonthlyRent => "B2",
            Self::ShortTermRent => "B3",
        }
    }

    /// 한글 거래 유형명.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sale => "매매",
            Self::Lease => "전세",
            Self::MonthlyRent => "월세",
            Self::ShortTermRent => "단기임대",
        }
    }

    /// 한글 유형명 또는 코드에서 파싱합니다.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "매매" | "A1" => Some(Self::Sale),
            "전세" | "B1" => Some(Self::Lease),
            "월세" | "B2" => Some(Self::MonthlyRent),
            "단기임대" | "B3" => Some(Self::ShortTermRent),
            _ => None,
        }
    }
}

impl std::fmt::Display for TradeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
