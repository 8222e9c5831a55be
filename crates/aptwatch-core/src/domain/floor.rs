//! 층 구분 밴드.

use serde::{Deserialize, Serialize};

/// 매물의 층 정보를 분류한 밴드.
///
/// "5/10" 같은 현재층/최고층 표기에서 파생되며, 파싱에 실패하면
/// `Unknown`으로 분류되어 빈 문자열로 출력됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FloorBand {
    /// 1층
    First,
    /// 저층
    Low,
    /// 중층
    Mid,
    /// 고층
    High,
    /// 탑층 (최고층)
    Top,
    /// 분류 불가
    #[default]
    Unknown,
}

impl FloorBand {
    /// 한글 라벨. `Unknown`은 빈 문자열입니다.
    pub fn label(&self) -> &'static str {
        match self {
            Self::First => "1층",
            Self::Low => "저층",
            Self::Mid => "중층",
            Self::High => "고층",
            Self::Top => "탑층",
            Self::Unknown => "",
        }
    }
}

impl std::fmt::Display for FloorBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
