//! 실거래 통계 타입.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 실거래의 경과 연수 구분.
///
/// 다운로드일 기준 거래일까지의 경과 연수(일수/365.25)를
/// ≤1 → `Y1`, ≤3 → `Y3`, ≤5 → `Y5`로 버킷팅합니다.
/// 5년을 초과한 거래는 구분 없음으로 모든 윈도우에서 제외됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeClass {
    /// 1년 이내
    Y1,
    /// 1년 초과 3년 이내
    Y3,
    /// 3년 초과 5년 이내
    Y5,
}

impl AgeClass {
    /// 스냅샷 컬럼에 쓰이는 숫자 라벨.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Y1 => "1",
            Self::Y3 => "3",
            Self::Y5 => "5",
        }
    }

    /// 숫자 라벨에서 파싱합니다.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "1" => Some(Self::Y1),
            "3" => Some(Self::Y3),
            "5" => Some(Self::Y5),
            _ => None,
        }
    }
}

/// 통계 집계 윈도우.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Window {
    /// 최근 1년
    Y1,
    /// 최근 3년
    Y3,
    /// 최근 5년
    Y5,
}

impl Window {
    /// 이 윈도우에 포함되는 경과 연수 구분.
    pub fn allowed(&self) -> &'static [AgeClass] {
        match self {
            Self::Y1 => &[AgeClass::Y1],
            Self::Y3 => &[AgeClass::Y1, AgeClass::Y3],
            Self::Y5 => &[AgeClass::Y1, AgeClass::Y3, AgeClass::Y5],
        }
    }

    /// 컬럼 접미사에 쓰이는 연수 라벨.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Y1 => "1",
            Self::Y3 => "3",
            Self::Y5 => "5",
        }
    }
}

/// (단지, 정규 평형) 단위의 윈도우별 실거래 통계.
///
/// 해당 윈도우에 거래가 없으면 모든 필드가 `None`입니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindowStats {
    /// 최고 실거래가 (만원)
    pub max: Option<i64>,
    /// 최고가 거래일
    pub max_date: Option<NaiveDate>,
    /// 평균 실거래가 (만원)
    pub avg: Option<Decimal>,
    /// 중위 실거래가 (만원)
    pub med: Option<Decimal>,
    /// 최저 실거래가 (만원)
    pub min: Option<i64>,
    /// 최저가 거래일
    pub min_date: Option<NaiveDate>,
}

impl WindowStats {
    /// 통계가 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.max.is_none() && self.min.is_none() && self.avg.is_none()
    }
}

/// (단지, 고유 평형 타입) 단위의 윈도우별 통계 (일자 없이 값만).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SizeTypeStats {
    /// 최고 실거래가 (만원)
    pub max: Option<i64>,
    /// 평균 실거래가 (만원)
    pub avg: Option<Decimal>,
    /// 최저 실거래가 (만원)
    pub min: Option<i64>,
}

/// (단지, 정규 평형)의 최신 실거래.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LatestDeal {
    /// 거래일
    pub date: Option<NaiveDate>,
    /// 거래가 (만원)
    pub amount: Option<i64>,
    /// 거래 층
    pub floor: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_allowed_classes() {
        assert_eq!(Window::Y1.allowed(), &[AgeClass::Y1]);
        assert_eq!(Window::Y3.allowed(), &[AgeClass::Y1, AgeClass::Y3]);
        assert_eq!(
            Window::Y5.allowed(),
            &[AgeClass::Y1, AgeClass::Y3, AgeClass::Y5]
        );
    }

    #[test]
    fn test_age_class_labels() {
        assert_eq!(AgeClass::parse("3"), Some(AgeClass::Y3));
        assert_eq!(AgeClass::parse(""), None);
        assert_eq!(AgeClass::Y5.label(), "5");
    }
}
