//! 병합 결과(매물 + 파생 지표) 레코드.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    ExposureRates, LatestDeal, ListingRecord, SizeTypeStats, WindowStats,
};

/// 매물 한 건에 실거래 통계와 시세·단지 정보를 병합한 결과 행.
///
/// 파생 필드는 별도로 영속화되지 않으며 병합 단계에서만 계산됩니다.
/// 조인 키가 없는 매물은 파생 필드가 비어 있는 채로 유지됩니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergedListing {
    /// 원본 매물
    pub listing: ListingRecord,

    // ---- 평형 정보에서 매핑 ----
    /// 동일 타입 세대수
    pub household_count: Option<i64>,
    /// 동일 타입 매매 매물 수
    pub deal_count: Option<i64>,
    /// 동일 타입 매매 최저 호가 (만원)
    pub deal_price_min: Option<i64>,
    /// 동일 타입 매매 최고 호가 (만원)
    pub deal_price_max: Option<i64>,
    /// 평형별 매물 출현율
    pub size_exposure: ExposureRates,

    // ---- 단지 정보에서 매핑 ----
    /// 총 세대수
    pub total_household_count: Option<i64>,
    /// 단지 매물 출현율
    pub complex_exposure: ExposureRates,
    /// 배정 학교명
    pub school_name: String,
    /// 학교 도보 소요 시간 (분)
    pub school_walk_time: Option<i32>,

    // ---- KB 시세에서 매핑 ----
    /// KB 매매 상위평균가 (만원)
    pub kb_deal_upper: Option<i64>,
    /// KB 매매 일반평균가 (만원)
    pub kb_deal_average: Option<i64>,
    /// KB 매매 하위평균가 (만원)
    pub kb_deal_low: Option<i64>,
    /// KB 전세가율 (%)
    pub kb_lease_per_deal_rate: String,

    // ---- 정규 평형 기준 실거래 통계 ----
    /// 최근 5년 통계
    pub pyeong_stats_5: WindowStats,
    /// 최근 3년 통계
    pub pyeong_stats_3: WindowStats,
    /// 최근 1년 통계
    pub pyeong_stats_1: WindowStats,

    // ---- 고유 평형 타입 기준 실거래 통계 ----
    /// 최근 5년 통계
    pub pyeongtype_stats_5: SizeTypeStats,
    /// 최근 3년 통계
    pub pyeongtype_stats_3: SizeTypeStats,
    /// 최근 1년 통계
    pub pyeongtype_stats_1: SizeTypeStats,

    // ---- 파생 지표 ----
    /// 최신 실거래
    pub latest_deal: LatestDeal,
    /// 실거래 중위값 (전체 기간, 만원)
    pub real_price_median: Option<Decimal>,
    /// 버블 지수 (매매 매물만, 0 이상)
    pub bubble_score: Option<Decimal>,
    /// 호가 대비 5년 전고점 갭 (%)
    pub real_max_5_gap: Option<Decimal>,
    /// 호가 대비 5년 전저점 갭 (%)
    pub real_min_5_gap: Option<Decimal>,
    /// 호가 대비 KB 상위평균 갭 (%)
    pub kb_upper_gap: Option<Decimal>,
    /// 호가 대비 동일 타입 최저 호가 갭 (%)
    pub deal_min_gap: Option<Decimal>,
}

impl MergedListing {
    /// 매물만 채운 병합 행을 생성합니다.
    pub fn from_listing(listing: ListingRecord) -> Self {
        Self {
            listing,
            ..Default::default()
        }
    }
}
