//! 평형(호) 정보 레코드.

use serde::{Deserialize, Serialize};

use crate::domain::ExposureRates;

/// 단지 내 한 평형 타입의 정보.
///
/// 키는 (단지 번호, 평형 번호)입니다. `pyeong_name`(면적 라벨),
/// `pyeong_name2`(고유 평형 라벨, 예: "33A"), 그리고 후행 영문을 제거한
/// 정규 평형 라벨까지 세 가지 크기 식별자를 모두 보유합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitSizeRecord {
    /// 단지 번호
    pub complex_no: String,
    /// 단지명
    pub complex_name: String,
    /// 평형 번호 (포털 내부 크기 코드)
    pub pyeong_no: String,
    /// 공급면적 (㎡)
    pub supply_area: String,
    /// 공급면적 (평)
    pub supply_pyeong: String,
    /// 면적 라벨 (매물 areaName과 대응)
    pub pyeong_name: String,
    /// 고유 평형 라벨 (예: "33A")
    pub pyeong_name2: String,
    /// 정규 평형 라벨 (후행 영문 제거, 예: "33")
    pub canonical_size: String,
    /// 전용면적 (㎡)
    pub exclusive_area: String,
    /// 전용면적 (평)
    pub exclusive_pyeong: String,
    /// 전용률 (%)
    pub exclusive_rate: String,
    /// 평형별 세대수
    pub household_count: Option<i64>,
    /// 매매 매물 수
    pub deal_count: Option<i64>,
    /// 전세 매물 수
    pub lease_count: Option<i64>,
    /// 월세 매물 수
    pub rent_count: Option<i64>,
    /// 단기임대 매물 수
    pub short_term_rent_count: Option<i64>,
    /// 매매 최저 호가 (원문, 예: "13억 5,000")
    pub deal_price_min_raw: String,
    /// 매매 최고 호가 (원문)
    pub deal_price_max_raw: String,
    /// 매매 최저 호가 (만원)
    pub deal_price_min: Option<i64>,
    /// 매매 최고 호가 (만원)
    pub deal_price_max: Option<i64>,
    /// 평당 매매가 범위 문자열
    pub deal_price_per_space: String,
    /// 전세가 범위 문자열
    pub lease_price: String,
    /// 전세가율 문자열
    pub lease_price_rate: String,
    /// 월세 보증금 최저 (원문)
    pub rent_deposit_min: String,
    /// 월세 최저 (원문)
    pub rent_price_min: String,
    /// 월세 보증금 최고 (원문)
    pub rent_deposit_max: String,
    /// 월세 최고 (원문)
    pub rent_price_max: String,
    /// 방 수
    pub room_count: String,
    /// 욕실 수
    pub bathroom_count: String,
    /// 평균 관리비 총액 (원)
    pub average_maintenance_cost: Option<i64>,
    /// 평형별 매물 출현율
    pub exposure: ExposureRates,
}
