//! 시세 제공자(KB 등) 가격 밴드 레코드.

use serde::{Deserialize, Serialize};

/// (단지, 평형, 제공자)별 시세 스냅샷.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValuationRecord {
    /// 단지 번호
    pub complex_no: String,
    /// 단지명
    pub complex_name: String,
    /// 평형 번호 (포털 내부 크기 코드)
    pub pyeong_no: String,
    /// 면적 라벨 (조인 결과)
    pub pyeong_name: String,
    /// 고유 평형 라벨 (조인 결과)
    pub pyeong_name2: String,
    /// 시세 제공자 (kbstar, kab)
    pub provider: String,
    /// 기준일 (YYYY-MM-DD)
    pub base_date: String,
    /// 매매 상위평균가 (만원)
    pub deal_upper_price_limit: Option<i64>,
    /// 매매 일반평균가 (만원)
    pub deal_average_price: Option<i64>,
    /// 매매 하위평균가 (만원)
    pub deal_low_price_limit: Option<i64>,
    /// 매매 평균가 변동액
    pub deal_average_price_change: Option<i64>,
    /// 전세 상위평균가 (만원)
    pub lease_upper_price_limit: Option<i64>,
    /// 전세 일반평균가 (만원)
    pub lease_average_price: Option<i64>,
    /// 전세 하위평균가 (만원)
    pub lease_low_price_limit: Option<i64>,
    /// 전세 평균가 변동액
    pub lease_average_price_change: Option<i64>,
    /// 월세 하한
    pub rent_low_price: Option<i64>,
    /// 월세 보증금
    pub deposit: Option<i64>,
    /// 월세 상한
    pub rent_upper_price: Option<i64>,
    /// 전세가율 (%)
    pub lease_per_deal_rate: String,
}

impl ValuationRecord {
    /// KB 시세 레코드인지 확인합니다.
    pub fn is_kbstar(&self) -> bool {
        self.provider.eq_ignore_ascii_case("kbstar")
    }
}
