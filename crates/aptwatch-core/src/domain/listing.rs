//! 매물(호가) 레코드.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::FloorBand;

/// 한 건의 노출 중인 매물.
///
/// 키는 포털이 부여한 매물 번호입니다. 조인 이후 단지 번호와
/// 정규 평형 라벨이 채워지며, 키가 매핑에 없으면 빈 문자열로 남되
/// 레코드 자체는 유지됩니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingRecord {
    /// 매물 번호
    pub article_no: String,
    /// 매물명 (보통 단지명과 동일)
    pub article_name: String,
    /// 매칭된 단지 번호 (조인 결과, 미매칭 시 빈 문자열)
    pub complex_no: String,
    /// 매칭된 단지명
    pub complex_name: String,
    /// 거래 유형명 (매매/전세/월세)
    pub trade_type_name: String,
    /// 면적 라벨 (포털 areaName)
    pub area_name: String,
    /// 고유 평형 라벨 (조인 결과, 예: "33A")
    pub pyeong_name: String,
    /// 정규 평형 라벨 (후행 영문 제거)
    pub canonical_size: String,
    /// 공급면적 (㎡)
    pub supply_area: Option<f64>,
    /// 전용면적 (㎡)
    pub exclusive_area: Option<f64>,
    /// 층 정보 원문 (예: "5/10")
    pub floor_info: String,
    /// 층 밴드 분류
    pub floor_band: FloorBand,
    /// 호가 원문 (예: "13억 5,000")
    pub price_raw: String,
    /// 호가 (만원)
    pub price: Option<i64>,
    /// 월세액 원문
    pub rent_price_raw: String,
    /// 방향
    pub direction: String,
    /// 동 이름 (예: "101동")
    pub building_name: String,
    /// 동 번호 (예: 101)
    pub building_number: Option<i64>,
    /// 매물 확인일
    pub confirm_date: Option<NaiveDate>,
    /// 매물 등록 경과일
    pub age_days: Option<i64>,
    /// 동일 주소 매물 수
    pub same_address_count: Option<i64>,
    /// 매물 특징 설명
    pub feature_description: String,
    /// 중개사무소명
    pub realtor_name: String,
}

impl ListingRecord {
    /// 매매 매물인지 확인합니다.
    pub fn is_sale(&self) -> bool {
        self.trade_type_name == "매매"
    }
}
