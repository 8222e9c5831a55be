//! 포털 API 응답 와이어 타입.
//!
//! 포털 JSON은 같은 필드를 숫자로 줄 때도, 문자열로 줄 때도 있어
//! 수치 필드에는 관용 디시리얼라이저([`de`])를 사용합니다.
//! 누락 필드는 모두 기본값으로 수용합니다.

use serde::Deserialize;

/// 숫자/문자열 혼용 필드를 위한 디시리얼라이저 모음.
pub mod de {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flex {
        I(i64),
        F(f64),
        S(String),
    }

    /// 숫자 또는 숫자 문자열을 `Option<i64>`로 읽습니다. 빈 문자열은 `None`.
    pub fn flex_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Flex>::deserialize(deserializer)?;
        Ok(match value {
            Some(Flex::I(i)) => Some(i),
            Some(Flex::F(f)) => Some(f as i64),
            Some(Flex::S(s)) => s.trim().replace(',', "").parse().ok(),
            None => None,
        })
    }

    /// 숫자 또는 숫자 문자열을 `Option<i32>`로 읽습니다.
    pub fn flex_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(flex_i64(deserializer)?.map(|v| v as i32))
    }

    /// 숫자 또는 숫자 문자열을 `Option<f64>`로 읽습니다.
    pub fn flex_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Flex>::deserialize(deserializer)?;
        Ok(match value {
            Some(Flex::I(i)) => Some(i as f64),
            Some(Flex::F(f)) => Some(f),
            Some(Flex::S(s)) => s.trim().replace(',', "").parse().ok(),
            None => None,
        })
    }

    /// 숫자 또는 문자열을 `String`으로 읽습니다. null/누락은 빈 문자열.
    pub fn flex_string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Flex>::deserialize(deserializer)?;
        Ok(match value {
            Some(Flex::I(i)) => i.to_string(),
            Some(Flex::F(f)) => f.to_string(),
            Some(Flex::S(s)) => s,
            None => String::new(),
        })
    }
}

/// 단지 상세 응답 (`/api/complexes/{id}`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexDetailResponse {
    /// 단지 기본 정보
    #[serde(default)]
    pub complex_detail: Option<ComplexDetail>,
    /// 평형별 상세 목록
    #[serde(default)]
    pub complex_pyeong_detail_list: Vec<PyeongDetail>,
}

/// 단지 기본 정보.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexDetail {
    #[serde(default, deserialize_with = "de::flex_string")]
    pub complex_no: String,
    #[serde(default)]
    pub complex_name: String,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub cortar_no: String,
    #[serde(default)]
    pub detail_address: String,
    #[serde(default)]
    pub road_address: String,
    #[serde(default, deserialize_with = "de::flex_i64")]
    pub total_household_count: Option<i64>,
    #[serde(default, deserialize_with = "de::flex_i64")]
    pub total_lease_household_count: Option<i64>,
    #[serde(default, deserialize_with = "de::flex_i32")]
    pub high_floor: Option<i32>,
    #[serde(default, deserialize_with = "de::flex_i32")]
    pub low_floor: Option<i32>,
    /// 사용승인일 (YYYYMMDD)
    #[serde(default, deserialize_with = "de::flex_string")]
    pub use_approve_ymd: String,
    #[serde(default, deserialize_with = "de::flex_i32")]
    pub total_dong_count: Option<i32>,
    #[serde(default, deserialize_with = "de::flex_f64")]
    pub max_supply_area: Option<f64>,
    #[serde(default, deserialize_with = "de::flex_f64")]
    pub min_supply_area: Option<f64>,
    #[serde(default, deserialize_with = "de::flex_i64")]
    pub deal_count: Option<i64>,
    #[serde(default, deserialize_with = "de::flex_i64")]
    pub lease_count: Option<i64>,
    #[serde(default, deserialize_with = "de::flex_i64")]
    pub rent_count: Option<i64>,
    #[serde(default, deserialize_with = "de::flex_i64")]
    pub short_term_rent_count: Option<i64>,
    #[serde(default, deserialize_with = "de::flex_f64")]
    pub batl_ratio: Option<f64>,
    #[serde(default, deserialize_with = "de::flex_f64")]
    pub btl_ratio: Option<f64>,
    #[serde(default, deserialize_with = "de::flex_i64")]
    pub parking_possible_count: Option<i64>,
    #[serde(default, deserialize_with = "de::flex_f64")]
    pub parking_count_by_household: Option<f64>,
    #[serde(default)]
    pub construction_company_name: String,
    /// 평형 구성 문자열 (예: "80, 112㎡")
    #[serde(default)]
    pub pyoeng_names: String,
}

/// 평형별 상세 정보.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PyeongDetail {
    #[serde(default, deserialize_with = "de::flex_string")]
    pub pyeong_no: String,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub supply_area: String,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub supply_pyeong: String,
    /// 면적 라벨 (매물 areaName과 대응)
    #[serde(default, deserialize_with = "de::flex_string")]
    pub pyeong_name: String,
    /// 고유 평형 라벨 (예: "33A")
    #[serde(default, deserialize_with = "de::flex_string")]
    pub pyeong_name2: String,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub exclusive_area: String,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub exclusive_pyeong: String,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub exclusive_rate: String,
    #[serde(default, deserialize_with = "de::flex_i64")]
    pub household_count_by_pyeong: Option<i64>,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub room_cnt: String,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub bathroom_cnt: String,
    #[serde(default)]
    pub article_statistics: ArticleStatistics,
    #[serde(default)]
    pub average_maintenance_cost: MaintenanceCost,
}

/// 평형별 매물 통계.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleStatistics {
    #[serde(default, deserialize_with = "de::flex_i64")]
    pub deal_count: Option<i64>,
    #[serde(default, deserialize_with = "de::flex_i64")]
    pub lease_count: Option<i64>,
    #[serde(default, deserialize_with = "de::flex_i64")]
    pub rent_count: Option<i64>,
    #[serde(default, deserialize_with = "de::flex_i64")]
    pub short_term_rent_count: Option<i64>,
    /// 매매 최저 호가 원문 (예: "13억 5,000")
    #[serde(default, deserialize_with = "de::flex_string")]
    pub deal_price_min: String,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub deal_price_max: String,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub deal_price_per_space_min: String,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub deal_price_per_space_max: String,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub deal_price_string: String,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub lease_price_string: String,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub lease_price_rate_string: String,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub rent_deposit_price_min: String,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub rent_price_min: String,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub rent_deposit_price_max: String,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub rent_price_max: String,
}

/// 평균 관리비.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceCost {
    #[serde(default, deserialize_with = "de::flex_i64")]
    pub average_total_price: Option<i64>,
}

/// 학교 목록 응답 (`/api/complexes/{id}/schools`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolsResponse {
    #[serde(default)]
    pub schools: Vec<School>,
}

/// 배정 학교 정보.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    #[serde(default)]
    pub school_name: String,
    #[serde(default, deserialize_with = "de::flex_i32")]
    pub walk_time: Option<i32>,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub student_statistics_base_ymd: String,
    #[serde(default, deserialize_with = "de::flex_f64")]
    pub student_count_per_teacher: Option<f64>,
    #[serde(default, deserialize_with = "de::flex_f64")]
    pub student_count_per_classroom: Option<f64>,
    #[serde(default, deserialize_with = "de::flex_i64")]
    pub total_student_count: Option<i64>,
}

/// 실거래 페이지 응답 (`/api/complexes/{id}/prices/real`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealPriceResponse {
    #[serde(default)]
    pub real_price_on_month_list: Vec<RealPriceMonth>,
    /// 다음 페이지 커서. 없거나 반복되면 수집을 멈춥니다.
    #[serde(default, deserialize_with = "de::flex_i64")]
    pub added_row_count: Option<i64>,
}

/// 월 단위 실거래 블록.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealPriceMonth {
    #[serde(default)]
    pub real_price_list: Vec<RealPrice>,
}

/// 실거래 한 건.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealPrice {
    #[serde(default, deserialize_with = "de::flex_string")]
    pub trade_type: String,
    #[serde(default, deserialize_with = "de::flex_i32")]
    pub trade_year: Option<i32>,
    #[serde(default, deserialize_with = "de::flex_i32")]
    pub trade_month: Option<i32>,
    #[serde(default, deserialize_with = "de::flex_i32")]
    pub trade_date: Option<i32>,
    /// 거래가 원문 (예: "13억 5,000")
    #[serde(default, deserialize_with = "de::flex_string")]
    pub deal_price: String,
    #[serde(default, deserialize_with = "de::flex_i32")]
    pub floor: Option<i32>,
}

impl RealPrice {
    /// 페이지네이션 중복 제거 키.
    pub fn dedup_key(&self) -> (Option<i32>, Option<i32>, Option<i32>, String, Option<i32>) {
        (
            self.trade_year,
            self.trade_month,
            self.trade_date,
            self.deal_price.clone(),
            self.floor,
        )
    }
}

/// 시세 제공자 응답 (`/api/complexes/{id}/prices`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketPriceResponse {
    #[serde(default)]
    pub market_prices: Vec<MarketPrice>,
}

/// 시세 제공자 가격 밴드 한 행.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketPrice {
    /// 기준일 (YYYYMMDD)
    #[serde(default, deserialize_with = "de::flex_string")]
    pub base_year_month_day: String,
    #[serde(default, deserialize_with = "de::flex_i64")]
    pub deal_upper_price_limit: Option<i64>,
    #[serde(default, deserialize_with = "de::flex_i64")]
    pub deal_average_price: Option<i64>,
    #[serde(default, deserialize_with = "de::flex_i64")]
    pub deal_low_price_limit: Option<i64>,
    #[serde(default, deserialize_with = "de::flex_i64")]
    pub deal_average_price_change_amount: Option<i64>,
    #[serde(default, deserialize_with = "de::flex_i64")]
    pub lease_upper_price_limit: Option<i64>,
    #[serde(default, deserialize_with = "de::flex_i64")]
    pub lease_average_price: Option<i64>,
    #[serde(default, deserialize_with = "de::flex_i64")]
    pub lease_low_price_limit: Option<i64>,
    #[serde(default, deserialize_with = "de::flex_i64")]
    pub lease_average_price_change_amount: Option<i64>,
    #[serde(default, deserialize_with = "de::flex_i64")]
    pub rent_low_price: Option<i64>,
    #[serde(default, deserialize_with = "de::flex_i64")]
    pub deposit: Option<i64>,
    #[serde(default, deserialize_with = "de::flex_i64")]
    pub rent_upper_price: Option<i64>,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub lease_per_deal_rate: String,
}

/// 매물 목록 페이지 응답 (`/api/articles/complex/{id}`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleListResponse {
    #[serde(default)]
    pub article_list: Vec<Article>,
    #[serde(default)]
    pub is_more_data: bool,
}

/// 매물 한 건.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default, deserialize_with = "de::flex_string")]
    pub article_no: String,
    #[serde(default)]
    pub article_name: String,
    #[serde(default)]
    pub trade_type_name: String,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub area_name: String,
    /// 공급면적 (㎡)
    #[serde(default, deserialize_with = "de::flex_f64")]
    pub area1: Option<f64>,
    /// 전용면적 (㎡)
    #[serde(default, deserialize_with = "de::flex_f64")]
    pub area2: Option<f64>,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub floor_info: String,
    /// 호가/보증금 원문 (예: "13억 5,000")
    #[serde(default, deserialize_with = "de::flex_string")]
    pub deal_or_warrant_prc: String,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub rent_prc: String,
    #[serde(default)]
    pub direction: String,
    #[serde(default)]
    pub building_name: String,
    /// 매물 확인일 (YYYYMMDD 또는 YYYY-MM-DD)
    #[serde(default, deserialize_with = "de::flex_string")]
    pub article_confirm_ymd: String,
    #[serde(default, deserialize_with = "de::flex_i64")]
    pub same_addr_cnt: Option<i64>,
    #[serde(default)]
    pub article_feature_desc: String,
    #[serde(default)]
    pub realtor_name: String,
}

/// 동별 공시가격 응답 (`/api/complexes/{id}/buildings/landprice`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandPriceResponse {
    #[serde(default)]
    pub land_price_total: Option<LandPriceTotal>,
}

/// 동별 층 목록.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandPriceTotal {
    #[serde(default)]
    pub land_price_floors: Vec<LandPriceFloor>,
}

/// 한 층의 공시가격 행 묶음.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandPriceFloor {
    #[serde(default, deserialize_with = "de::flex_i32")]
    pub floor: Option<i32>,
    #[serde(default)]
    pub land_prices: Vec<LandPrice>,
}

/// 공시가격 행.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandPrice {
    #[serde(default, deserialize_with = "de::flex_string")]
    pub hscp_no: String,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub hscp_nm: String,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub dong_nm: String,
}

/// 지역별 단지 목록 응답 (`/api/regions/complexes`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionComplexesResponse {
    #[serde(default)]
    pub complex_list: Vec<ComplexSummary>,
}

/// 단지 목록 요약 항목.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexSummary {
    #[serde(default, deserialize_with = "de::flex_string")]
    pub complex_no: String,
    #[serde(default)]
    pub complex_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flex_fields_accept_strings_and_numbers() {
        let json = r#"{
            "tradeYear": "2024", "tradeMonth": 3, "tradeDate": "15",
            "dealPrice": "13억 5,000", "floor": "7"
        }"#;
        let rp: RealPrice = serde_json::from_str(json).unwrap();
        assert_eq!(rp.trade_year, Some(2024));
        assert_eq!(rp.trade_month, Some(3));
        assert_eq!(rp.floor, Some(7));
        assert_eq!(rp.deal_price, "13억 5,000");
    }

    #[test]
    fn test_missing_fields_default() {
        let resp: RealPriceResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.real_price_on_month_list.is_empty());
        assert_eq!(resp.added_row_count, None);
    }

    #[test]
    fn test_article_numeric_price_field() {
        let json = r#"{"articleNo": 2412345, "dealOrWarrantPrc": "5억", "sameAddrCnt": "3"}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.article_no, "2412345");
        assert_eq!(article.same_addr_cnt, Some(3));
    }
}
