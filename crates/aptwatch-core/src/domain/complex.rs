//! 아파트 단지 기본 정보 레코드.

use serde::{Deserialize, Serialize};

/// 한 아파트 단지의 기본 정보.
///
/// 수집 실행마다 새로 생성되며 실행 중에는 불변입니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplexRecord {
    /// 단지 번호 (포털 내부 식별자)
    pub complex_no: String,
    /// 단지명
    pub complex_name: String,
    /// 법정동 코드
    pub cortar_no: String,
    /// 상세 주소
    pub detail_address: String,
    /// 도로명 주소
    pub road_address: String,
    /// 총 세대수
    pub total_household_count: Option<i64>,
    /// 임대 세대수
    pub total_lease_household_count: Option<i64>,
    /// 최고층
    pub high_floor: Option<i32>,
    /// 최저층
    pub low_floor: Option<i32>,
    /// 사용승인일 (YYYY-MM-DD)
    pub use_approve_date: String,
    /// 동 수
    pub total_dong_count: Option<i32>,
    /// 최대 공급면적
    pub max_supply_area: Option<f64>,
    /// 최소 공급면적
    pub min_supply_area: Option<f64>,
    /// 매매 매물 수
    pub deal_count: Option<i64>,
    /// 전세 매물 수
    pub lease_count: Option<i64>,
    /// 월세 매물 수
    pub rent_count: Option<i64>,
    /// 단기임대 매물 수
    pub short_term_rent_count: Option<i64>,
    /// 용적률 (%)
    pub batl_ratio: Option<f64>,
    /// 건폐율 (%)
    pub btl_ratio: Option<f64>,
    /// 주차 가능 대수
    pub parking_possible_count: Option<i64>,
    /// 세대당 주차대수
    pub parking_count_by_household: Option<f64>,
    /// 시공사
    pub construction_company: String,
    /// 평형 구성 문자열 (예: "80㎡, 112㎡")
    pub pyeong_names: String,
    /// 매물 출현율 (매매/전세/월세)
    pub exposure: ExposureRates,
    /// 배정 학교 정보
    pub school: Option<SchoolInfo>,
}

/// 매물 출현율 (매물 수 / 세대수 × 100).
///
/// 세대수가 0이거나 없으면 빈 문자열로 남습니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExposureRates {
    /// 매매 매물 출현율 (예: "3.1%")
    pub sale: String,
    /// 전세 매물 출현율
    pub lease: String,
    /// 월세 매물 출현율
    pub monthly_rent: String,
}

/// 배정 초등학교 정보.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchoolInfo {
    /// 학교명
    pub school_name: String,
    /// 도보 소요 시간 (분)
    pub walk_time: Option<i32>,
    /// 통계 기준일
    pub statistics_base_date: String,
    /// 교사당 학생 수
    pub student_count_per_teacher: Option<f64>,
    /// 학급당 학생 수
    pub student_count_per_classroom: Option<f64>,
    /// 총 학생 수
    pub total_student_count: Option<i64>,
}
