//! 동(棟)별 층 정보 레코드.

use serde::{Deserialize, Serialize};

/// 단지 내 한 동의 최고층 정보.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildingRecord {
    /// 단지 번호
    pub complex_no: String,
    /// 단지명
    pub complex_name: String,
    /// 동 번호 (조회 인덱스)
    pub dong_no: u32,
    /// 동 이름 (예: "101동")
    pub dong_name: String,
    /// 최고층
    pub max_floor: i32,
}
