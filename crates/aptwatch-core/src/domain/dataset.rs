//! 한 번의 수집 실행이 생성하는 전체 데이터셋.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{
    BuildingRecord, ComplexRecord, ListingRecord, TransactionRecord, UnitSizeRecord,
    ValuationRecord,
};

/// 수집 실행 한 번의 산출물 전체.
///
/// 증분 갱신은 없습니다. 실행마다 전체 스냅샷이 새로 만들어지고
/// 이전 산출물을 통째로 덮어씁니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// 다운로드 시각 (모든 산출물 공통)
    pub download_at: NaiveDateTime,
    /// 단지 기본 정보
    pub complexes: Vec<ComplexRecord>,
    /// 평형 정보
    pub unit_sizes: Vec<UnitSizeRecord>,
    /// 실거래 기록
    pub transactions: Vec<TransactionRecord>,
    /// 매물 기록
    pub listings: Vec<ListingRecord>,
    /// 시세 제공자 기록
    pub valuations: Vec<ValuationRecord>,
    /// 동별 층 정보
    pub buildings: Vec<BuildingRecord>,
}

impl Dataset {
    /// 주어진 다운로드 시각으로 빈 데이터셋을 생성합니다.
    pub fn new(download_at: NaiveDateTime) -> Self {
        Self {
            download_at,
            complexes: Vec::new(),
            unit_sizes: Vec::new(),
            transactions: Vec::new(),
            listings: Vec::new(),
            valuations: Vec::new(),
            buildings: Vec::new(),
        }
    }

    /// 다운로드 일자 (시각 제외).
    pub fn download_date(&self) -> chrono::NaiveDate {
        self.download_at.date()
    }

    /// 스냅샷 컬럼에 쓰이는 다운로드 시각 문자열.
    pub fn download_stamp(&self) -> String {
        self.download_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
