//! 실거래 기록 레코드.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{AgeClass, TradeType};

/// 한 건의 과거 실거래.
///
/// 고유 키는 없으며, 한 번의 수집 실행 내에서
/// (단지, 평형, 거래일, 가격, 층) 조합으로 중복 제거됩니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// 단지 번호
    pub complex_no: String,
    /// 단지명
    pub complex_name: String,
    /// 평형 번호 (포털 내부 크기 코드)
    pub pyeong_no: String,
    /// 면적 라벨
    pub pyeong_name: String,
    /// 고유 평형 라벨 (예: "33A")
    pub pyeong_name2: String,
    /// 정규 평형 라벨 (예: "33")
    pub canonical_size: String,
    /// 거래 유형
    pub trade_type: Option<TradeType>,
    /// 거래 층
    pub floor: Option<i32>,
    /// 거래일
    pub deal_date: Option<NaiveDate>,
    /// 거래가 원문 (예: "13억 5,000")
    pub deal_price_raw: String,
    /// 거래가 (만원)
    pub deal_amount: Option<i64>,
    /// 다운로드일 기준 경과 연수 구분
    pub age_class: Option<AgeClass>,
}

impl TransactionRecord {
    /// 실행 내 중복 제거에 사용되는 복합 키.
    pub fn dedup_key(&self) -> (String, String, Option<NaiveDate>, Option<i64>, Option<i32>) {
        (
            self.complex_no.clone(),
            self.canonical_size.clone(),
            self.deal_date,
            self.deal_amount,
            self.floor,
        )
    }
}
