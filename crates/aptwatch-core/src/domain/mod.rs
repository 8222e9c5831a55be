//! 아파트 분석 파이프라인의 도메인 모델.
//!
//! 모든 엔티티는 문자열 식별자를 키로 하는 평탄한 레코드입니다.
//! 한 번의 수집 실행마다 전체 스냅샷이 새로 생성됩니다.

mod building;
mod complex;
mod dataset;
mod floor;
mod listing;
mod merged;
mod statistics;
mod trade_type;
mod transaction;
mod unit_size;
mod valuation;

pub use building::*;
pub use complex::*;
pub use dataset::*;
pub use floor::*;
pub use listing::*;
pub use merged::*;
pub use statistics::*;
pub use trade_type::*;
pub use transaction::*;
pub use unit_size::*;
pub use valuation::*;
