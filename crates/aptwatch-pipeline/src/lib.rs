//! # Aptwatch Pipeline
//!
//! 수집된 데이터셋을 분석 결과로 바꾸는 변환 단계 모음입니다.
//!
//! - [`normalize`]: 가격·평형 라벨·층 표기 정규화
//! - [`enrich`]: 데이터셋 파생 필드 채우기 (조인 + 정규화 적용)
//! - [`join`]: 이기종 크기 식별자 매핑
//! - [`aggregate`]: 1/3/5년 윈도우 실거래 통계
//! - [`score`]: 버블 점수와 갭 지수
//! - [`merge`]: 매물 + 통계 + 시세 병합 결과 테이블
//! - [`snapshot`]: CSV 스냅샷 덮어쓰기
//! - [`region`]: 법정동 코드 조회
//!
//! 흐름: `enrich_dataset` → `merge_listings` → `SnapshotWriter::write_all`.

pub mod aggregate;
pub mod enrich;
pub mod join;
pub mod merge;
pub mod normalize;
pub mod region;
pub mod score;
pub mod snapshot;

pub use enrich::enrich_dataset;
pub use join::SizeJoiner;
pub use merge::merge_listings;
pub use region::RegionTable;
pub use score::{BubbleGrade, GapGrade, GapOutcome, GapSelection};
pub use snapshot::SnapshotWriter;
