//! # Aptwatch Client
//!
//! 부동산 포털 내부 API 클라이언트와 수집기를 제공합니다.
//!
//! - [`LandClient`]: 단지/학교/실거래/시세/매물/동 정보 엔드포인트 호출
//! - [`Collector`]: 두 단지에 대한 고정 순서 수집 파이프라인
//! - [`PortalSession`]: 외부에서 주입되는 세션 자격증명 (쿠키 + Bearer)
//!
//! 모든 호출은 순차적으로 실행되며, 실패한 호출은 해당 호출의 데이터만
//! 비운 채 파이프라인을 계속 진행합니다 (재시도 없음).

pub mod client;
pub mod collect;
pub mod error;
pub mod session;
pub mod wire;

pub use client::{LandClient, PriceProvider};
pub use collect::Collector;
pub use error::{ClientError, ClientResult};
pub use session::PortalSession;
