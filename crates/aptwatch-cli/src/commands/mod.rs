//! CLI 명령어 구현 모듈.

pub mod analyze;
pub mod complexes;
pub mod regions;
