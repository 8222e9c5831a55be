//! 이기종 크기 식별자 조인.
//!
//! 포털은 같은 평형을 세 가지 키로 부릅니다. 내부 크기 코드
//! (`pyeongNo`), 면적 라벨(`pyeongName` — 매물의 areaName과 같은 값),
//! 고유 평형 라벨(`pyeongName2`, 예: "33A"). [`SizeJoiner`]는 평형
//! 테이블에서 이 매핑을 만들어 실거래·매물·시세 레코드에 라벨을
//! 붙입니다. 매핑에 없는 키는 빈 라벨로 남고 레코드는 유지됩니다.

use std::collections::HashMap;

use aptwatch_core::domain::UnitSizeRecord;

use crate::normalize::canonical_size_label;

/// (단지, 크기 키) → 평형 라벨 매핑.
#[derive(Debug, Default)]
pub struct SizeJoiner {
    /// (complex_no, pyeong_no) → (pyeong_name, pyeong_name2)
    by_code: HashMap<(String, String), (String, String)>,
    /// (complex_no, area label) → pyeong_name2
    by_area: HashMap<(String, String), String>,
}

/// 조인으로 얻은 평형 라벨.
#[derive(Debug, Clone, Default)]
pub struct SizeLabels {
    /// 면적 라벨
    pub pyeong_name: String,
    /// 고유 평형 라벨 (예: "33A")
    pub pyeong_name2: String,
    /// 정규 평형 라벨 (예: "33")
    pub canonical: String,
}

impl SizeJoiner {
    /// 평형 테이블에서 매핑을 구축합니다.
    pub fn from_unit_sizes(unit_sizes: &[UnitSizeRecord]) -> Self {
        let mut by_code = HashMap::new();
        let mut by_area = HashMap::new();

        for unit in unit_sizes {
            let complex = unit.complex_no.trim().to_string();
            by_code.insert(
                (complex.clone(), unit.pyeong_no.trim().to_string()),
                (
                    unit.pyeong_name.trim().to_string(),
                    unit.pyeong_name2.trim().to_string(),
                ),
            );
            by_area.insert(
                (complex, unit.pyeong_name.trim().to_string()),
                unit.pyeong_name2.trim().to_string(),
            );
        }

        Self { by_code, by_area }
    }

    /// 내부 크기 코드로 라벨을 찾습니다 (실거래·시세용).
    pub fn labels_by_code(&self, complex_no: &str, pyeong_no: &str) -> SizeLabels {
        match self
            .by_code
            .get(&(complex_no.trim().to_string(), pyeong_no.trim().to_string()))
        {
            Some((name, name2)) => SizeLabels {
                pyeong_name: name.clone(),
                pyeong_name2: name2.clone(),
                canonical: canonical_size_label(name2),
            },
            None => SizeLabels::default(),
        }
    }

    /// 면적 라벨로 고유 평형 라벨을 찾습니다 (매물용).
    pub fn labels_by_area(&self, complex_no: &str, area_name: &str) -> SizeLabels {
        match self
            .by_area
            .get(&(complex_no.trim().to_string(), area_name.trim().to_string()))
        {
            Some(name2) => SizeLabels {
                pyeong_name: area_name.trim().to_string(),
                pyeong_name2: name2.clone(),
                canonical: canonical_size_label(name2),
            },
            None => SizeLabels::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(complex_no: &str, pyeong_no: &str, name: &str, name2: &str) -> UnitSizeRecord {
        UnitSizeRecord {
            complex_no: complex_no.to_string(),
            pyeong_no: pyeong_no.to_string(),
            pyeong_name: name.to_string(),
            pyeong_name2: name2.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_labels_by_code() {
        let joiner = SizeJoiner::from_unit_sizes(&[
            unit("138183", "3", "110", "33A"),
            unit("138183", "4", "110", "33B"),
        ]);

        let labels = joiner.labels_by_code("138183", "3");
        assert_eq!(labels.pyeong_name, "110");
        assert_eq!(labels.pyeong_name2, "33A");
        assert_eq!(labels.canonical, "33");
    }

    #[test]
    fn test_labels_by_area() {
        let joiner = SizeJoiner::from_unit_sizes(&[unit("138183", "3", "110", "33A")]);

        let labels = joiner.labels_by_area("138183", "110");
        assert_eq!(labels.pyeong_name2, "33A");
        assert_eq!(labels.canonical, "33");
    }

    #[test]
    fn test_missing_key_yields_blank_labels() {
        let joiner = SizeJoiner::from_unit_sizes(&[unit("138183", "3", "110", "33A")]);

        let labels = joiner.labels_by_code("999999", "3");
        assert!(labels.pyeong_name.is_empty());
        assert!(labels.pyeong_name2.is_empty());
        assert!(labels.canonical.is_empty());
    }

    #[test]
    fn test_keys_are_scoped_per_complex() {
        let joiner = SizeJoiner::from_unit_sizes(&[
            unit("138183", "3", "110", "33A"),
            unit("136913", "3", "84", "25"),
        ]);

        assert_eq!(joiner.labels_by_code("138183", "3").pyeong_name2, "33A");
        assert_eq!(joiner.labels_by_code("136913", "3").pyeong_name2, "25");
    }
}
