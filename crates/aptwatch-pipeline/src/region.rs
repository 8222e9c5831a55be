//! 법정동 코드(cortarNo) 조회 테이블.
//!
//! 읽기 전용 입력 CSV에서 시/도 → 시/군/구 → 읍/면/동 계층과
//! 법정동 코드를 읽습니다.

use std::path::Path;

use serde::Deserialize;

use aptwatch_core::error::{AptError, AptResult};

/// 법정동 코드 테이블 한 행.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionRow {
    /// 시/도
    #[serde(rename = "시/도")]
    pub sido: String,
    /// 시/군/구
    #[serde(rename = "시/군/구")]
    pub sigungu: String,
    /// 읍/면/동
    #[serde(rename = "읍/면/동")]
    pub dong: String,
    /// 법정동 코드
    #[serde(rename = "cortarNo")]
    pub cortar_no: String,
}

/// 법정동 코드 조회 테이블.
#[derive(Debug, Default)]
pub struct RegionTable {
    rows: Vec<RegionRow>,
}

impl RegionTable {
    /// CSV 파일에서 테이블을 읽습니다.
    pub fn load(path: impl AsRef<Path>) -> AptResult<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| AptError::NotFound(format!("{}: {e}", path.display())))?;

        let mut rows = Vec::new();
        for row in reader.deserialize() {
            let row: RegionRow =
                row.map_err(|e| AptError::Data(format!("{}: {e}", path.display())))?;
            rows.push(row);
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[RegionRow] {
        &self.rows
    }

    /// 시/도, 시/군/구로 필터링한 행. 빈 필터는 전체 허용입니다.
    pub fn filter(&self, sido: Option<&str>, sigungu: Option<&str>) -> Vec<&RegionRow> {
        self.rows
            .iter()
            .filter(|row| sido.map(|s| row.sido == s).unwrap_or(true))
            .filter(|row| sigungu.map(|s| row.sigungu == s).unwrap_or(true))
            .collect()
    }

    /// 시/도 목록 (정렬, 중복 제거).
    pub fn sido_options(&self) -> Vec<String> {
        let mut options: Vec<String> = self.rows.iter().map(|r| r.sido.clone()).collect();
        options.sort();
        options.dedup();
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "시/도,시/군/구,읍/면/동,cortarNo").unwrap();
        writeln!(file, "경기도,수원시 영통구,이의동,4111710300").unwrap();
        writeln!(file, "경기도,수원시 영통구,원천동,4111710200").unwrap();
        writeln!(file, "서울특별시,강남구,대치동,1168010600").unwrap();
        file
    }

    #[test]
    fn test_load_and_filter() {
        let file = sample_file();
        let table = RegionTable::load(file.path()).unwrap();
        assert_eq!(table.rows().len(), 3);

        let gyeonggi = table.filter(Some("경기도"), None);
        assert_eq!(gyeonggi.len(), 2);

        let yeongtong = table.filter(Some("경기도"), Some("수원시 영통구"));
        assert_eq!(yeongtong[0].cortar_no, "4111710300");

        assert_eq!(table.sido_options(), vec!["경기도", "서울특별시"]);
    }

    #[test]
    fn test_load_missing_file() {
        let result = RegionTable::load("/no/such/cortarNo.csv");
        assert!(matches!(result, Err(AptError::NotFound(_))));
    }
}
