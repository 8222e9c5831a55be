//! regions 명령: 법정동 코드 테이블 조회.

use std::path::PathBuf;

use anyhow::Context;

use aptwatch_core::config::AppConfig;
use aptwatch_pipeline::RegionTable;

pub fn run(
    config: &AppConfig,
    file: Option<String>,
    sido: Option<&str>,
    sigungu: Option<&str>,
) -> anyhow::Result<()> {
    let path = file
        .map(PathBuf::from)
        .unwrap_or_else(|| config.snapshot.region_file.clone());
    let table = RegionTable::load(&path)
        .with_context(|| format!("법정동 코드 파일 로드 실패: {}", path.display()))?;

    let rows = table.filter(sido, sigungu);
    if rows.is_empty() {
        println!("조건에 맞는 법정동이 없습니다.");
        if sido.is_none() {
            println!("시/도 목록: {}", table.sido_options().join(", "));
        }
        return Ok(());
    }

    println!("{:<12} {:<8} {:<12} {}", "cortarNo", "시/도", "시/군/구", "읍/면/동");
    for row in rows {
        println!(
            "{:<12} {:<8} {:<12} {}",
            row.cortar_no, row.sido, row.sigungu, row.dong
        );
    }
    Ok(())
}
