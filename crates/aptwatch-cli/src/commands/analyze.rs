//! analyze 명령: 수집 → 스냅샷 → 병합 → 점수 요약.

use std::collections::BTreeMap;

use anyhow::{bail, Context};
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use tracing::warn;

use aptwatch_client::{Collector, LandClient, PortalSession};
use aptwatch_core::config::AppConfig;
use aptwatch_core::domain::{Dataset, MergedListing};
use aptwatch_pipeline::score::{gap_index, BubbleGrade, GapSelection};
use aptwatch_pipeline::{enrich_dataset, merge_listings, SnapshotWriter};

pub async fn run(
    config: &AppConfig,
    complex_ids: Vec<String>,
    pyeongs: Vec<String>,
) -> anyhow::Result<()> {
    if complex_ids.len() != 2 {
        bail!("--complex 는 정확히 두 번 지정해야 합니다 (받은 수: {})", complex_ids.len());
    }
    if !pyeongs.is_empty() && pyeongs.len() != 2 {
        bail!("--pyeong 은 생략하거나 두 번 지정해야 합니다");
    }

    let session = PortalSession::from_env();
    if !session.has_authorization() {
        warn!("AUTHORIZATION 환경 변수가 비어 있습니다. 포털이 요청을 거부할 수 있습니다.");
    }

    let client = LandClient::new(&config.portal, session)?;
    let collector = Collector::new(client, config.portal.max_dong_probe);

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.set_message(format!("단지 수집 중: {}", complex_ids.join(", ")));
    progress.enable_steady_tick(std::time::Duration::from_millis(120));

    let mut dataset = collector.collect(&complex_ids).await;

    progress.set_message("파생 필드 계산 중...");
    enrich_dataset(&mut dataset);

    progress.set_message("매물 병합 중...");
    let merged = merge_listings(&dataset);

    progress.set_message("스냅샷 저장 중...");
    let writer = SnapshotWriter::new(&config.snapshot);
    writer
        .write_all(&dataset, &merged)
        .context("스냅샷 저장 실패")?;

    progress.finish_with_message(format!(
        "수집 완료: 매물 {}건, 실거래 {}건",
        dataset.listings.len(),
        dataset.transactions.len()
    ));

    print_summary(&dataset, &merged, &complex_ids, &pyeongs);
    Ok(())
}

/// 단지별 기본 정보, 버블 등급 분포, 갭 지수를 표 형태로 출력합니다.
fn print_summary(
    dataset: &Dataset,
    merged: &[MergedListing],
    complex_ids: &[String],
    pyeongs: &[String],
) {
    println!();
    println!("=== 단지 기본 정보 ===");
    for complex in &dataset.complexes {
        let school = complex
            .school
            .as_ref()
            .map(|s| s.school_name.as_str())
            .unwrap_or("-");
        println!(
            "  {} ({}) | 세대수 {} | 사용승인 {} | 매매출현율 {} | 학교 {}",
            complex.complex_name,
            complex.complex_no,
            complex
                .total_household_count
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
            blank_dash(&complex.use_approve_date),
            blank_dash(&complex.exposure.sale),
            school,
        );
    }

    println!();
    println!("=== 버블 지수 (매매 매물) ===");
    for complex_no in complex_ids {
        let scores: Vec<Decimal> = merged
            .iter()
            .filter(|row| &row.listing.complex_no == complex_no && row.listing.is_sale())
            .filter_map(|row| row.bubble_score)
            .collect();
        let name = dataset
            .complexes
            .iter()
            .find(|c| &c.complex_no == complex_no)
            .map(|c| c.complex_name.as_str())
            .unwrap_or(complex_no.as_str());

        if scores.is_empty() {
            println!("  {name}: 점수 가능한 매물 없음");
            continue;
        }
        let avg = scores.iter().sum::<Decimal>() / Decimal::from(scores.len() as i64);
        let grade = BubbleGrade::from_score(avg);
        println!(
            "  {name}: 평균 {}점 ({}) - {} [{}건]",
            avg.round_dp(0),
            grade.label(),
            grade.guide(),
            scores.len()
        );
    }

    println!();
    println!("=== 갭 지수 ===");
    let selections = gap_selections(dataset, complex_ids, pyeongs);
    match selections {
        Some((first, second)) => {
            let outcome = gap_index(&dataset.transactions, &first, &second);
            match outcome.index {
                Some(index) => {
                    let grade = outcome.grade().map(|g| g.label()).unwrap_or("");
                    let guide = outcome.grade().map(|g| g.guide()).unwrap_or("");
                    println!(
                        "  {}평({}) ↔ {}평({}): {}점 ({grade}) - {guide}",
                        first.canonical_size,
                        first.complex_no,
                        second.canonical_size,
                        second.complex_no,
                        index.round_dp(0),
                    );
                }
                None => println!("  실거래 갭 변동이 없어 갭 지수를 계산할 수 없습니다."),
            }
        }
        None => println!("  비교할 평형 실거래가 부족합니다."),
    }
}

/// 갭 지수 비교 대상을 정합니다.
///
/// --pyeong 이 주어지면 그대로, 아니면 단지별 실거래가 가장 많은
/// 정규 평형을 고릅니다.
fn gap_selections(
    dataset: &Dataset,
    complex_ids: &[String],
    pyeongs: &[String],
) -> Option<(GapSelection, GapSelection)> {
    let pick = |index: usize| -> Option<GapSelection> {
        let complex_no = complex_ids.get(index)?.clone();
        let canonical_size = if let Some(size) = pyeongs.get(index) {
            size.clone()
        } else {
            let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
            for tx in &dataset.transactions {
                if tx.complex_no == complex_no && !tx.canonical_size.is_empty() {
                    *counts.entry(tx.canonical_size.as_str()).or_default() += 1;
                }
            }
            counts
                .into_iter()
                .max_by_key(|(_, count)| *count)?
                .0
                .to_string()
        };
        Some(GapSelection {
            complex_no,
            canonical_size,
        })
    };

    Some((pick(0)?, pick(1)?))
}

fn blank_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
