//! (단지, 평형) 단위 실거래 통계 집계.

use rust_decimal::Decimal;

use aptwatch_core::domain::{LatestDeal, SizeTypeStats, TransactionRecord, Window, WindowStats};

fn amounts_of(rows: &[&TransactionRecord]) -> Vec<i64> {
    rows.iter().filter_map(|t| t.deal_amount).collect()
}

fn mean(values: &[i64]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum: i64 = values.iter().sum();
    Some(Decimal::from(sum) / Decimal::from(values.len() as i64))
}

fn median(values: &[i64]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(Decimal::from(sorted[mid]))
    } else {
        Some((Decimal::from(sorted[mid - 1]) + Decimal::from(sorted[mid])) / Decimal::from(2))
    }
}

fn in_window(tx: &TransactionRecord, window: Window) -> bool {
    tx.age_class
        .map(|class| window.allowed().contains(&class))
        .unwrap_or(false)
}

/// (단지, 정규 평형, 윈도우)의 실거래 통계.
///
/// 해당 윈도우에 거래가 없으면 모든 필드가 `None`인 통계를 반환합니다.
pub fn compute_window_stats(
    transactions: &[TransactionRecord],
    complex_no: &str,
    canonical_size: &str,
    window: Window,
) -> WindowStats {
    if canonical_size.is_empty() {
        return WindowStats::default();
    }

    let rows: Vec<&TransactionRecord> = transactions
        .iter()
        .filter(|t| {
            t.complex_no == complex_no
                && t.canonical_size == canonical_size
                && in_window(t, window)
        })
        .collect();

    let max_row = rows
        .iter()
        .filter(|t| t.deal_amount.is_some())
        .max_by_key(|t| t.deal_amount);
    let min_row = rows
        .iter()
        .filter(|t| t.deal_amount.is_some())
        .min_by_key(|t| t.deal_amount);
    let amounts = amounts_of(&rows);

    WindowStats {
        max: max_row.and_then(|t| t.deal_amount),
        max_date: max_row.and_then(|t| t.deal_date),
        avg: mean(&amounts),
        med: median(&amounts),
        min: min_row.and_then(|t| t.deal_amount),
        min_date: min_row.and_then(|t| t.deal_date),
    }
}

/// (단지, 고유 평형 타입, 윈도우)의 통계. 일자 없이 값만 집계합니다.
pub fn compute_size_type_stats(
    transactions: &[TransactionRecord],
    complex_no: &str,
    pyeong_name2: &str,
    window: Window,
) -> SizeTypeStats {
    if pyeong_name2.is_empty() {
        return SizeTypeStats::default();
    }

    let rows: Vec<&TransactionRecord> = transactions
        .iter()
        .filter(|t| {
            t.complex_no == complex_no && t.pyeong_name2 == pyeong_name2 && in_window(t, window)
        })
        .collect();
    let amounts = amounts_of(&rows);

    SizeTypeStats {
        max: amounts.iter().max().copied(),
        avg: mean(&amounts),
        min: amounts.iter().min().copied(),
    }
}

/// (단지, 정규 평형)의 최신 실거래. 거래일 기준 최근 건입니다.
pub fn latest_deal(
    transactions: &[TransactionRecord],
    complex_no: &str,
    canonical_size: &str,
) -> Option<LatestDeal> {
    if canonical_size.is_empty() {
        return None;
    }

    transactions
        .iter()
        .filter(|t| {
            t.complex_no == complex_no
                && t.canonical_size == canonical_size
                && t.deal_date.is_some()
        })
        .max_by_key(|t| t.deal_date)
        .map(|t| LatestDeal {
            date: t.deal_date,
            amount: t.deal_amount,
            floor: t.floor,
        })
}

/// (단지, 정규 평형)의 전체 실거래 중위가. 윈도우 제한 없이 계산합니다.
pub fn real_price_median(
    transactions: &[TransactionRecord],
    complex_no: &str,
    canonical_size: &str,
) -> Option<Decimal> {
    if canonical_size.is_empty() {
        return None;
    }

    let amounts: Vec<i64> = transactions
        .iter()
        .filter(|t| t.complex_no == complex_no && t.canonical_size == canonical_size)
        .filter_map(|t| t.deal_amount)
        .collect();
    median(&amounts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use aptwatch_core::domain::AgeClass;

    fn tx(
        complex_no: &str,
        size: &str,
        amount: i64,
        age_class: Option<AgeClass>,
        date: (i32, u32, u32),
        floor: i32,
    ) -> TransactionRecord {
        TransactionRecord {
            complex_no: complex_no.to_string(),
            canonical_size: size.to_string(),
            pyeong_name2: format!("{size}A"),
            deal_amount: Some(amount),
            age_class,
            deal_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
            floor: Some(floor),
            ..Default::default()
        }
    }

    fn sample() -> Vec<TransactionRecord> {
        vec![
            tx("138183", "33", 135_000, Some(AgeClass::Y1), (2025, 3, 15), 7),
            tx("138183", "33", 128_000, Some(AgeClass::Y1), (2025, 1, 10), 3),
            tx("138183", "33", 120_000, Some(AgeClass::Y3), (2023, 8, 1), 12),
            tx("138183", "33", 150_000, Some(AgeClass::Y5), (2021, 5, 2), 15),
            // 다른 단지 / 구분 없음은 항상 제외
            tx("136913", "33", 999_999, Some(AgeClass::Y1), (2025, 2, 1), 5),
            tx("138183", "33", 1, None, (2018, 1, 1), 2),
        ]
    }

    #[test]
    fn test_window_stats_respect_age_classes() {
        let txs = sample();

        let y1 = compute_window_stats(&txs, "138183", "33", Window::Y1);
        assert_eq!(y1.max, Some(135_000));
        assert_eq!(y1.min, Some(128_000));
        assert_eq!(y1.avg, Some(dec!(131500)));

        let y3 = compute_window_stats(&txs, "138183", "33", Window::Y3);
        assert_eq!(y3.min, Some(120_000));
        assert_eq!(y3.med, Some(dec!(128000)));

        let y5 = compute_window_stats(&txs, "138183", "33", Window::Y5);
        assert_eq!(y5.max, Some(150_000));
        assert_eq!(y5.max_date, NaiveDate::from_ymd_opt(2021, 5, 2));
        assert_eq!(y5.min_date, NaiveDate::from_ymd_opt(2023, 8, 1));
    }

    #[test]
    fn test_window_stats_empty_when_no_match() {
        let stats = compute_window_stats(&sample(), "138183", "99", Window::Y5);
        assert!(stats.is_empty());
        assert!(stats.max_date.is_none());

        let blank = compute_window_stats(&sample(), "138183", "", Window::Y5);
        assert!(blank.is_empty());
    }

    #[test]
    fn test_median_even_count() {
        let y5 = compute_window_stats(&sample(), "138183", "33", Window::Y5);
        // 120000, 128000, 135000, 150000 → (128000+135000)/2
        assert_eq!(y5.med, Some(dec!(131500)));
    }

    #[test]
    fn test_size_type_stats() {
        let txs = sample();
        let stats = compute_size_type_stats(&txs, "138183", "33A", Window::Y5);
        assert_eq!(stats.max, Some(150_000));
        assert_eq!(stats.min, Some(120_000));
    }

    #[test]
    fn test_latest_deal() {
        let latest = latest_deal(&sample(), "138183", "33").unwrap();
        assert_eq!(latest.date, NaiveDate::from_ymd_opt(2025, 3, 15));
        assert_eq!(latest.amount, Some(135_000));
        assert_eq!(latest.floor, Some(7));
    }

    #[test]
    fn test_real_price_median_uses_all_rows() {
        // 구분 없음(5년 초과) 거래도 중위값에는 포함
        let median = real_price_median(&sample(), "138183", "33").unwrap();
        assert_eq!(median, dec!(128000));
    }
}
