//! 버블 점수와 갭 지수.

use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;

use aptwatch_core::domain::{TransactionRecord, Window};

/// 버블 점수 등급.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleGrade {
    /// 100점 초과: 매물 가격대가 매우 높음
    High,
    /// 80점 이상 100점 이하: 다소 높음
    Caution,
    /// 80점 미만: 적정 수준
    Normal,
}

impl BubbleGrade {
    pub fn from_score(score: Decimal) -> Self {
        if score > Decimal::from(100) {
            Self::High
        } else if score >= Decimal::from(80) {
            Self::Caution
        } else {
            Self::Normal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "높음",
            Self::Caution => "주의",
            Self::Normal => "보통",
        }
    }

    pub fn guide(&self) -> &'static str {
        match self {
            Self::High => "매물 가격대가 매우 높습니다.",
            Self::Caution => "매물 가격대가 다소 높습니다.",
            Self::Normal => "매물 가격대가 적정 수준입니다.",
        }
    }
}

/// 갭 지수 등급 (매수 추천).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapGrade {
    /// 80점 이상: 갭이 큰 상태
    Avoid,
    /// 40점 이상 80점 미만: 갭이 다소 있음
    Neutral,
    /// 40점 미만: 갭이 작은 상태
    Recommended,
}

impl GapGrade {
    pub fn from_index(index: Decimal) -> Self {
        if index >= Decimal::from(80) {
            Self::Avoid
        } else if index >= Decimal::from(40) {
            Self::Neutral
        } else {
            Self::Recommended
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Avoid => "유의",
            Self::Neutral => "중립",
            Self::Recommended => "추천",
        }
    }

    pub fn guide(&self) -> &'static str {
        match self {
            Self::Avoid => "갭이 큰 상태입니다.",
            Self::Neutral => "갭이 다소 있는 편 입니다.",
            Self::Recommended => "갭이 작은 상태입니다.",
        }
    }
}

/// 호가의 버블 점수.
///
/// 호가가 실거래 중위가 이하면 5년 최저가와 중위가 사이에서 0~50점,
/// 초과면 중위가와 5년 최고가 사이에서 50~100점대로 환산합니다.
/// 분모가 0이면 (중위가와 경계가 같으면) 점수 없음입니다.
pub fn bubble_score(
    asking_price: i64,
    median: Decimal,
    min_5: Option<i64>,
    max_5: Option<i64>,
) -> Option<Decimal> {
    let price = Decimal::from(asking_price);
    let fifty = Decimal::from(50);
    let score = if price <= median {
        let low = Decimal::from(min_5?);
        let denominator = median - low;
        if denominator.is_zero() {
            return None;
        }
        (price - low) / denominator * fifty
    } else {
        let high = Decimal::from(max_5?);
        let denominator = high - median;
        if denominator.is_zero() {
            return None;
        }
        fifty + (price - median) / denominator * fifty
    };
    Some(score.max(Decimal::ZERO))
}

/// 호가와 기준가의 괴리율 (%, 소수 첫째 자리). 기준가가 없거나 0이면 없음.
pub fn gap_percent(asking_price: Option<i64>, reference: Option<i64>) -> Option<Decimal> {
    let (price, reference) = (asking_price?, reference?);
    if reference == 0 {
        return None;
    }
    let ratio = (Decimal::from(price) / Decimal::from(reference) - Decimal::ONE)
        * Decimal::from(100);
    Some(ratio.round_dp(1))
}

/// 갭 지수 계산 대상 (단지, 정규 평형) 선택.
#[derive(Debug, Clone)]
pub struct GapSelection {
    pub complex_no: String,
    pub canonical_size: String,
}

/// 두 선택지 간 갭 지수 계산 결과.
#[derive(Debug, Clone, Default)]
pub struct GapOutcome {
    /// 갭 지수 (0~100). 실거래 갭에 변동이 없으면 `None`.
    pub index: Option<Decimal>,
    /// 최근 월의 갭 (억)
    pub latest_gap: Option<Decimal>,
}

impl GapOutcome {
    pub fn grade(&self) -> Option<GapGrade> {
        self.index.map(GapGrade::from_index)
    }
}

type MonthKey = (i32, u32);

/// 5년 윈도우 실거래의 월별 평균가 (억) 시계열.
fn monthly_series(
    transactions: &[TransactionRecord],
    selection: &GapSelection,
) -> BTreeMap<MonthKey, Decimal> {
    let mut sums: BTreeMap<MonthKey, (Decimal, i64)> = BTreeMap::new();

    for tx in transactions {
        if tx.complex_no != selection.complex_no
            || tx.canonical_size != selection.canonical_size
            || tx.canonical_size.is_empty()
        {
            continue;
        }
        let in_window = tx
            .age_class
            .map(|class| Window::Y5.allowed().contains(&class))
            .unwrap_or(false);
        if !in_window {
            continue;
        }
        let (Some(date), Some(amount)) = (tx.deal_date, tx.deal_amount) else {
            continue;
        };
        let eok = Decimal::from(amount) / Decimal::from(10_000);
        let entry = sums.entry((date.year(), date.month())).or_default();
        entry.0 += eok;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(month, (sum, count))| (month, sum / Decimal::from(count)))
        .collect()
}

/// 두 (단지, 평형) 선택지의 월별 평균 실거래가 격차로 갭 지수를 계산합니다.
///
/// 두 시계열을 월 축으로 정렬해 각각 직전값/직후값으로 채운 뒤
/// `gap(t) = |A(t) - B(t)|`를 만들고, 두 쪽 모두 실제 거래가 있던 달의
/// 갭 최대/최소 대비 최근 달 갭의 위치를 0~100으로 환산합니다.
/// 갭 최대와 최소가 같으면 (동일 시계열 포함) 지수는 없습니다.
pub fn gap_index(
    transactions: &[TransactionRecord],
    first: &GapSelection,
    second: &GapSelection,
) -> GapOutcome {
    let series_a = monthly_series(transactions, first);
    let series_b = monthly_series(transactions, second);
    if series_a.is_empty() || series_b.is_empty() {
        return GapOutcome::default();
    }

    let mut months: Vec<MonthKey> = series_a.keys().chain(series_b.keys()).copied().collect();
    months.sort_unstable();
    months.dedup();

    let filled_a = fill_series(&months, &series_a);
    let filled_b = fill_series(&months, &series_b);

    let mut real_gaps = Vec::new();
    let mut latest_gap = None;
    for (i, month) in months.iter().enumerate() {
        let gap = (filled_a[i] - filled_b[i]).abs();
        if series_a.contains_key(month) && series_b.contains_key(month) {
            real_gaps.push(gap);
        }
        latest_gap = Some(gap);
    }

    let (Some(&max_gap), Some(&min_gap)) =
        (real_gaps.iter().max(), real_gaps.iter().min())
    else {
        return GapOutcome { index: None, latest_gap };
    };
    let range = max_gap - min_gap;
    if range.is_zero() {
        return GapOutcome { index: None, latest_gap };
    }

    let latest = latest_gap.unwrap_or_default();
    let index = (Decimal::ONE - (max_gap - latest) / range) * Decimal::from(100);
    GapOutcome {
        index: Some(index),
        latest_gap,
    }
}

/// 비어 있는 달을 직전값으로, 선행 구간은 직후값으로 채웁니다.
fn fill_series(months: &[MonthKey], series: &BTreeMap<MonthKey, Decimal>) -> Vec<Decimal> {
    let mut filled = Vec::with_capacity(months.len());
    let mut last = None;
    for month in months {
        if let Some(value) = series.get(month) {
            last = Some(*value);
        }
        filled.push(last);
    }

    // bfill: 선행 None 구간을 첫 실값으로
    let first_value = filled.iter().flatten().next().copied().unwrap_or_default();
    filled
        .into_iter()
        .map(|v| v.unwrap_or(first_value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use aptwatch_core::domain::AgeClass;

    #[test]
    fn test_bubble_score_below_median() {
        // P=12억, M=13억, lo=10억 → (2/3)*50 ≈ 33.3
        let score = bubble_score(120_000, dec!(130000), Some(100_000), Some(150_000)).unwrap();
        assert_eq!(score.round_dp(1), dec!(33.3));
    }

    #[test]
    fn test_bubble_score_above_median() {
        // P=14억, M=13억, hi=15억 → 50 + 25 = 75
        let score = bubble_score(140_000, dec!(130000), Some(100_000), Some(150_000)).unwrap();
        assert_eq!(score, dec!(75));
    }

    #[test]
    fn test_bubble_score_clamps_negative_to_zero() {
        // P < lo → 음수 구간은 0점
        let score = bubble_score(90_000, dec!(130000), Some(100_000), Some(150_000)).unwrap();
        assert_eq!(score, Decimal::ZERO);
    }

    #[test]
    fn test_bubble_score_zero_denominator_is_missing() {
        assert_eq!(
            bubble_score(130_000, dec!(130000), Some(130_000), Some(150_000)),
            None
        );
        assert_eq!(
            bubble_score(140_000, dec!(130000), Some(100_000), Some(130_000)),
            None
        );
        assert_eq!(bubble_score(120_000, dec!(130000), None, Some(150_000)), None);
    }

    #[test]
    fn test_bubble_score_is_idempotent() {
        let first = bubble_score(140_000, dec!(130000), Some(100_000), Some(150_000));
        let second = bubble_score(140_000, dec!(130000), Some(100_000), Some(150_000));
        assert_eq!(first, second);
    }

    #[test]
    fn test_bubble_grades() {
        assert_eq!(BubbleGrade::from_score(dec!(120)), BubbleGrade::High);
        assert_eq!(BubbleGrade::from_score(dec!(100)), BubbleGrade::Caution);
        assert_eq!(BubbleGrade::from_score(dec!(80)), BubbleGrade::Caution);
        assert_eq!(BubbleGrade::from_score(dec!(79.9)), BubbleGrade::Normal);
        assert_eq!(BubbleGrade::Caution.label(), "주의");
    }

    #[test]
    fn test_gap_percent() {
        assert_eq!(gap_percent(Some(145_000), Some(135_000)), Some(dec!(7.4)));
        assert_eq!(gap_percent(Some(120_000), Some(135_000)), Some(dec!(-11.1)));
        assert_eq!(gap_percent(Some(145_000), None), None);
        assert_eq!(gap_percent(Some(145_000), Some(0)), None);
        assert_eq!(gap_percent(None, Some(135_000)), None);
    }

    fn tx(complex_no: &str, size: &str, amount: i64, year: i32, month: u32) -> TransactionRecord {
        TransactionRecord {
            complex_no: complex_no.to_string(),
            canonical_size: size.to_string(),
            deal_amount: Some(amount),
            deal_date: NaiveDate::from_ymd_opt(year, month, 10),
            age_class: Some(AgeClass::Y1),
            ..Default::default()
        }
    }

    fn selection(complex_no: &str, size: &str) -> GapSelection {
        GapSelection {
            complex_no: complex_no.to_string(),
            canonical_size: size.to_string(),
        }
    }

    #[test]
    fn test_gap_index_widening_gap_scores_high() {
        // A는 오르고 B는 제자리 → 최근 갭이 최대 갭 → 100점
        let txs = vec![
            tx("138183", "33", 100_000, 2025, 1),
            tx("138183", "33", 120_000, 2025, 2),
            tx("138183", "33", 140_000, 2025, 3),
            tx("136913", "33", 100_000, 2025, 1),
            tx("136913", "33", 100_000, 2025, 2),
            tx("136913", "33", 100_000, 2025, 3),
        ];
        let outcome = gap_index(&txs, &selection("138183", "33"), &selection("136913", "33"));
        assert_eq!(outcome.index, Some(dec!(100)));
        assert_eq!(outcome.grade(), Some(GapGrade::Avoid));
        assert_eq!(outcome.latest_gap, Some(dec!(4)));
    }

    #[test]
    fn test_gap_index_identical_series_is_missing() {
        let txs = vec![
            tx("138183", "33", 100_000, 2025, 1),
            tx("138183", "33", 120_000, 2025, 2),
            tx("136913", "25", 100_000, 2025, 1),
            tx("136913", "25", 120_000, 2025, 2),
        ];
        let outcome = gap_index(&txs, &selection("138183", "33"), &selection("136913", "25"));
        // 모든 달의 갭이 0 → 최대==최소 → 지수 없음
        assert_eq!(outcome.index, None);
        assert_eq!(outcome.grade(), None);
        assert_eq!(outcome.latest_gap, Some(Decimal::ZERO));
    }

    #[test]
    fn test_gap_index_fills_missing_months() {
        // B는 2월 거래가 없음 → 1월 값으로 채워 갭 계산, 실거래 달은 1,3월만
        let txs = vec![
            tx("138183", "33", 100_000, 2025, 1),
            tx("138183", "33", 110_000, 2025, 2),
            tx("138183", "33", 150_000, 2025, 3),
            tx("136913", "25", 90_000, 2025, 1),
            tx("136913", "25", 100_000, 2025, 3),
        ];
        let outcome = gap_index(&txs, &selection("138183", "33"), &selection("136913", "25"));
        // 실거래 달 갭: 1월 1.0억, 3월 5.0억 → 최근 달(3월) 갭 5.0 → 100점
        assert_eq!(outcome.index, Some(dec!(100)));
    }

    #[test]
    fn test_gap_index_empty_side_is_missing() {
        let txs = vec![tx("138183", "33", 100_000, 2025, 1)];
        let outcome = gap_index(&txs, &selection("138183", "33"), &selection("136913", "25"));
        assert_eq!(outcome.index, None);
        assert_eq!(outcome.latest_gap, None);
    }
}
