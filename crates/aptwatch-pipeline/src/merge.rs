//! 매물과 실거래·시세·단지 정보의 병합.
//!
//! 매물 한 건마다 평형 속성, KB 시세, 단지 속성, 1/3/5년 실거래
//! 통계, 최신 거래, 중위가를 붙이고 버블 점수와 괴리율을 계산합니다.
//! 조인 키가 없는 매물은 파생 필드가 비어 있는 채로 유지됩니다.

use std::collections::HashMap;

use tracing::info;

use aptwatch_core::domain::{Dataset, MergedListing, Window};

use crate::aggregate::{
    compute_size_type_stats, compute_window_stats, latest_deal, real_price_median,
};
use crate::score::{bubble_score, gap_percent};

/// 데이터셋의 모든 매물을 병합 결과 행으로 변환합니다.
pub fn merge_listings(dataset: &Dataset) -> Vec<MergedListing> {
    // (단지, 고유 평형 라벨) → 평형 정보
    let units: HashMap<(String, String), _> = dataset
        .unit_sizes
        .iter()
        .map(|u| ((u.complex_no.clone(), u.pyeong_name2.clone()), u))
        .collect();
    let complexes: HashMap<String, _> = dataset
        .complexes
        .iter()
        .map(|c| (c.complex_no.clone(), c))
        .collect();
    // KB 시세만 매핑 대상 (kab은 스냅샷에만 남음)
    let kbstar: HashMap<(String, String), _> = dataset
        .valuations
        .iter()
        .filter(|v| v.is_kbstar())
        .map(|v| ((v.complex_no.clone(), v.pyeong_name2.clone()), v))
        .collect();

    let merged: Vec<MergedListing> = dataset
        .listings
        .iter()
        .map(|listing| {
            let mut row = MergedListing::from_listing(listing.clone());
            let complex_no = &row.listing.complex_no;
            let size_key = (complex_no.clone(), row.listing.pyeong_name.clone());

            if let Some(unit) = units.get(&size_key) {
                row.household_count = unit.household_count;
                row.deal_count = unit.deal_count;
                row.deal_price_min = unit.deal_price_min;
                row.deal_price_max = unit.deal_price_max;
                row.size_exposure = unit.exposure.clone();
            }

            if let Some(complex) = complexes.get(complex_no) {
                row.total_household_count = complex.total_household_count;
                row.complex_exposure = complex.exposure.clone();
                if let Some(school) = &complex.school {
                    row.school_name = school.school_name.clone();
                    row.school_walk_time = school.walk_time;
                }
            }

            if let Some(valuation) = kbstar.get(&size_key) {
                row.kb_deal_upper = valuation.deal_upper_price_limit;
                row.kb_deal_average = valuation.deal_average_price;
                row.kb_deal_low = valuation.deal_low_price_limit;
                row.kb_lease_per_deal_rate = valuation.lease_per_deal_rate.clone();
            }

            let size = &row.listing.canonical_size;
            row.pyeong_stats_5 =
                compute_window_stats(&dataset.transactions, complex_no, size, Window::Y5);
            row.pyeong_stats_3 =
                compute_window_stats(&dataset.transactions, complex_no, size, Window::Y3);
            row.pyeong_stats_1 =
                compute_window_stats(&dataset.transactions, complex_no, size, Window::Y1);

            let size_type = &row.listing.pyeong_name;
            row.pyeongtype_stats_5 =
                compute_size_type_stats(&dataset.transactions, complex_no, size_type, Window::Y5);
            row.pyeongtype_stats_3 =
                compute_size_type_stats(&dataset.transactions, complex_no, size_type, Window::Y3);
            row.pyeongtype_stats_1 =
                compute_size_type_stats(&dataset.transactions, complex_no, size_type, Window::Y1);

            row.latest_deal =
                latest_deal(&dataset.transactions, complex_no, size).unwrap_or_default();
            row.real_price_median = real_price_median(&dataset.transactions, complex_no, size);

            // 버블 점수와 괴리율은 매매 매물에만 의미가 있습니다.
            if row.listing.is_sale() {
                if let (Some(price), Some(median)) = (row.listing.price, row.real_price_median) {
                    row.bubble_score =
                        bubble_score(price, median, row.pyeong_stats_5.min, row.pyeong_stats_5.max);
                }
                row.real_max_5_gap = gap_percent(row.listing.price, row.pyeong_stats_5.max);
                row.real_min_5_gap = gap_percent(row.listing.price, row.pyeong_stats_5.min);
                row.kb_upper_gap = gap_percent(row.listing.price, row.kb_deal_upper);
                row.deal_min_gap = gap_percent(row.listing.price, row.deal_price_min);
            }

            row
        })
        .collect();

    info!(rows = merged.len(), "매물 병합 완료");
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use aptwatch_core::domain::{
        AgeClass, ComplexRecord, ExposureRates, ListingRecord, SchoolInfo, TransactionRecord,
        UnitSizeRecord, ValuationRecord,
    };

    fn sample_dataset() -> Dataset {
        let download_at = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut dataset = Dataset::new(download_at);

        dataset.complexes.push(ComplexRecord {
            complex_no: "138183".to_string(),
            complex_name: "광교중흥S클래스".to_string(),
            total_household_count: Some(2000),
            exposure: ExposureRates {
                sale: "3.1%".to_string(),
                lease: "1.5%".to_string(),
                monthly_rent: "0.4%".to_string(),
            },
            school: Some(SchoolInfo {
                school_name: "광교초등학교".to_string(),
                walk_time: Some(5),
                ..Default::default()
            }),
            ..Default::default()
        });

        dataset.unit_sizes.push(UnitSizeRecord {
            complex_no: "138183".to_string(),
            pyeong_no: "3".to_string(),
            pyeong_name: "110".to_string(),
            pyeong_name2: "33A".to_string(),
            canonical_size: "33".to_string(),
            household_count: Some(400),
            deal_count: Some(12),
            deal_price_min: Some(130_000),
            deal_price_max: Some(155_000),
            ..Default::default()
        });

        dataset.valuations.push(ValuationRecord {
            complex_no: "138183".to_string(),
            pyeong_no: "3".to_string(),
            pyeong_name: "110".to_string(),
            pyeong_name2: "33A".to_string(),
            provider: "kbstar".to_string(),
            deal_upper_price_limit: Some(150_000),
            deal_average_price: Some(140_000),
            deal_low_price_limit: Some(130_000),
            lease_per_deal_rate: "55.0".to_string(),
            ..Default::default()
        });
        // kab 시세는 병합 대상이 아님
        dataset.valuations.push(ValuationRecord {
            complex_no: "138183".to_string(),
            pyeong_name2: "33A".to_string(),
            provider: "kab".to_string(),
            deal_upper_price_limit: Some(1),
            ..Default::default()
        });

        let tx = |amount: i64, age: AgeClass, date: (i32, u32, u32)| TransactionRecord {
            complex_no: "138183".to_string(),
            canonical_size: "33".to_string(),
            pyeong_name2: "33A".to_string(),
            deal_amount: Some(amount),
            age_class: Some(age),
            deal_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
            floor: Some(7),
            ..Default::default()
        };
        dataset.transactions.push(tx(135_000, AgeClass::Y1, (2025, 3, 15)));
        dataset.transactions.push(tx(128_000, AgeClass::Y1, (2025, 1, 10)));
        dataset.transactions.push(tx(120_000, AgeClass::Y3, (2023, 8, 1)));
        dataset.transactions.push(tx(150_000, AgeClass::Y5, (2021, 5, 2)));

        dataset.listings.push(ListingRecord {
            article_no: "24001".to_string(),
            article_name: "광교중흥S클래스".to_string(),
            complex_no: "138183".to_string(),
            complex_name: "광교중흥S클래스".to_string(),
            trade_type_name: "매매".to_string(),
            area_name: "110".to_string(),
            pyeong_name: "33A".to_string(),
            canonical_size: "33".to_string(),
            price: Some(145_000),
            price_raw: "14억 5,000".to_string(),
            ..Default::default()
        });

        dataset
    }

    #[test]
    fn test_merge_attaches_all_sources() {
        let dataset = sample_dataset();
        let merged = merge_listings(&dataset);
        assert_eq!(merged.len(), 1);

        let row = &merged[0];
        assert_eq!(row.household_count, Some(400));
        assert_eq!(row.deal_price_min, Some(130_000));
        assert_eq!(row.total_household_count, Some(2000));
        assert_eq!(row.complex_exposure.sale, "3.1%");
        assert_eq!(row.school_name, "광교초등학교");
        assert_eq!(row.kb_deal_upper, Some(150_000));
        assert_eq!(row.kb_lease_per_deal_rate, "55.0");

        assert_eq!(row.pyeong_stats_5.max, Some(150_000));
        assert_eq!(row.pyeong_stats_1.min, Some(128_000));
        assert_eq!(row.pyeongtype_stats_5.max, Some(150_000));
        assert_eq!(row.latest_deal.amount, Some(135_000));
        assert_eq!(row.real_price_median, Some(dec!(131500)));
    }

    #[test]
    fn test_merge_computes_sale_scores() {
        let merged = merge_listings(&sample_dataset());
        let row = &merged[0];

        // P=14.5억 > M=13.15억 → 50 + (13500/18500)*50 ≈ 86.5
        let score = row.bubble_score.unwrap().round_dp(1);
        assert_eq!(score, dec!(86.5));

        assert_eq!(row.real_max_5_gap, Some(dec!(-3.3)));
        assert_eq!(row.real_min_5_gap, Some(dec!(20.8)));
        assert_eq!(row.kb_upper_gap, Some(dec!(-3.3)));
        assert_eq!(row.deal_min_gap, Some(dec!(11.5)));
    }

    #[test]
    fn test_merge_skips_scores_for_lease_listing() {
        let mut dataset = sample_dataset();
        dataset.listings[0].trade_type_name = "전세".to_string();
        let merged = merge_listings(&dataset);
        let row = &merged[0];

        assert!(row.bubble_score.is_none());
        assert!(row.real_max_5_gap.is_none());
        // 통계 자체는 그대로 붙습니다
        assert_eq!(row.pyeong_stats_5.max, Some(150_000));
    }

    #[test]
    fn test_merge_keeps_unjoined_listing_blank() {
        let mut dataset = sample_dataset();
        dataset.listings.push(ListingRecord {
            article_no: "24002".to_string(),
            article_name: "다른단지".to_string(),
            trade_type_name: "매매".to_string(),
            ..Default::default()
        });
        let merged = merge_listings(&dataset);
        assert_eq!(merged.len(), 2);

        let row = &merged[1];
        assert!(row.household_count.is_none());
        assert!(row.pyeong_stats_5.is_empty());
        assert!(row.bubble_score.is_none());
        assert!(row.real_price_median.is_none());
    }
}
