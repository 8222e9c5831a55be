//! 수집 직후 데이터셋에 파생 필드를 채우는 단계.
//!
//! 정규 평형 라벨, 만원 단위 가격, 층 밴드, 경과 연수 구분,
//! 매물 출현율을 채우고 실거래 중복을 제거합니다. 조인 키가 없는
//! 레코드는 파생 필드만 비운 채 그대로 흐릅니다.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use aptwatch_core::domain::Dataset;

use crate::join::SizeJoiner;
use crate::normalize::{
    age_in_days, building_number, canonical_size_label, classify_floor, deal_age_class,
    exposure_rate, normalize_pyeong_names, parse_price,
};

/// 데이터셋의 모든 파생 필드를 채웁니다.
pub fn enrich_dataset(dataset: &mut Dataset) {
    let download_date = dataset.download_date();
    let joiner = SizeJoiner::from_unit_sizes(&dataset.unit_sizes);

    // 단지명(소문자) → 단지 번호. 매물은 단지명으로만 단지를 가리킵니다.
    let complex_by_name: HashMap<String, (String, String)> = dataset
        .complexes
        .iter()
        .map(|c| {
            (
                c.complex_name.trim().to_lowercase(),
                (c.complex_no.clone(), c.complex_name.clone()),
            )
        })
        .collect();

    for complex in &mut dataset.complexes {
        complex.pyeong_names = normalize_pyeong_names(&complex.pyeong_names);
        let households = complex.total_household_count;
        complex.exposure.sale = exposure_rate(complex.deal_count, households);
        complex.exposure.lease = exposure_rate(complex.lease_count, households);
        complex.exposure.monthly_rent = exposure_rate(complex.rent_count, households);
    }

    for unit in &mut dataset.unit_sizes {
        unit.canonical_size = canonical_size_label(&unit.pyeong_name2);
        unit.deal_price_min = parse_price(&unit.deal_price_min_raw);
        unit.deal_price_max = parse_price(&unit.deal_price_max_raw);
        let households = unit.household_count;
        unit.exposure.sale = exposure_rate(unit.deal_count, households);
        unit.exposure.lease = exposure_rate(unit.lease_count, households);
        unit.exposure.monthly_rent = exposure_rate(unit.rent_count, households);
    }

    for tx in &mut dataset.transactions {
        tx.canonical_size = canonical_size_label(&tx.pyeong_name2);
        tx.deal_amount = parse_price(&tx.deal_price_raw);
        tx.age_class = deal_age_class(download_date, tx.deal_date);
    }

    // 실행 내 실거래 중복 제거 (단지, 정규 평형, 일자, 가격, 층)
    let mut seen = HashSet::new();
    let before = dataset.transactions.len();
    dataset.transactions.retain(|tx| seen.insert(tx.dedup_key()));
    if dataset.transactions.len() < before {
        debug!(
            removed = before - dataset.transactions.len(),
            "중복 실거래 제거"
        );
    }

    for listing in &mut dataset.listings {
        let name_key = listing.article_name.trim().to_lowercase();
        if let Some((complex_no, complex_name)) = complex_by_name.get(&name_key) {
            listing.complex_no = complex_no.clone();
            listing.complex_name = complex_name.clone();
        }

        let labels = joiner.labels_by_area(&listing.complex_no, &listing.area_name);
        listing.pyeong_name = labels.pyeong_name2;
        listing.canonical_size = labels.canonical;

        listing.floor_band = classify_floor(&listing.floor_info);
        listing.price = parse_price(&listing.price_raw);
        listing.building_number = building_number(&listing.building_name);
        listing.age_days = age_in_days(download_date, listing.confirm_date);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use aptwatch_core::domain::{
        ComplexRecord, FloorBand, ListingRecord, TransactionRecord, UnitSizeRecord,
    };

    fn base_dataset() -> Dataset {
        let download_at = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut dataset = Dataset::new(download_at);
        dataset.complexes.push(ComplexRecord {
            complex_no: "138183".to_string(),
            complex_name: "광교중흥S클래스".to_string(),
            total_household_count: Some(2000),
            deal_count: Some(62),
            lease_count: Some(30),
            rent_count: Some(8),
            ..Default::default()
        });
        dataset.unit_sizes.push(UnitSizeRecord {
            complex_no: "138183".to_string(),
            pyeong_no: "3".to_string(),
            pyeong_name: "110".to_string(),
            pyeong_name2: "33A".to_string(),
            deal_price_min_raw: "13억".to_string(),
            deal_price_max_raw: "15억 5,000".to_string(),
            household_count: Some(400),
            deal_count: Some(12),
            ..Default::default()
        });
        dataset
    }

    #[test]
    fn test_enrich_fills_unit_and_complex_fields() {
        let mut dataset = base_dataset();
        enrich_dataset(&mut dataset);

        let unit = &dataset.unit_sizes[0];
        assert_eq!(unit.canonical_size, "33");
        assert_eq!(unit.deal_price_min, Some(130_000));
        assert_eq!(unit.deal_price_max, Some(155_000));
        assert_eq!(unit.exposure.sale, "3.0%");

        let complex = &dataset.complexes[0];
        assert_eq!(complex.exposure.sale, "3.1%");
        assert_eq!(complex.exposure.lease, "1.5%");
        assert_eq!(complex.exposure.monthly_rent, "0.4%");
    }

    #[test]
    fn test_enrich_joins_listing_by_name_and_area() {
        let mut dataset = base_dataset();
        dataset.listings.push(ListingRecord {
            article_no: "24001".to_string(),
            article_name: "광교중흥S클래스".to_string(),
            trade_type_name: "매매".to_string(),
            area_name: "110".to_string(),
            floor_info: "8/15".to_string(),
            price_raw: "14억 5,000".to_string(),
            building_name: "101동".to_string(),
            confirm_date: NaiveDate::from_ymd_opt(2025, 5, 22),
            ..Default::default()
        });
        enrich_dataset(&mut dataset);

        let listing = &dataset.listings[0];
        assert_eq!(listing.complex_no, "138183");
        assert_eq!(listing.pyeong_name, "33A");
        assert_eq!(listing.canonical_size, "33");
        assert_eq!(listing.floor_band, FloorBand::Mid);
        assert_eq!(listing.price, Some(145_000));
        assert_eq!(listing.building_number, Some(101));
        assert_eq!(listing.age_days, Some(10));
    }

    #[test]
    fn test_enrich_keeps_unmatched_listing() {
        let mut dataset = base_dataset();
        dataset.listings.push(ListingRecord {
            article_no: "24002".to_string(),
            article_name: "다른단지".to_string(),
            area_name: "84".to_string(),
            ..Default::default()
        });
        enrich_dataset(&mut dataset);

        let listing = &dataset.listings[0];
        assert!(listing.complex_no.is_empty());
        assert!(listing.canonical_size.is_empty());
        assert_eq!(dataset.listings.len(), 1);
    }

    #[test]
    fn test_enrich_dedups_transactions() {
        let mut dataset = base_dataset();
        let tx = TransactionRecord {
            complex_no: "138183".to_string(),
            pyeong_no: "3".to_string(),
            pyeong_name2: "33A".to_string(),
            deal_date: NaiveDate::from_ymd_opt(2024, 3, 15),
            deal_price_raw: "13억 5,000".to_string(),
            floor: Some(7),
            ..Default::default()
        };
        dataset.transactions.push(tx.clone());
        dataset.transactions.push(tx);
        enrich_dataset(&mut dataset);

        assert_eq!(dataset.transactions.len(), 1);
        assert_eq!(dataset.transactions[0].deal_amount, Some(135_000));
        assert!(dataset.transactions[0].age_class.is_some());
    }
}
