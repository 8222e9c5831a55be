//! 단지별 전체 데이터 수집기.
//!
//! 한 단지에 대해 상세 → 학교 → 평형별 실거래·시세 → 매물 → 동별 층
//! 순서로 순차 호출하고, 결과를 [`Dataset`]으로 모읍니다.
//! 개별 호출 실패는 경고 로그 후 건너뛰고 부분 데이터를 유지합니다.

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use aptwatch_core::domain::{
    BuildingRecord, ComplexRecord, Dataset, ExposureRates, ListingRecord, SchoolInfo,
    TradeType, TransactionRecord, UnitSizeRecord, ValuationRecord,
};

use crate::client::{LandClient, PriceProvider};
use crate::error::ClientResult;
use crate::wire::{Article, ComplexDetail, MarketPrice, PyeongDetail, RealPrice, School};

/// 데이터 수집기.
pub struct Collector {
    client: LandClient,
    max_dong_probe: u32,
}

impl Collector {
    pub fn new(client: LandClient, max_dong_probe: u32) -> Self {
        Self {
            client,
            max_dong_probe,
        }
    }

    /// 지정한 단지들의 전체 스냅샷을 수집합니다.
    ///
    /// 단지 상세 조회 실패는 해당 단지 전체를 건너뛰고,
    /// 그 외 호출 실패는 해당 항목만 비운 채 계속합니다.
    pub async fn collect(&self, complex_ids: &[String]) -> Dataset {
        let mut dataset = Dataset::new(Local::now().naive_local());

        for complex_no in complex_ids {
            info!(complex_no, "단지 수집 시작");
            if let Err(error) = self.collect_complex(complex_no, &mut dataset).await {
                warn!(complex_no, %error, "단지 상세 조회 실패, 단지 건너뜀");
            }
        }

        info!(
            complexes = dataset.complexes.len(),
            unit_sizes = dataset.unit_sizes.len(),
            transactions = dataset.transactions.len(),
            listings = dataset.listings.len(),
            valuations = dataset.valuations.len(),
            buildings = dataset.buildings.len(),
            "수집 완료"
        );
        dataset
    }

    async fn collect_complex(
        &self,
        complex_no: &str,
        dataset: &mut Dataset,
    ) -> ClientResult<()> {
        let detail_response = self.client.fetch_complex_detail(complex_no).await?;
        let detail = detail_response.complex_detail.unwrap_or_default();
        let complex_name = detail.complex_name.clone();

        let mut complex = complex_record(&detail);

        match self.client.fetch_schools(complex_no).await {
            Ok(schools) => complex.school = schools.into_iter().next().map(school_info),
            Err(error) => warn!(complex_no, %error, "학교 정보 조회 실패"),
        }
        dataset.complexes.push(complex);

        for pyeong in &detail_response.complex_pyeong_detail_list {
            dataset
                .unit_sizes
                .push(unit_size_record(complex_no, &complex_name, pyeong));

            match self
                .client
                .fetch_real_prices(complex_no, &pyeong.pyeong_no)
                .await
            {
                Ok(prices) => dataset.transactions.extend(
                    prices
                        .iter()
                        .map(|p| transaction_record(complex_no, &complex_name, pyeong, p)),
                ),
                Err(error) => {
                    warn!(complex_no, pyeong_no = %pyeong.pyeong_no, %error, "실거래 조회 실패")
                }
            }

            for provider in [PriceProvider::KbStar, PriceProvider::Kab] {
                match self
                    .client
                    .fetch_market_price(complex_no, &pyeong.pyeong_no, provider)
                    .await
                {
                    Ok(Some(price)) => dataset.valuations.push(valuation_record(
                        complex_no,
                        &complex_name,
                        pyeong,
                        provider,
                        &price,
                    )),
                    Ok(None) => {}
                    Err(error) => {
                        warn!(complex_no, provider = provider.as_str(), %error, "시세 조회 실패")
                    }
                }
            }
        }

        match self.client.fetch_articles(complex_no).await {
            Ok(articles) => dataset
                .listings
                .extend(articles.iter().map(listing_record)),
            Err(error) => warn!(complex_no, %error, "매물 조회 실패"),
        }

        self.collect_buildings(complex_no, &complex_name, dataset)
            .await;
        Ok(())
    }

    /// 동 번호를 1부터 차례로 조회합니다. 실제 동 수를 미리 알 수 없어
    /// 빈 응답이 3회 연속되면 멈춥니다.
    async fn collect_buildings(&self, complex_no: &str, complex_name: &str, dataset: &mut Dataset) {
        let mut consecutive_empty = 0u32;

        for dong_no in 1..=self.max_dong_probe {
            let response = match self.client.fetch_building_land_price(complex_no, dong_no).await {
                Ok(response) => response,
                Err(error) => {
                    warn!(complex_no, dong_no, %error, "동별 층 조회 실패");
                    consecutive_empty += 1;
                    if consecutive_empty >= 3 {
                        break;
                    }
                    continue;
                }
            };

            let floors = response
                .land_price_total
                .map(|t| t.land_price_floors)
                .unwrap_or_default();
            if floors.is_empty() {
                consecutive_empty += 1;
                if consecutive_empty >= 3 {
                    break;
                }
                continue;
            }
            consecutive_empty = 0;

            // 동마다 최고층 행만 유지
            let top = floors
                .iter()
                .filter(|f| f.floor.is_some())
                .max_by_key(|f| f.floor);
            let Some(top) = top else { continue };
            let Some(max_floor) = top.floor else { continue };

            let dong_name = top
                .land_prices
                .iter()
                .map(|p| p.dong_nm.trim())
                .find(|name| !name.is_empty())
                .unwrap_or_default()
                .to_string();

            dataset.buildings.push(BuildingRecord {
                complex_no: complex_no.to_string(),
                complex_name: complex_name.to_string(),
                dong_no,
                dong_name,
                max_floor,
            });
        }
    }
}

/// YYYYMMDD 문자열을 YYYY-MM-DD로 바꿉니다. 형식이 다르면 원문 유지.
fn format_ymd(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw, "%Y%m%d") {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn price_range(min: &str, max: &str) -> String {
    match (min.trim(), max.trim()) {
        ("", "") => String::new(),
        (min, "") => min.to_string(),
        ("", max) => max.to_string(),
        (min, max) if min == max => min.to_string(),
        (min, max) => format!("{min} ~ {max}"),
    }
}

fn complex_record(detail: &ComplexDetail) -> ComplexRecord {
    ComplexRecord {
        complex_no: detail.complex_no.clone(),
        complex_name: detail.complex_name.clone(),
        cortar_no: detail.cortar_no.clone(),
        detail_address: detail.detail_address.clone(),
        road_address: detail.road_address.clone(),
        total_household_count: detail.total_household_count,
        total_lease_household_count: detail.total_lease_household_count,
        high_floor: detail.high_floor,
        low_floor: detail.low_floor,
        use_approve_date: format_ymd(&detail.use_approve_ymd),
        total_dong_count: detail.total_dong_count,
        max_supply_area: detail.max_supply_area,
        min_supply_area: detail.min_supply_area,
        deal_count: detail.deal_count,
        lease_count: detail.lease_count,
        rent_count: detail.rent_count,
        short_term_rent_count: detail.short_term_rent_count,
        batl_ratio: detail.batl_ratio,
        btl_ratio: detail.btl_ratio,
        parking_possible_count: detail.parking_possible_count,
        parking_count_by_household: detail.parking_count_by_household,
        construction_company: detail.construction_company_name.clone(),
        pyeong_names: detail.pyoeng_names.clone(),
        exposure: ExposureRates::default(),
        school: None,
    }
}

fn school_info(school: School) -> SchoolInfo {
    SchoolInfo {
        school_name: school.school_name,
        walk_time: school.walk_time,
        statistics_base_date: format_ymd(&school.student_statistics_base_ymd),
        student_count_per_teacher: school.student_count_per_teacher,
        student_count_per_classroom: school.student_count_per_classroom,
        total_student_count: school.total_student_count,
    }
}

fn unit_size_record(complex_no: &str, complex_name: &str, pyeong: &PyeongDetail) -> UnitSizeRecord {
    let stats = &pyeong.article_statistics;
    UnitSizeRecord {
        complex_no: complex_no.to_string(),
        complex_name: complex_name.to_string(),
        pyeong_no: pyeong.pyeong_no.clone(),
        supply_area: pyeong.supply_area.clone(),
        supply_pyeong: pyeong.supply_pyeong.clone(),
        pyeong_name: pyeong.pyeong_name.clone(),
        pyeong_name2: pyeong.pyeong_name2.clone(),
        canonical_size: String::new(),
        exclusive_area: pyeong.exclusive_area.clone(),
        exclusive_pyeong: pyeong.exclusive_pyeong.clone(),
        exclusive_rate: pyeong.exclusive_rate.clone(),
        household_count: pyeong.household_count_by_pyeong,
        deal_count: stats.deal_count,
        lease_count: stats.lease_count,
        rent_count: stats.rent_count,
        short_term_rent_count: stats.short_term_rent_count,
        deal_price_min_raw: stats.deal_price_min.clone(),
        deal_price_max_raw: stats.deal_price_max.clone(),
        deal_price_min: None,
        deal_price_max: None,
        deal_price_per_space: price_range(
            &stats.deal_price_per_space_min,
            &stats.deal_price_per_space_max,
        ),
        lease_price: stats.lease_price_string.clone(),
        lease_price_rate: stats.lease_price_rate_string.clone(),
        rent_deposit_min: stats.rent_deposit_price_min.clone(),
        rent_price_min: stats.rent_price_min.clone(),
        rent_deposit_max: stats.rent_deposit_price_max.clone(),
        rent_price_max: stats.rent_price_max.clone(),
        room_count: pyeong.room_cnt.clone(),
        bathroom_count: pyeong.bathroom_cnt.clone(),
        average_maintenance_cost: pyeong.average_maintenance_cost.average_total_price,
        exposure: ExposureRates::default(),
    }
}

fn transaction_record(
    complex_no: &str,
    complex_name: &str,
    pyeong: &PyeongDetail,
    price: &RealPrice,
) -> TransactionRecord {
    let deal_date = match (price.trade_year, price.trade_month, price.trade_date) {
        (Some(year), Some(month), Some(day)) => {
            NaiveDate::from_ymd_opt(year, month as u32, day as u32)
        }
        _ => None,
    };

    TransactionRecord {
        complex_no: complex_no.to_string(),
        complex_name: complex_name.to_string(),
        pyeong_no: pyeong.pyeong_no.clone(),
        pyeong_name: pyeong.pyeong_name.clone(),
        pyeong_name2: pyeong.pyeong_name2.clone(),
        canonical_size: String::new(),
        trade_type: TradeType::parse(&price.trade_type),
        floor: price.floor,
        deal_date,
        deal_price_raw: price.deal_price.clone(),
        deal_amount: None,
        age_class: None,
    }
}

fn valuation_record(
    complex_no: &str,
    complex_name: &str,
    pyeong: &PyeongDetail,
    provider: PriceProvider,
    price: &MarketPrice,
) -> ValuationRecord {
    ValuationRecord {
        complex_no: complex_no.to_string(),
        complex_name: complex_name.to_string(),
        pyeong_no: pyeong.pyeong_no.clone(),
        pyeong_name: pyeong.pyeong_name.clone(),
        pyeong_name2: pyeong.pyeong_name2.clone(),
        provider: provider.as_str().to_string(),
        base_date: format_ymd(&price.base_year_month_day),
        deal_upper_price_limit: price.deal_upper_price_limit,
        deal_average_price: price.deal_average_price,
        deal_low_price_limit: price.deal_low_price_limit,
        deal_average_price_change: price.deal_average_price_change_amount,
        lease_upper_price_limit: price.lease_upper_price_limit,
        lease_average_price: price.lease_average_price,
        lease_low_price_limit: price.lease_low_price_limit,
        lease_average_price_change: price.lease_average_price_change_amount,
        rent_low_price: price.rent_low_price,
        deposit: price.deposit,
        rent_upper_price: price.rent_upper_price,
        lease_per_deal_rate: price.lease_per_deal_rate.clone(),
    }
}

fn listing_record(article: &Article) -> ListingRecord {
    let confirm_date = NaiveDate::parse_from_str(&article.article_confirm_ymd, "%Y%m%d")
        .or_else(|_| NaiveDate::parse_from_str(&article.article_confirm_ymd, "%Y-%m-%d"))
        .ok();

    ListingRecord {
        article_no: article.article_no.clone(),
        article_name: article.article_name.clone(),
        complex_no: String::new(),
        complex_name: String::new(),
        trade_type_name: article.trade_type_name.clone(),
        area_name: article.area_name.clone(),
        pyeong_name: String::new(),
        canonical_size: String::new(),
        supply_area: article.area1,
        exclusive_area: article.area2,
        floor_info: article.floor_info.clone(),
        floor_band: Default::default(),
        price_raw: article.deal_or_warrant_prc.clone(),
        price: None,
        rent_price_raw: article.rent_prc.clone(),
        direction: article.direction.clone(),
        building_name: article.building_name.clone(),
        building_number: None,
        confirm_date,
        age_days: None,
        same_address_count: article.same_addr_cnt,
        feature_description: article.article_feature_desc.clone(),
        realtor_name: article.realtor_name.clone(),
    }
}
