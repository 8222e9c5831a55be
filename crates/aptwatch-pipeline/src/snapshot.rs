//! CSV 스냅샷 쓰기.
//!
//! 실행마다 데이터 디렉터리에 일곱 개의 CSV를 통째로 덮어씁니다.
//! 모든 행의 마지막 컬럼은 `downloadDate` (수집 시각)입니다.

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use aptwatch_core::config::SnapshotConfig;
use aptwatch_core::domain::{Dataset, MergedListing, SizeTypeStats, WindowStats};
use aptwatch_core::error::{AptError, AptResult};

/// 스냅샷 파일 이름들.
pub const COMPLEX_FILE: &str = "complex_data.csv";
pub const PYEONG_FILE: &str = "pyeong_data.csv";
pub const PRICE_FILE: &str = "price_data.csv";
pub const SELL_FILE: &str = "sell_data.csv";
pub const PROVIDER_FILE: &str = "provider_data.csv";
pub const DONG_FILE: &str = "dong_data.csv";
pub const RESULT_FILE: &str = "result.csv";

/// 데이터 디렉터리에 스냅샷 CSV를 쓰는 기록기.
pub struct SnapshotWriter {
    data_dir: PathBuf,
}

fn csv_error(path: &Path, err: csv::Error) -> AptError {
    AptError::Snapshot(format!("{}: {err}", path.display()))
}

fn opt<T: Display>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}

fn opt_date(value: &Option<NaiveDate>) -> String {
    value.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

fn opt_dec(value: &Option<Decimal>) -> String {
    value.map(|d| d.round_dp(1).to_string()).unwrap_or_default()
}

fn opt_percent(value: &Option<Decimal>) -> String {
    value.map(|d| format!("{d}%")).unwrap_or_default()
}

impl SnapshotWriter {
    pub fn new(config: &SnapshotConfig) -> Self {
        Self {
            data_dir: PathBuf::from(&config.data_dir),
        }
    }

    pub fn with_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// 일곱 개 스냅샷을 모두 덮어씁니다.
    pub fn write_all(&self, dataset: &Dataset, merged: &[MergedListing]) -> AptResult<()> {
        fs::create_dir_all(&self.data_dir)?;

        self.write_complexes(dataset)?;
        self.write_unit_sizes(dataset)?;
        self.write_transactions(dataset)?;
        self.write_listings(dataset)?;
        self.write_valuations(dataset)?;
        self.write_buildings(dataset)?;
        self.write_result(dataset, merged)?;

        info!(dir = %self.data_dir.display(), "스냅샷 저장 완료");
        Ok(())
    }

    fn writer(&self, file: &str) -> AptResult<(csv::Writer<fs::File>, PathBuf)> {
        let path = self.data_dir.join(file);
        let writer = csv::Writer::from_path(&path).map_err(|e| csv_error(&path, e))?;
        Ok((writer, path))
    }

    pub fn write_complexes(&self, dataset: &Dataset) -> AptResult<()> {
        let (mut writer, path) = self.writer(COMPLEX_FILE)?;
        let stamp = dataset.download_stamp();

        writer
            .write_record([
                "complexNo", "complexName", "cortarNo", "detailAddress", "roadAddress",
                "totalHouseholdCount", "totalLeaseHouseholdCount", "highFloor", "lowFloor",
                "useApproveYmd", "totalDongCount", "maxSupplyArea", "minSupplyArea",
                "dealCount", "leaseCount", "rentCount", "shortTermRentCount",
                "batlRatio", "btlRatio", "parkingPossibleCount", "parkingCountByHousehold",
                "constructionCompanyName", "pyoengNames",
                "매매매물출현율", "전세매물출현율", "월세매물출현율",
                "schoolName", "walkTime", "studentStatisticsBaseYmd",
                "studentCountPerTeacher", "studentCountPerClassroom", "totalStudentCount",
                "downloadDate",
            ])
            .map_err(|e| csv_error(&path, e))?;

        for complex in &dataset.complexes {
            let school = complex.school.clone().unwrap_or_default();
            writer
                .write_record([
                    complex.complex_no.clone(),
                    complex.complex_name.clone(),
                    complex.cortar_no.clone(),
                    complex.detail_address.clone(),
                    complex.road_address.clone(),
                    opt(&complex.total_household_count),
                    opt(&complex.total_lease_household_count),
                    opt(&complex.high_floor),
                    opt(&complex.low_floor),
                    complex.use_approve_date.clone(),
                    opt(&complex.total_dong_count),
                    opt(&complex.max_supply_area),
                    opt(&complex.min_supply_area),
                    opt(&complex.deal_count),
                    opt(&complex.lease_count),
                    opt(&complex.rent_count),
                    opt(&complex.short_term_rent_count),
                    opt(&complex.batl_ratio),
                    opt(&complex.btl_ratio),
                    opt(&complex.parking_possible_count),
                    opt(&complex.parking_count_by_household),
                    complex.construction_company.clone(),
                    complex.pyeong_names.clone(),
                    complex.exposure.sale.clone(),
                    complex.exposure.lease.clone(),
                    complex.exposure.monthly_rent.clone(),
                    school.school_name.clone(),
                    opt(&school.walk_time),
                    school.statistics_base_date.clone(),
                    opt(&school.student_count_per_teacher),
                    opt(&school.student_count_per_classroom),
                    opt(&school.total_student_count),
                    stamp.clone(),
                ])
                .map_err(|e| csv_error(&path, e))?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn write_unit_sizes(&self, dataset: &Dataset) -> AptResult<()> {
        let (mut writer, path) = self.writer(PYEONG_FILE)?;
        let stamp = dataset.download_stamp();

        writer
            .write_record([
                "complexNo", "complexName", "pyeongNo", "supplyArea", "supplyPyeong",
                "pyeongName", "pyeongName2", "pyeongName3", "exclusiveArea",
                "exclusivePyeong", "exclusiveRate", "householdCountByPyeong",
                "dealCount", "leaseCount", "rentCount", "shortTermRentCount",
                "dealPriceMin", "dealPriceMax", "dealPriceMin2", "dealPriceMax2",
                "dealPricePerSpace", "leasePriceString", "leasePriceRateString",
                "rentDepositPriceMin", "rentPriceMin", "rentDepositPriceMax", "rentPriceMax",
                "roomCnt", "bathroomCnt", "averageTotalPrice",
                "매매매물출현율", "전세매물출현율", "월세매물출현율",
                "downloadDate",
            ])
            .map_err(|e| csv_error(&path, e))?;

        for unit in &dataset.unit_sizes {
            writer
                .write_record([
                    unit.complex_no.clone(),
                    unit.complex_name.clone(),
                    unit.pyeong_no.clone(),
                    unit.supply_area.clone(),
                    unit.supply_pyeong.clone(),
                    unit.pyeong_name.clone(),
                    unit.pyeong_name2.clone(),
                    unit.canonical_size.clone(),
                    unit.exclusive_area.clone(),
                    unit.exclusive_pyeong.clone(),
                    unit.exclusive_rate.clone(),
                    opt(&unit.household_count),
                    opt(&unit.deal_count),
                    opt(&unit.lease_count),
                    opt(&unit.rent_count),
                    opt(&unit.short_term_rent_count),
                    unit.deal_price_min_raw.clone(),
                    unit.deal_price_max_raw.clone(),
                    opt(&unit.deal_price_min),
                    opt(&unit.deal_price_max),
                    unit.deal_price_per_space.clone(),
                    unit.lease_price.clone(),
                    unit.lease_price_rate.clone(),
                    unit.rent_deposit_min.clone(),
                    unit.rent_price_min.clone(),
                    unit.rent_deposit_max.clone(),
                    unit.rent_price_max.clone(),
                    unit.room_count.clone(),
                    unit.bathroom_count.clone(),
                    opt(&unit.average_maintenance_cost),
                    unit.exposure.sale.clone(),
                    unit.exposure.lease.clone(),
                    unit.exposure.monthly_rent.clone(),
                    stamp.clone(),
                ])
                .map_err(|e| csv_error(&path, e))?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn write_transactions(&self, dataset: &Dataset) -> AptResult<()> {
        let (mut writer, path) = self.writer(PRICE_FILE)?;
        let stamp = dataset.download_stamp();

        writer
            .write_record([
                "complexNo", "complexName", "pyeongNo", "pyeongName", "pyeongName2",
                "pyeongName3", "tradeType", "floor", "dealDate", "dealPrice",
                "dealAmount", "dealDateClass", "downloadDate",
            ])
            .map_err(|e| csv_error(&path, e))?;

        for tx in &dataset.transactions {
            writer
                .write_record([
                    tx.complex_no.clone(),
                    tx.complex_name.clone(),
                    tx.pyeong_no.clone(),
                    tx.pyeong_name.clone(),
                    tx.pyeong_name2.clone(),
                    tx.canonical_size.clone(),
                    tx.trade_type.map(|t| t.code().to_string()).unwrap_or_default(),
                    opt(&tx.floor),
                    opt_date(&tx.deal_date),
                    tx.deal_price_raw.clone(),
                    opt(&tx.deal_amount),
                    tx.age_class.map(|c| c.label().to_string()).unwrap_or_default(),
                    stamp.clone(),
                ])
                .map_err(|e| csv_error(&path, e))?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn write_listings(&self, dataset: &Dataset) -> AptResult<()> {
        let (mut writer, path) = self.writer(SELL_FILE)?;
        let stamp = dataset.download_stamp();

        writer
            .write_record(Self::listing_header(&[]))
            .map_err(|e| csv_error(&path, e))?;

        for listing in &dataset.listings {
            let mut fields = Self::listing_fields(listing, &[]);
            fields.push(stamp.clone());
            writer
                .write_record(&fields)
                .map_err(|e| csv_error(&path, e))?;
        }
        writer.flush()?;
        Ok(())
    }

    fn listing_header(extra: &[&str]) -> Vec<String> {
        let mut header: Vec<String> = [
            "articleNo", "complexNo", "articleName", "complexName", "tradeTypeName",
            "areaName", "pyeongName", "pyeongName3", "area1", "area2",
            "floorInfo", "floorType", "dealOrWarrantPrc", "dealOrWarrantPrc2", "rentPrc",
            "direction", "buildingName", "buildingName2", "articleConfirmYmd", "ageDays",
            "sameAddrCnt", "articleFeatureDesc", "realtorName",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        header.extend(extra.iter().map(|s| s.to_string()));
        header.push("downloadDate".to_string());
        header
    }

    fn listing_fields(
        listing: &aptwatch_core::domain::ListingRecord,
        extra: &[String],
    ) -> Vec<String> {
        let mut fields = vec![
            listing.article_no.clone(),
            listing.complex_no.clone(),
            listing.article_name.clone(),
            listing.complex_name.clone(),
            listing.trade_type_name.clone(),
            listing.area_name.clone(),
            listing.pyeong_name.clone(),
            listing.canonical_size.clone(),
            opt(&listing.supply_area),
            opt(&listing.exclusive_area),
            listing.floor_info.clone(),
            listing.floor_band.label().to_string(),
            listing.price_raw.clone(),
            opt(&listing.price),
            listing.rent_price_raw.clone(),
            listing.direction.clone(),
            listing.building_name.clone(),
            opt(&listing.building_number),
            opt_date(&listing.confirm_date),
            opt(&listing.age_days),
            opt(&listing.same_address_count),
            listing.feature_description.clone(),
            listing.realtor_name.clone(),
        ];
        fields.extend_from_slice(extra);
        fields
    }

    pub fn write_valuations(&self, dataset: &Dataset) -> AptResult<()> {
        let (mut writer, path) = self.writer(PROVIDER_FILE)?;
        let stamp = dataset.download_stamp();

        writer
            .write_record([
                "complexNo", "complexName", "pyeongNo", "pyeongName", "pyeongName2",
                "provider", "baseYearMonthDay",
                "dealUpperPriceLimit", "dealAveragePrice", "dealLowPriceLimit",
                "dealAveragePriceChangeAmount",
                "leaseUpperPriceLimit", "leaseAveragePrice", "leaseLowPriceLimit",
                "leaseAveragePriceChangeAmount",
                "rentLowPrice", "deposit", "rentUpperPrice", "leasePerDealRate",
                "downloadDate",
            ])
            .map_err(|e| csv_error(&path, e))?;

        for valuation in &dataset.valuations {
            writer
                .write_record([
                    valuation.complex_no.clone(),
                    valuation.complex_name.clone(),
                    valuation.pyeong_no.clone(),
                    valuation.pyeong_name.clone(),
                    valuation.pyeong_name2.clone(),
                    valuation.provider.clone(),
                    valuation.base_date.clone(),
                    opt(&valuation.deal_upper_price_limit),
                    opt(&valuation.deal_average_price),
                    opt(&valuation.deal_low_price_limit),
                    opt(&valuation.deal_average_price_change),
                    opt(&valuation.lease_upper_price_limit),
                    opt(&valuation.lease_average_price),
                    opt(&valuation.lease_low_price_limit),
                    opt(&valuation.lease_average_price_change),
                    opt(&valuation.rent_low_price),
                    opt(&valuation.deposit),
                    opt(&valuation.rent_upper_price),
                    valuation.lease_per_deal_rate.clone(),
                    stamp.clone(),
                ])
                .map_err(|e| csv_error(&path, e))?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn write_buildings(&self, dataset: &Dataset) -> AptResult<()> {
        let (mut writer, path) = self.writer(DONG_FILE)?;
        let stamp = dataset.download_stamp();

        writer
            .write_record(["complexNo", "complexName", "dongNo", "dongName", "maxFloor", "downloadDate"])
            .map_err(|e| csv_error(&path, e))?;

        for building in &dataset.buildings {
            writer
                .write_record([
                    building.complex_no.clone(),
                    building.complex_name.clone(),
                    building.dong_no.to_string(),
                    building.dong_name.clone(),
                    building.max_floor.to_string(),
                    stamp.clone(),
                ])
                .map_err(|e| csv_error(&path, e))?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn write_result(&self, dataset: &Dataset, merged: &[MergedListing]) -> AptResult<()> {
        let (mut writer, path) = self.writer(RESULT_FILE)?;
        let stamp = dataset.download_stamp();

        let derived_header = [
            "householdCountByPyeong", "pyeongDealCount", "dealPriceMin2", "dealPriceMax2",
            "평형매매매물출현율", "평형전세매물출현율", "평형월세매물출현율",
            "totalHouseholdCount", "매매매물출현율", "전세매물출현율", "월세매물출현율",
            "schoolName", "walkTime",
            "dealUpperPriceLimit", "dealAveragePrice", "dealLowPriceLimit", "leasePerDealRate",
            "pyeong_max_5", "pyeong_max_5_DT", "pyeong_avg_5", "pyeong_med_5",
            "pyeong_min_5", "pyeong_min_5_DT",
            "pyeong_max_3", "pyeong_max_3_DT", "pyeong_avg_3", "pyeong_med_3",
            "pyeong_min_3", "pyeong_min_3_DT",
            "pyeong_max_1", "pyeong_max_1_DT", "pyeong_avg_1", "pyeong_med_1",
            "pyeong_min_1", "pyeong_min_1_DT",
            "pyeongtype_max_5", "pyeongtype_avg_5", "pyeongtype_min_5",
            "pyeongtype_max_3", "pyeongtype_avg_3", "pyeongtype_min_3",
            "pyeongtype_max_1", "pyeongtype_avg_1", "pyeongtype_min_1",
            "latestdealDate", "latestdealAmount", "latestdealFloor",
            "real_price_median", "bubble_score",
            "real_max_5_gap", "real_min_5_gap", "kb_upper_gap", "deal_min_gap",
        ];
        writer
            .write_record(Self::listing_header(&derived_header))
            .map_err(|e| csv_error(&path, e))?;

        for row in merged {
            let mut extra = vec![
                opt(&row.household_count),
                opt(&row.deal_count),
                opt(&row.deal_price_min),
                opt(&row.deal_price_max),
                row.size_exposure.sale.clone(),
                row.size_exposure.lease.clone(),
                row.size_exposure.monthly_rent.clone(),
                opt(&row.total_household_count),
                row.complex_exposure.sale.clone(),
                row.complex_exposure.lease.clone(),
                row.complex_exposure.monthly_rent.clone(),
                row.school_name.clone(),
                opt(&row.school_walk_time),
                opt(&row.kb_deal_upper),
                opt(&row.kb_deal_average),
                opt(&row.kb_deal_low),
                row.kb_lease_per_deal_rate.clone(),
            ];
            extra.extend(window_stats_fields(&row.pyeong_stats_5));
            extra.extend(window_stats_fields(&row.pyeong_stats_3));
            extra.extend(window_stats_fields(&row.pyeong_stats_1));
            extra.extend(size_type_fields(&row.pyeongtype_stats_5));
            extra.extend(size_type_fields(&row.pyeongtype_stats_3));
            extra.extend(size_type_fields(&row.pyeongtype_stats_1));
            extra.push(opt_date(&row.latest_deal.date));
            extra.push(opt(&row.latest_deal.amount));
            extra.push(opt(&row.latest_deal.floor));
            extra.push(opt_dec(&row.real_price_median));
            extra.push(opt_dec(&row.bubble_score));
            extra.push(opt_percent(&row.real_max_5_gap));
            extra.push(opt_percent(&row.real_min_5_gap));
            extra.push(opt_percent(&row.kb_upper_gap));
            extra.push(opt_percent(&row.deal_min_gap));

            let mut fields = Self::listing_fields(&row.listing, &extra);
            fields.push(stamp.clone());
            writer.write_record(&fields).map_err(|e| csv_error(&path, e))?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn window_stats_fields(stats: &WindowStats) -> Vec<String> {
    vec![
        opt(&stats.max),
        opt_date(&stats.max_date),
        opt_dec(&stats.avg),
        opt_dec(&stats.med),
        opt(&stats.min),
        opt_date(&stats.min_date),
    ]
}

fn size_type_fields(stats: &SizeTypeStats) -> Vec<String> {
    vec![opt(&stats.max), opt_dec(&stats.avg), opt(&stats.min)]
}
