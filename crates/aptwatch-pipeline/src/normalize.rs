//! 원문 문자열 정규화 유틸리티.
//!
//! 포털이 내려주는 값은 형식이 들쭉날쭉합니다 ("13억 5,000", "33A",
//! "저/15", "101동"). 여기의 헬퍼는 모두 전함수입니다. 해석 불가능한
//! 입력은 빈 마커(`None`/빈 문자열/`Unknown`)가 되며 패닉하지 않습니다.

use chrono::NaiveDate;

use aptwatch_core::domain::{AgeClass, FloorBand};

/// 평형 라벨 뒤의 영문 변형 표기를 제거해 정규 라벨을 만듭니다.
///
/// "33A" → "33", "24" → "24". 영문을 제거하고 아무것도 남지 않으면
/// 빈 문자열을 반환합니다.
pub fn canonical_size_label(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(|c: char| c.is_ascii_alphabetic())
        .to_string()
}

/// 억 단위 한국어 가격 표기를 만원 정수로 해석합니다.
///
/// "13억 5,000" → 135000, "5억" → 50000, "1.5억" → 15000, "9,500" → 9500.
pub fn parse_price(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some((eok_part, rest)) = trimmed.split_once('억') {
        // 억 앞자리는 "1.5억" 같은 소수 표기도 허용한다.
        let eok = parse_fractional_number(eok_part)?;
        let rest = rest.trim();
        let remainder = if rest.is_empty() {
            0
        } else {
            parse_plain_number(rest)?
        };
        Some((eok * 10_000.0).round() as i64 + remainder)
    } else {
        parse_plain_number(trimmed)
    }
}

fn parse_plain_number(raw: &str) -> Option<i64> {
    let cleaned = strip_separators(raw);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

fn parse_fractional_number(raw: &str) -> Option<f64> {
    let cleaned = strip_separators(raw);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

fn strip_separators(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect()
}

/// "현재층/최고층" 표기를 층 밴드로 분류합니다.
///
/// 현재층이 저/중/고 문자면 그대로 해당 밴드입니다. 숫자면
/// 최고층과 같을 때 탑층, 1일 때 1층, 그 외에는 최고층을 3등분해
/// 저/중/고로 나눕니다.
pub fn classify_floor(raw: &str) -> FloorBand {
    let trimmed = raw.trim().trim_start_matches('\'');
    let Some((current_raw, max_raw)) = trimmed.split_once('/') else {
        return FloorBand::Unknown;
    };

    match current_raw.trim() {
        "저" => return FloorBand::Low,
        "중" => return FloorBand::Mid,
        "고" => return FloorBand::High,
        _ => {}
    }

    let (Ok(current), Ok(max)) = (
        current_raw.trim().parse::<i32>(),
        max_raw.trim().parse::<i32>(),
    ) else {
        return FloorBand::Unknown;
    };

    if current == max {
        return FloorBand::Top;
    }
    if current == 1 {
        return FloorBand::First;
    }

    // 최고층의 1/3 지점 (반올림)
    let third = ((max as f64) / 3.0).round() as i32;
    if current <= third {
        FloorBand::Low
    } else if current <= 2 * third {
        FloorBand::Mid
    } else {
        FloorBand::High
    }
}

/// "101동" 같은 동 이름에서 동 번호를 추출합니다.
pub fn building_number(name: &str) -> Option<i64> {
    let trimmed = name.trim();
    let digits = trimmed.strip_suffix('동').unwrap_or(trimmed);
    digits.parse().ok()
}

/// YYYYMMDD 문자열을 YYYY-MM-DD로 바꿉니다. 형식이 다르면 원문 유지.
pub fn reformat_ymd(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw.trim(), "%Y%m%d") {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => raw.trim().to_string(),
    }
}

/// 매물 확인일 기준 경과일. 확인일이 없으면 `None`.
pub fn age_in_days(download_date: NaiveDate, confirm_date: Option<NaiveDate>) -> Option<i64> {
    confirm_date.map(|confirm| (download_date - confirm).num_days())
}

/// 거래일 경과 연수 구분. 1/3/5년 초과분은 `None`.
///
/// 연수는 경과일 / 365.25 로 계산합니다.
pub fn deal_age_class(download_date: NaiveDate, deal_date: Option<NaiveDate>) -> Option<AgeClass> {
    let deal = deal_date?;
    let years = (download_date - deal).num_days() as f64 / 365.25;
    if years <= 1.0 {
        Some(AgeClass::Y1)
    } else if years <= 3.0 {
        Some(AgeClass::Y3)
    } else if years <= 5.0 {
        Some(AgeClass::Y5)
    } else {
        None
    }
}

/// 평형 구성 문자열의 마지막 항목에 ㎡ 단위를 보정합니다.
///
/// "80, 112" → "80, 112㎡".
pub fn normalize_pyeong_names(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    let mut parts: Vec<String> = raw.split(',').map(|p| p.trim().to_string()).collect();
    if let Some(last) = parts.last_mut() {
        if !last.ends_with('㎡') {
            last.push('㎡');
        }
    }
    parts.join(", ")
}

/// 매물 출현율 (매물 수 / 세대수 × 100, 소수 첫째 자리).
///
/// 세대수가 0이거나 없으면 빈 문자열입니다.
pub fn exposure_rate(count: Option<i64>, household_count: Option<i64>) -> String {
    let households = match household_count {
        Some(h) if h > 0 => h as f64,
        _ => return String::new(),
    };
    let count = count.unwrap_or(0) as f64;
    format!("{:.1}%", count / households * 100.0)
}
