//! 부동산 포털 API HTTP 클라이언트.
//!
//! 모든 엔드포인트는 설정된 베이스 URL 기준 상대 경로로 호출하며,
//! 요청 간 인증 헤더와 쿠키는 [`PortalSession`]에서 가져옵니다.

use std::collections::HashSet;
use std::time::Duration;

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, COOKIE, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use aptwatch_core::config::PortalConfig;

use crate::error::{ClientError, ClientResult};
use crate::session::PortalSession;
use crate::wire::{
    Article, ArticleListResponse, ComplexDetailResponse, ComplexSummary, LandPriceResponse,
    MarketPrice, MarketPriceResponse, RealPrice, RealPriceResponse, RegionComplexesResponse,
    School, SchoolsResponse,
};

/// 시세 제공자 식별자.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceProvider {
    /// KB부동산
    KbStar,
    /// 한국부동산원
    Kab,
}

impl PriceProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceProvider::KbStar => "kbstar",
            PriceProvider::Kab => "kab",
        }
    }
}

/// 포털 API 클라이언트.
pub struct LandClient {
    client: reqwest::Client,
    base_url: String,
    session: PortalSession,
    max_pages: u32,
}

impl LandClient {
    /// 설정과 세션으로 클라이언트를 생성합니다.
    pub fn new(config: &PortalConfig, session: PortalSession) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
            max_pages: config.max_pages,
        })
    }

    /// GET 요청 후 JSON을 역직렬화합니다.
    ///
    /// 디코딩 실패 시 응답 본문 일부를 에러에 보존합니다.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .client
            .get(&url)
            .query(query)
            .header(ACCEPT, "application/json")
            .header(ACCEPT_LANGUAGE, "ko-KR,ko;q=0.9")
            .header(USER_AGENT, self.session.user_agent.clone())
            .header(COOKIE, self.session.cookie_header());

        if self.session.has_authorization() {
            request = request.header(AUTHORIZATION, self.session.authorization.clone());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| ClientError::Decode {
            url,
            source,
            body: body.chars().take(500).collect(),
        })
    }

    /// 단지 상세 정보 (기본 정보 + 평형별 상세).
    pub async fn fetch_complex_detail(
        &self,
        complex_no: &str,
    ) -> ClientResult<ComplexDetailResponse> {
        self.get_json(
            &format!("/api/complexes/{complex_no}"),
            &[("sameAddressGroup", "true".to_string())],
        )
        .await
    }

    /// 배정 학교 목록. 호출 측에서는 첫 번째 학교만 사용합니다.
    pub async fn fetch_schools(&self, complex_no: &str) -> ClientResult<Vec<School>> {
        let response: SchoolsResponse = self
            .get_json(&format!("/api/complexes/{complex_no}/schools"), &[])
            .await?;
        Ok(response.schools)
    }

    /// 평형별 실거래 전체 수집.
    ///
    /// `addedRowCount` 커서로 페이지를 넘기고,
    /// (연,월,일,가격,층) 키로 중복을 제거합니다.
    /// 커서가 없거나 반복되거나 새 행이 없으면 멈춥니다.
    pub async fn fetch_real_prices(
        &self,
        complex_no: &str,
        pyeong_no: &str,
    ) -> ClientResult<Vec<RealPrice>> {
        let path = format!("/api/complexes/{complex_no}/prices/real");
        let base_query = [
            ("complexNo", complex_no.to_string()),
            ("tradeType", "A1".to_string()),
            ("year", "5".to_string()),
            ("priceChartChange", "false".to_string()),
            ("areaNo", pyeong_no.to_string()),
            ("type", "table".to_string()),
        ];

        let mut seen = HashSet::new();
        let mut transactions = Vec::new();

        let first: RealPriceResponse = self.get_json(&path, &base_query).await?;
        let mut collected = Self::collect_new(&first, &mut seen);
        let got_rows = !first.real_price_on_month_list.is_empty();
        transactions.append(&mut collected);

        let mut cursor = first.added_row_count;
        if !got_rows {
            return Ok(transactions);
        }

        let mut pages = 0u32;
        while let Some(prev) = cursor {
            pages += 1;
            if pages > self.max_pages {
                warn!(complex_no, pyeong_no, "실거래 페이지 한도 초과, 수집 중단");
                break;
            }

            let mut query = base_query.to_vec();
            query.push(("addedRowCount", prev.to_string()));
            // 추가 페이지 실패 시 이미 수집한 행은 유지한다.
            let next: RealPriceResponse = match self.get_json(&path, &query).await {
                Ok(response) => response,
                Err(err) => {
                    warn!(complex_no, pyeong_no, error = %err, "실거래 추가 페이지 실패, 수집분 반환");
                    break;
                }
            };

            let mut new_rows = Self::collect_new(&next, &mut seen);
            if new_rows.is_empty() {
                break;
            }
            transactions.append(&mut new_rows);

            match next.added_row_count {
                Some(added) if added != prev => cursor = Some(added),
                _ => break,
            }
        }

        debug!(
            complex_no,
            pyeong_no,
            count = transactions.len(),
            "실거래 수집 완료"
        );
        Ok(transactions)
    }

    fn collect_new(
        response: &RealPriceResponse,
        seen: &mut HashSet<(Option<i32>, Option<i32>, Option<i32>, String, Option<i32>)>,
    ) -> Vec<RealPrice> {
        response
            .real_price_on_month_list
            .iter()
            .flat_map(|month| month.real_price_list.iter())
            .filter(|t| seen.insert(t.dedup_key()))
            .cloned()
            .collect()
    }

    /// 시세 제공자 가격 밴드. 첫 번째 행(최신 기준일)만 반환합니다.
    pub async fn fetch_market_price(
        &self,
        complex_no: &str,
        pyeong_no: &str,
        provider: PriceProvider,
    ) -> ClientResult<Option<MarketPrice>> {
        let response: MarketPriceResponse = self
            .get_json(
                &format!("/api/complexes/{complex_no}/prices"),
                &[
                    ("complexNo", complex_no.to_string()),
                    ("tradeType", String::new()),
                    ("year", "5".to_string()),
                    ("priceChartChange", "false".to_string()),
                    ("areaNo", pyeong_no.to_string()),
                    ("provider", provider.as_str().to_string()),
                    ("type", "table".to_string()),
                ],
            )
            .await?;
        Ok(response.market_prices.into_iter().next())
    }

    /// 단지 매물 전체 수집. `articleList`가 빌 때까지 페이지를 넘깁니다.
    pub async fn fetch_articles(&self, complex_no: &str) -> ClientResult<Vec<Article>> {
        let path = format!("/api/articles/complex/{complex_no}");
        let mut articles = Vec::new();

        for page in 1..=self.max_pages {
            let result: ClientResult<ArticleListResponse> = self
                .get_json(
                    &path,
                    &[
                        ("realEstateType", "APT:PRE:ABYG:JGC".to_string()),
                        ("tradeType", String::new()),
                        ("page", page.to_string()),
                        ("complexNo", complex_no.to_string()),
                        ("type", "list".to_string()),
                        ("order", "rank".to_string()),
                        ("sameAddressGroup", "true".to_string()),
                    ],
                )
                .await;

            // 첫 페이지 실패만 전파하고, 이후 페이지 실패는 수집분을 유지한다.
            let response = match result {
                Ok(response) => response,
                Err(err) if page > 1 => {
                    warn!(complex_no, page, error = %err, "매물 추가 페이지 실패, 수집분 반환");
                    break;
                }
                Err(err) => return Err(err),
            };

            if response.article_list.is_empty() {
                break;
            }
            articles.extend(response.article_list);
        }

        debug!(complex_no, count = articles.len(), "매물 수집 완료");
        Ok(articles)
    }

    /// 동별 공시가격 (층 정보 포함).
    pub async fn fetch_building_land_price(
        &self,
        complex_no: &str,
        dong_no: u32,
    ) -> ClientResult<LandPriceResponse> {
        self.get_json(
            &format!("/api/complexes/{complex_no}/buildings/landprice"),
            &[
                ("dongNo", dong_no.to_string()),
                ("complexNo", complex_no.to_string()),
            ],
        )
        .await
    }

    /// 법정동 코드로 단지 목록 조회.
    pub async fn fetch_region_complexes(
        &self,
        cortar_no: &str,
    ) -> ClientResult<Vec<ComplexSummary>> {
        let response: RegionComplexesResponse = self
            .get_json(
                "/api/regions/complexes",
                &[
                    ("cortarNo", cortar_no.to_string()),
                    ("realEstateType", "APT:PRE:ABYG:JGC".to_string()),
                    ("order", String::new()),
                ],
            )
            .await?;
        Ok(response.complex_list)
    }
}
