//! 페이지네이션 동작 통합 테스트 (mockito 기반).

use aptwatch_client::{LandClient, PortalSession};
use aptwatch_core::config::PortalConfig;
use mockito::{Matcher, ServerGuard};

fn test_client(server: &ServerGuard) -> LandClient {
    let config = PortalConfig {
        base_url: server.url(),
        timeout_secs: 5,
        max_pages: 10,
        max_dong_probe: 5,
    };
    let session = PortalSession {
        authorization: "Bearer test-token".to_string(),
        user_agent: "test-agent".to_string(),
        cookies: vec![("NNB".to_string(), "abc".to_string())],
    };
    LandClient::new(&config, session).unwrap()
}

fn real_price_body(rows: &[(i32, i32, i32, &str, i32)], added_row_count: Option<i64>) -> String {
    let list: Vec<String> = rows
        .iter()
        .map(|(y, m, d, price, floor)| {
            format!(
                r#"{{"tradeType":"A1","tradeYear":{y},"tradeMonth":{m},"tradeDate":{d},"dealPrice":"{price}","floor":{floor}}}"#
            )
        })
        .collect();
    let cursor = added_row_count
        .map(|c| format!(r#","addedRowCount":{c}"#))
        .unwrap_or_default();
    format!(
        r#"{{"realPriceOnMonthList":[{{"realPriceList":[{}]}}]{cursor}}}"#,
        list.join(",")
    )
}

#[tokio::test]
async fn real_prices_follow_cursor_and_dedup() {
    let mut server = mockito::Server::new_async().await;
    let path = "/api/complexes/138183/prices/real";

    // 첫 페이지: 새 행 2건 + 커서 20
    let first = server
        .mock("GET", path)
        .match_query(Matcher::Any)
        .with_body(real_price_body(
            &[(2024, 3, 15, "13억 5,000", 7), (2024, 2, 1, "13억", 3)],
            Some(20),
        ))
        .create_async()
        .await;

    // 커서 20: 새 행 1건 + 중복 1건, 커서 40
    let second = server
        .mock("GET", path)
        .match_query(Matcher::UrlEncoded(
            "addedRowCount".into(),
            "20".into(),
        ))
        .with_body(real_price_body(
            &[(2024, 2, 1, "13억", 3), (2023, 11, 20, "12억 8,000", 12)],
            Some(40),
        ))
        .create_async()
        .await;

    // 커서 40: 전부 중복 → 수집 종료
    let third = server
        .mock("GET", path)
        .match_query(Matcher::UrlEncoded(
            "addedRowCount".into(),
            "40".into(),
        ))
        .with_body(real_price_body(&[(2023, 11, 20, "12억 8,000", 12)], Some(60)))
        .create_async()
        .await;

    let client = test_client(&server);
    let prices = client.fetch_real_prices("138183", "3").await.unwrap();

    assert_eq!(prices.len(), 3);
    assert_eq!(prices[0].deal_price, "13억 5,000");
    assert_eq!(prices[2].deal_price, "12억 8,000");
    first.assert_async().await;
    second.assert_async().await;
    third.assert_async().await;
}

#[tokio::test]
async fn real_prices_stop_without_cursor() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/api/complexes/138183/prices/real")
        .match_query(Matcher::Any)
        .with_body(real_price_body(&[(2024, 3, 15, "13억 5,000", 7)], None))
        .expect(1)
        .create_async()
        .await;

    let client = test_client(&server);
    let prices = client.fetch_real_prices("138183", "3").await.unwrap();
    assert_eq!(prices.len(), 1);
}

#[tokio::test]
async fn real_prices_keep_rows_when_next_page_fails() {
    let mut server = mockito::Server::new_async().await;
    let path = "/api/complexes/138183/prices/real";

    // 첫 페이지: 2건 + 커서 20
    server
        .mock("GET", path)
        .match_query(Matcher::Any)
        .with_body(real_price_body(
            &[(2024, 3, 15, "13억 5,000", 7), (2024, 2, 1, "13억", 3)],
            Some(20),
        ))
        .create_async()
        .await;

    // 커서 20 요청은 서버 오류 → 이미 받은 2건은 유지되어야 한다
    server
        .mock("GET", path)
        .match_query(Matcher::UrlEncoded("addedRowCount".into(), "20".into()))
        .with_status(500)
        .create_async()
        .await;

    let client = test_client(&server);
    let prices = client.fetch_real_prices("138183", "3").await.unwrap();

    assert_eq!(prices.len(), 2);
    assert_eq!(prices[0].deal_price, "13억 5,000");
}

#[tokio::test]
async fn real_prices_first_page_failure_is_an_error() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/api/complexes/138183/prices/real")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let client = test_client(&server);
    let error = client.fetch_real_prices("138183", "3").await.unwrap_err();
    assert!(matches!(
        error,
        aptwatch_client::ClientError::Status { status: 500, .. }
    ));
}

#[tokio::test]
async fn articles_page_until_empty() {
    let mut server = mockito::Server::new_async().await;
    let path = "/api/articles/complex/138183";

    server
        .mock("GET", path)
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_body(
            r#"{"articleList":[
                {"articleNo":"24001","articleName":"테스트단지","tradeTypeName":"매매","dealOrWarrantPrc":"13억"},
                {"articleNo":"24002","articleName":"테스트단지","tradeTypeName":"전세","dealOrWarrantPrc":"8억"}
            ],"isMoreData":true}"#,
        )
        .create_async()
        .await;

    server
        .mock("GET", path)
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_body(
            r#"{"articleList":[
                {"articleNo":"24003","articleName":"테스트단지","tradeTypeName":"매매","dealOrWarrantPrc":"12억 7,000"}
            ],"isMoreData":false}"#,
        )
        .create_async()
        .await;

    server
        .mock("GET", path)
        .match_query(Matcher::UrlEncoded("page".into(), "3".into()))
        .with_body(r#"{"articleList":[]}"#)
        .create_async()
        .await;

    let client = test_client(&server);
    let articles = client.fetch_articles("138183").await.unwrap();

    assert_eq!(articles.len(), 3);
    assert_eq!(articles[0].article_no, "24001");
    assert_eq!(articles[2].deal_or_warrant_prc, "12억 7,000");
}

#[tokio::test]
async fn articles_keep_rows_when_later_page_fails() {
    let mut server = mockito::Server::new_async().await;
    let path = "/api/articles/complex/138183";

    server
        .mock("GET", path)
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_body(
            r#"{"articleList":[
                {"articleNo":"24001","articleName":"테스트단지","tradeTypeName":"매매","dealOrWarrantPrc":"13억"}
            ],"isMoreData":true}"#,
        )
        .create_async()
        .await;

    server
        .mock("GET", path)
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(502)
        .create_async()
        .await;

    let client = test_client(&server);
    let articles = client.fetch_articles("138183").await.unwrap();

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].article_no, "24001");
}

#[tokio::test]
async fn http_error_is_reported_with_status() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/api/complexes/138183")
        .match_query(Matcher::Any)
        .with_status(401)
        .create_async()
        .await;

    let client = test_client(&server);
    let error = client.fetch_complex_detail("138183").await.unwrap_err();
    assert!(matches!(
        error,
        aptwatch_client::ClientError::Status { status: 401, .. }
    ));
}

#[tokio::test]
async fn decode_error_keeps_body_snippet() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/api/complexes/138183")
        .match_query(Matcher::Any)
        .with_body("<html>점검 중입니다</html>")
        .create_async()
        .await;

    let client = test_client(&server);
    let error = client.fetch_complex_detail("138183").await.unwrap_err();
    match error {
        aptwatch_client::ClientError::Decode { body, .. } => {
            assert!(body.contains("점검"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
