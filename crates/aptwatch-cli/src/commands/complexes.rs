//! complexes 명령: 법정동 코드로 단지 목록 조회.

use anyhow::Context;
use tracing::warn;

use aptwatch_client::{LandClient, PortalSession};
use aptwatch_core::config::AppConfig;

pub async fn run(config: &AppConfig, cortar_no: &str) -> anyhow::Result<()> {
    let session = PortalSession::from_env();
    if !session.has_authorization() {
        warn!("AUTHORIZATION 환경 변수가 비어 있습니다. 포털이 요청을 거부할 수 있습니다.");
    }

    let client = LandClient::new(&config.portal, session)?;
    let complexes = client
        .fetch_region_complexes(cortar_no)
        .await
        .with_context(|| format!("단지 목록 조회 실패: cortarNo={cortar_no}"))?;

    if complexes.is_empty() {
        println!("단지가 없습니다: cortarNo={cortar_no}");
        return Ok(());
    }

    println!("{:<10} 단지명", "complexNo");
    for complex in complexes {
        println!("{:<10} {}", complex.complex_no, complex.complex_name);
    }
    Ok(())
}
