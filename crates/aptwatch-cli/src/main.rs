//! 아파트 단지 리서치 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 두 단지 수집 → 스냅샷 → 병합 → 점수 요약
//! aptwatch analyze --complex 138183 --complex 136913
//!
//! # 평형까지 지정 (갭 지수 비교 대상)
//! aptwatch analyze --complex 138183 --pyeong 33 --complex 136913 --pyeong 25
//!
//! # 법정동 코드 찾기
//! aptwatch regions --sido 경기도 --sigungu "수원시 영통구"
//!
//! # 지역의 단지 목록
//! aptwatch complexes --cortar 4111710300
//! ```

use clap::{Parser, Subcommand};
use tracing::error;

mod commands;

use aptwatch_core::config::AppConfig;
use aptwatch_core::logging::{init_logging, LogConfig, LogFormat};

#[derive(Parser)]
#[command(name = "aptwatch")]
#[command(about = "아파트 단지 리서치 파이프라인 - 수집 · 병합 · 점수화", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 단지 수집 후 스냅샷 저장과 분석 요약 출력
    Analyze {
        /// 단지 번호 (두 번 지정, 예: --complex 138183 --complex 136913)
        #[arg(long = "complex", required = true)]
        complexes: Vec<String>,

        /// 갭 지수 비교에 쓸 정규 평형 라벨 (단지 순서대로, 예: --pyeong 33)
        #[arg(long = "pyeong")]
        pyeongs: Vec<String>,
    },

    /// 법정동 코드 테이블 조회
    Regions {
        /// 법정동 코드 CSV 경로 (기본: 설정의 region_file)
        #[arg(long)]
        file: Option<String>,

        /// 시/도 필터
        #[arg(long)]
        sido: Option<String>,

        /// 시/군/구 필터
        #[arg(long)]
        sigungu: Option<String>,
    },

    /// 법정동 코드로 단지 목록 조회
    Complexes {
        /// 법정동 코드 (예: 4111710300)
        #[arg(long)]
        cortar: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 포털 세션 자격증명은 .env에서
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;

    let format: LogFormat = config.logging.format.parse().unwrap_or_default();
    let log_config = LogConfig::new(&config.logging.level).with_format(format);
    if let Err(e) = init_logging(log_config) {
        eprintln!("로깅 초기화 실패: {e}");
    }

    let result = match cli.command {
        Commands::Analyze { complexes, pyeongs } => {
            commands::analyze::run(&config, complexes, pyeongs).await
        }
        Commands::Regions { file, sido, sigungu } => {
            commands::regions::run(&config, file, sido.as_deref(), sigungu.as_deref())
        }
        Commands::Complexes { cortar } => commands::complexes::run(&config, &cortar).await,
    };

    if let Err(e) = &result {
        error!("명령 실행 실패: {e:#}");
    }
    result
}
