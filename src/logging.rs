//! tracing 구독자 초기화. 대화형 프롬프트(stdout)와 섞이지 않도록 stderr로 출력한다.

use tracing_subscriber::EnvFilter;

/// 필터를 덮어쓰는 환경 변수.
pub const LOG_ENV: &str = "OIL_CALC_LOG";

/// `OIL_CALC_LOG` → 설정값 → `warn` 순으로 필터를 정한다.
pub fn build_filter(config_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(config_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// 전역 구독자를 설치한다. 이미 설치돼 있으면 아무것도 하지 않는다.
pub fn init(config_level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        build_filter(config_level)
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
