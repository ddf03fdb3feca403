use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::product::{DensityFrame, ProductClass};

/// 기본 설정 파일 이름.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
const APP_DIR_NAME: &str = "oil_calc_toolbox";

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드 (auto/ko/en)
    pub language: String,
    /// 새 계산의 기본 제품 분류
    pub default_product: ProductClass,
    /// 새 계산의 기본 밀도 기준
    pub default_density_frame: DensityFrame,
    /// 이력/템플릿 저장 위치. 없으면 OS 데이터 디렉터리를 쓴다.
    pub data_dir: Option<PathBuf>,
    /// 언어팩(`<code>.toml`) 디렉터리. 없으면 `./locales`를 찾는다.
    pub locales_dir: Option<PathBuf>,
    /// 보관할 최대 이력 건수. `None`이면 무제한.
    pub history_limit: Option<usize>,
    /// tracing 필터 (OIL_CALC_LOG 환경 변수가 우선)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            default_product: ProductClass::Refined,
            default_density_frame: DensityFrame::At15,
            data_dir: None,
            locales_dir: None,
            history_limit: Some(200),
            log_level: "warn".to_string(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        tracing::debug!(path = %path.display(), "default config written");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 파일에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 이력/템플릿 파일이 놓일 디렉터리.
    pub fn resolved_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        dirs::data_local_dir()
            .map(|d| d.join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("data"))
    }
}
