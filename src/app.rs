use std::path::PathBuf;
use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::i18n::{self, Translator};
use crate::store::{HistoryStore, StoreError, TemplateStore};
use crate::ui_cli;
use crate::ui_cli::MenuChoice;
use crate::validation::ValidationError;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// 실행 중 공유하는 설정, 번역기, 저장소 묶음.
pub struct AppContext {
    pub config: Config,
    pub config_path: PathBuf,
    pub tr: Translator,
    pub history: HistoryStore,
    pub templates: TemplateStore,
}

impl AppContext {
    /// 설정의 데이터 디렉터리에 저장소를 연다.
    pub fn open(config: Config, config_path: PathBuf, tr: Translator) -> Result<Self, AppError> {
        let data_dir = config.resolved_data_dir();
        tracing::debug!(data_dir = %data_dir.display(), "opening stores");
        let history = HistoryStore::open(&data_dir, config.history_limit)?;
        let templates = TemplateStore::open(&data_dir)?;
        Ok(Self {
            config,
            config_path,
            tr,
            history,
            templates,
        })
    }

    pub fn save_config(&self) -> Result<(), AppError> {
        self.config.save(&self.config_path)?;
        Ok(())
    }

    /// 설정의 언어가 바뀌었을 때 번역기를 다시 만든다.
    pub fn reload_translator(&mut self) {
        let lang = i18n::resolve_language(None, Some(self.config.language.as_str()));
        self.tr = Translator::new_with_pack(&lang, self.config.locales_dir.as_deref());
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(ctx: &mut AppContext) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(&ctx.tr)? {
            MenuChoice::MassToVolume => ui_cli::handle_mass_to_volume(ctx)?,
            MenuChoice::VolumeToMass => ui_cli::handle_volume_to_mass(ctx)?,
            MenuChoice::TripLoss => ui_cli::handle_trip_loss(ctx)?,
            MenuChoice::History => ui_cli::handle_history(ctx)?,
            MenuChoice::Templates => ui_cli::handle_templates(ctx)?,
            MenuChoice::Settings => {
                ui_cli::handle_settings(ctx)?;
                ctx.save_config()?;
            }
            MenuChoice::Exit => {
                ctx.save_config()?;
                println!("{}", ctx.tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
