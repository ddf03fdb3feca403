//! 계산 이력과 경로 템플릿을 JSON 파일로 보관한다.

pub mod history;
pub mod templates;

pub use history::{CalculationKind, HistoryEntry, HistoryStore};
pub use templates::{TemplatePoint, TemplateStore, TripTemplate};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use thiserror::Error;

/// 저장소 입출력 오류.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// 파일이 없으면 기본값, 내용이 깨졌으면 경고를 남기고 기본값을 쓴다.
fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let file = File::open(path)?;
    match serde_json::from_reader(BufReader::new(file)) {
        Ok(value) => {
            tracing::debug!(path = %path.display(), "store loaded");
            Ok(value)
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "store file is corrupt, starting empty");
            Ok(T::default())
        }
    }
}

fn persist<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)?;
    tracing::debug!(path = %path.display(), "store saved");
    Ok(())
}
