//! 계산 이력 저장소 (`history.json`). 최신 항목이 앞에 온다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::Result;
use crate::calculator::ConversionResult;
use crate::trip::TripResult;

const FILE_NAME: &str = "history.json";

/// 이력 항목 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationKind {
    /// 질량 ↔ 체적 환산
    Conversion,
    /// 운송 손실 분석
    TripLoss,
}

/// 이력 한 건.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub kind: CalculationKind,
    #[serde(default)]
    pub conversion: Option<ConversionResult>,
    #[serde(default)]
    pub trip: Option<TripResult>,
    /// 표시용 입력 파라미터
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
}

impl HistoryEntry {
    pub fn conversion(result: ConversionResult, parameters: BTreeMap<String, String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            kind: CalculationKind::Conversion,
            conversion: Some(result),
            trip: None,
            parameters,
        }
    }

    pub fn trip(result: TripResult, parameters: BTreeMap<String, String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            kind: CalculationKind::TripLoss,
            conversion: None,
            trip: Some(result),
            parameters,
        }
    }
}

/// 파일 기반 이력 저장소.
pub struct HistoryStore {
    path: PathBuf,
    limit: Option<usize>,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// 디렉터리를 만들고 기존 이력을 읽는다. 보관 한도를 넘는 항목은 읽을 때 버린다.
    pub fn open(dir: impl AsRef<Path>, limit: Option<usize>) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(FILE_NAME);
        let mut entries: Vec<HistoryEntry> = super::load_or_default(&path)?;
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        Ok(Self {
            path,
            limit,
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// 맨 앞에 추가하고 보관 한도를 넘는 오래된 항목은 버린다.
    pub fn add(&mut self, entry: HistoryEntry) -> Result<Uuid> {
        let id = entry.id;
        self.entries.insert(0, entry);
        if let Some(limit) = self.limit {
            self.entries.truncate(limit);
        }
        self.save()?;
        Ok(id)
    }

    pub fn remove(&mut self, id: Uuid) -> Result<bool> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = self.entries.len() != before;
        if removed {
            self.save()?;
        }
        Ok(removed)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.save()
    }

    fn save(&self) -> Result<()> {
        super::persist(&self.path, &self.entries)
    }
}
