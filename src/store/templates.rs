//! 경로 템플릿 저장소 (`templates.json`). 측정값 없이 지점 이름과 밀도 기준만 보관한다.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::Result;
use crate::product::{DensityFrame, ProductClass};
use crate::trip::MeasurementPoint;

const FILE_NAME: &str = "templates.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplatePoint {
    pub name: String,
    pub density_frame: DensityFrame,
}

/// 반복해서 쓰는 운송 경로의 뼈대.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripTemplate {
    pub id: Uuid,
    pub name: String,
    pub product: ProductClass,
    pub points: Vec<TemplatePoint>,
}

impl TripTemplate {
    pub fn new(name: impl Into<String>, product: ProductClass, points: Vec<TemplatePoint>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            product,
            points,
        }
    }

    /// 측정 지점 목록에서 이름과 밀도 기준만 뽑아 템플릿을 만든다.
    pub fn from_points(
        name: impl Into<String>,
        product: ProductClass,
        points: &[MeasurementPoint],
    ) -> Self {
        let points = points
            .iter()
            .map(|p| TemplatePoint {
                name: p.name.clone(),
                density_frame: p.density_frame,
            })
            .collect();
        Self::new(name, product, points)
    }
}

pub struct TemplateStore {
    path: PathBuf,
    templates: Vec<TripTemplate>,
}

impl TemplateStore {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(FILE_NAME);
        let templates = super::load_or_default(&path)?;
        Ok(Self { path, templates })
    }

    pub fn list(&self) -> &[TripTemplate] {
        &self.templates
    }

    pub fn find_by_name(&self, name: &str) -> Option<&TripTemplate> {
        self.templates
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
    }

    /// 같은 id가 있으면 교체하고, 없으면 뒤에 추가한다.
    pub fn save(&mut self, template: TripTemplate) -> Result<()> {
        match self.templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template,
            None => self.templates.push(template),
        }
        super::persist(&self.path, &self.templates)
    }

    pub fn delete(&mut self, id: Uuid) -> Result<bool> {
        let before = self.templates.len();
        self.templates.retain(|t| t.id != id);
        let removed = self.templates.len() != before;
        if removed {
            super::persist(&self.path, &self.templates)?;
        }
        Ok(removed)
    }
}
