//! 운송 구간 손실 분석. 순서가 있는 측정 지점 목록(선적 → 경유 → 하역)에 대해
//! 지점별 결과, 인접 구간 차이, 처음 ↔ 마지막 총 차이를 계산한다.
//!
//! 차이의 부호는 항상 `to - from`이다. 양수는 뒤 지점이 더 많이 측정된 것(증가),
//! 음수는 손실이다.

use serde::{Deserialize, Serialize};

use crate::calculator::{percent_of, resolve_densities};
use crate::product::{DensityFrame, ProductClass};

/// 측정 지점 입력값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementPoint {
    pub name: String,
    pub mass_kg: f64,
    /// `density_frame` 기준 밀도 [kg/L]
    pub density: f64,
    pub temperature_c: f64,
    pub density_frame: DensityFrame,
}

impl MeasurementPoint {
    pub fn new(
        name: impl Into<String>,
        mass_kg: f64,
        density: f64,
        temperature_c: f64,
        density_frame: DensityFrame,
    ) -> Self {
        Self {
            name: name.into(),
            mass_kg,
            density,
            temperature_c,
            density_frame,
        }
    }
}

/// 한 지점의 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointResult {
    pub name: String,
    pub mass_kg: f64,
    pub density15: f64,
    pub density_actual: f64,
    pub temperature_c: f64,
    /// 15°C 기준 체적 [L]
    pub volume15_l: f64,
    /// 실측 온도 기준 체적 [L]
    pub volume_actual_l: f64,
}

/// 두 지점 간 차이. 백분율의 기준은 `from` 값이며 기준이 0이면 0%.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Delta {
    pub mass_kg: f64,
    pub mass_percent: f64,
    pub volume15_l: f64,
    pub volume15_percent: f64,
    pub volume_actual_l: f64,
    pub volume_actual_percent: f64,
}

impl Delta {
    /// `to - from` 차이를 계산한다.
    pub fn between(from: &PointResult, to: &PointResult) -> Self {
        let mass_kg = to.mass_kg - from.mass_kg;
        let volume15_l = to.volume15_l - from.volume15_l;
        let volume_actual_l = to.volume_actual_l - from.volume_actual_l;
        Self {
            mass_kg,
            mass_percent: percent_of(mass_kg, from.mass_kg),
            volume15_l,
            volume15_percent: percent_of(volume15_l, from.volume15_l),
            volume_actual_l,
            volume_actual_percent: percent_of(volume_actual_l, from.volume_actual_l),
        }
    }

    /// 모든 항목이 0인 차이. 지점이 2개 미만일 때의 총 차이로 쓴다.
    pub fn zero() -> Self {
        Self::default()
    }
}

/// 인접한 두 지점과 그 차이.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: PointResult,
    pub to: PointResult,
    pub delta: Delta,
}

impl Segment {
    pub fn new(from: PointResult, to: PointResult) -> Self {
        let delta = Delta::between(&from, &to);
        Self { from, to, delta }
    }
}

/// 전체 경로 결과. N개 지점이면 구간은 N-1개이며, N<2이면 구간이 없고 총 차이는 0이다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripResult {
    pub product: ProductClass,
    pub points: Vec<PointResult>,
    pub segments: Vec<Segment>,
    pub total: Delta,
}

impl TripResult {
    /// 계산된 지점 결과로부터 구간과 총 차이를 구성한다.
    pub fn from_points(product: ProductClass, points: Vec<PointResult>) -> Self {
        let (segments, total) = match (points.first(), points.last()) {
            (Some(first), Some(last)) if points.len() >= 2 => {
                let segments = points
                    .windows(2)
                    .map(|pair| Segment::new(pair[0].clone(), pair[1].clone()))
                    .collect();
                (segments, Delta::between(first, last))
            }
            _ => (Vec::new(), Delta::zero()),
        };
        Self {
            product,
            points,
            segments,
            total,
        }
    }

    /// 구간 비교가 가능한지(지점 2개 이상) 여부.
    pub fn is_complete(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn first(&self) -> Option<&PointResult> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PointResult> {
        self.points.last()
    }
}

/// 한 지점의 밀도를 보정하고 두 기준 체적을 계산한다.
pub fn compute_point(
    name: impl Into<String>,
    mass_kg: f64,
    density: f64,
    temperature_c: f64,
    frame: DensityFrame,
    product: ProductClass,
) -> PointResult {
    let (rho15, rho_t) = resolve_densities(density, temperature_c, frame, product);
    PointResult {
        name: name.into(),
        mass_kg,
        density15: rho15,
        density_actual: rho_t,
        temperature_c,
        volume15_l: mass_kg / rho15,
        volume_actual_l: mass_kg / rho_t,
    }
}

/// 입력 순서를 유지하며 모든 지점을 계산하고 구간/총 차이를 만든다.
pub fn calculate(points: &[MeasurementPoint], product: ProductClass) -> TripResult {
    let results = points
        .iter()
        .map(|p| {
            compute_point(
                p.name.clone(),
                p.mass_kg,
                p.density,
                p.temperature_c,
                p.density_frame,
                product,
            )
        })
        .collect();
    let trip = TripResult::from_points(product, results);
    tracing::debug!(
        points = trip.points.len(),
        segments = trip.segments.len(),
        total_mass_kg = trip.total.mass_kg,
        "trip loss calculated"
    );
    trip
}
