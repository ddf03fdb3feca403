//! 질량 ↔ 체적 이중 환산. 입력 밀도 기준(ρ15/ρT)에 따라 다른 쪽 밀도를 보정해
//! 15°C 결과와 실측 온도 결과를 동시에 돌려준다.

use serde::{Deserialize, Serialize};

use crate::density;
use crate::product::{DensityFrame, ProductClass};

/// 환산 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionDirection {
    /// 질량[kg] → 체적[L]
    MassToVolume,
    /// 체적[L] → 질량[kg]
    VolumeToMass,
}

/// 이중 환산 결과. 생성 후 변경하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub direction: ConversionDirection,
    /// 15°C 기준 결과 (L 또는 kg)
    pub at15: f64,
    /// 실측 온도 기준 결과 (L 또는 kg)
    pub at_actual: f64,
    /// 사용한 15°C 밀도 [kg/L]
    pub density15: f64,
    /// 사용한 실측 온도 밀도 [kg/L]
    pub density_actual: f64,
}

impl ConversionResult {
    /// 실측 기준 − 15°C 기준.
    pub fn difference(&self) -> f64 {
        self.at_actual - self.at15
    }

    /// 15°C 결과 대비 차이 비율[%]. 15°C 결과가 0이면 0.
    pub fn percent_difference(&self) -> f64 {
        percent_of(self.difference(), self.at15)
    }
}

/// `base`가 0이면 0을 돌려주는 백분율.
pub(crate) fn percent_of(value: f64, base: f64) -> f64 {
    if base == 0.0 {
        0.0
    } else {
        value / base * 100.0
    }
}

/// 입력 밀도를 (ρ15, ρT) 쌍으로 맞춘다.
pub fn resolve_densities(
    density: f64,
    temperature_c: f64,
    frame: DensityFrame,
    product: ProductClass,
) -> (f64, f64) {
    match frame {
        DensityFrame::At15 => (
            density,
            density::density_at_temperature(density, temperature_c, product),
        ),
        DensityFrame::AtActualTemperature => (
            density::density15(density, temperature_c, product),
            density,
        ),
    }
}

/// 질량 → 체적.
pub fn mass_to_volume(
    mass_kg: f64,
    density: f64,
    temperature_c: f64,
    frame: DensityFrame,
    product: ProductClass,
) -> ConversionResult {
    let (rho15, rho_t) = resolve_densities(density, temperature_c, frame, product);
    ConversionResult {
        direction: ConversionDirection::MassToVolume,
        at15: mass_kg / rho15,
        at_actual: mass_kg / rho_t,
        density15: rho15,
        density_actual: rho_t,
    }
}

/// 체적 → 질량.
pub fn volume_to_mass(
    liters: f64,
    density: f64,
    temperature_c: f64,
    frame: DensityFrame,
    product: ProductClass,
) -> ConversionResult {
    let (rho15, rho_t) = resolve_densities(density, temperature_c, frame, product);
    ConversionResult {
        direction: ConversionDirection::VolumeToMass,
        at15: liters * rho15,
        at_actual: liters * rho_t,
        density15: rho15,
        density_actual: rho_t,
    }
}

/// 방향에 따라 [`mass_to_volume`] 또는 [`volume_to_mass`]를 호출한다.
pub fn convert(
    direction: ConversionDirection,
    value: f64,
    density: f64,
    temperature_c: f64,
    frame: DensityFrame,
    product: ProductClass,
) -> ConversionResult {
    match direction {
        ConversionDirection::MassToVolume => {
            mass_to_volume(value, density, temperature_c, frame, product)
        }
        ConversionDirection::VolumeToMass => {
            volume_to_mass(value, density, temperature_c, frame, product)
        }
    }
}
