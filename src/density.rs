//! API MPMS 11.1 (ASTM D1250) 밀도 보정. Table 54A(원유)/54B(정제유) 계수를 사용한다.
//! 입력/출력 밀도는 kg/L, 온도는 °C이며 내부 계산은 kg/m³로 한다.

use crate::product::ProductClass;

/// 기준 온도(°C)
pub const REFERENCE_TEMP_C: f64 = 15.0;
/// 정제유 K0 (Table 54B)
pub const K0_REFINED: f64 = 341.0957;
/// 원유 K0 (Table 54A)
pub const K0_CRUDE: f64 = 613.9723;

/// 15°C와 동일하다고 보는 온도 허용치.
const IDENTITY_BAND_C: f64 = 0.001;
/// 역산 반복 수렴 허용치 [kg/m³]
pub const ITERATION_TOLERANCE_KG_M3: f64 = 0.00001;
/// 역산 반복 상한
pub const MAX_ITERATIONS: u32 = 100;

/// ρT → ρ15 역산 결과와 수렴 진단 정보.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Density15Estimate {
    /// 15°C 기준 밀도 [kg/L]
    pub density15: f64,
    /// 수행한 반복 횟수 (15°C 단축 경로는 0)
    pub iterations: u32,
    /// 마지막 보정량이 허용치 미만이었는지 여부
    pub converged: bool,
}

fn is_reference_temp(temperature_c: f64) -> bool {
    (temperature_c - REFERENCE_TEMP_C).abs() < IDENTITY_BAND_C
}

fn k0(product: ProductClass) -> f64 {
    match product {
        ProductClass::Refined => K0_REFINED,
        ProductClass::Crude => K0_CRUDE,
    }
}

/// α15 = K0 / ρ15². 밀도가 0 이하이면 0으로 둔다.
fn alpha15(density15_kg_m3: f64, product: ProductClass) -> f64 {
    if density15_kg_m3 <= 0.0 {
        return 0.0;
    }
    k0(product) / (density15_kg_m3 * density15_kg_m3)
}

fn vcf_kg_m3(density15_kg_m3: f64, temperature_c: f64, product: ProductClass) -> f64 {
    if is_reference_temp(temperature_c) {
        return 1.0;
    }
    let alpha = alpha15(density15_kg_m3, product);
    let delta_t = temperature_c - REFERENCE_TEMP_C;
    let exponent = -alpha * delta_t * (1.0 + 0.8 * alpha * delta_t);
    exponent.exp()
}

/// 체적보정계수(VCF)를 계산한다. 15°C에서는 정확히 1.0을 반환한다.
pub fn vcf(density15_kg_per_l: f64, temperature_c: f64, product: ProductClass) -> f64 {
    vcf_kg_m3(density15_kg_per_l * 1000.0, temperature_c, product)
}

/// ρ15 → ρT 변환.
pub fn density_at_temperature(
    density15_kg_per_l: f64,
    temperature_c: f64,
    product: ProductClass,
) -> f64 {
    let rho15_kg_m3 = density15_kg_per_l * 1000.0;
    let rho_t_kg_m3 = rho15_kg_m3 * vcf_kg_m3(rho15_kg_m3, temperature_c, product);
    rho_t_kg_m3 / 1000.0
}

/// ρT → ρ15 변환. VCF가 ρ15에 의존하므로 고정점 반복으로 푼다.
pub fn density15(density_t_kg_per_l: f64, temperature_c: f64, product: ProductClass) -> f64 {
    density15_with_convergence(density_t_kg_per_l, temperature_c, product).density15
}

/// [`density15`]와 같은 값을 반환하면서 반복 횟수와 수렴 여부를 함께 알려준다.
///
/// 초기값은 ρT 자신이고, 보정량이 [`ITERATION_TOLERANCE_KG_M3`] 미만이 되거나
/// [`MAX_ITERATIONS`]에 도달하면 멈춘다. 상한에 걸려도 마지막 추정값을 돌려준다.
pub fn density15_with_convergence(
    density_t_kg_per_l: f64,
    temperature_c: f64,
    product: ProductClass,
) -> Density15Estimate {
    if is_reference_temp(temperature_c) {
        return Density15Estimate {
            density15: density_t_kg_per_l,
            iterations: 0,
            converged: true,
        };
    }

    let rho_t_kg_m3 = density_t_kg_per_l * 1000.0;
    let mut rho15 = rho_t_kg_m3;
    let mut iterations = 0;
    let mut converged = false;

    while iterations < MAX_ITERATIONS {
        let factor = vcf_kg_m3(rho15, temperature_c, product);
        let next = rho_t_kg_m3 / factor;
        let delta = next - rho15;
        rho15 = next;
        iterations += 1;
        if delta.abs() < ITERATION_TOLERANCE_KG_M3 {
            converged = true;
            break;
        }
    }

    if converged {
        tracing::trace!(iterations, temperature_c, %product, "density15 converged");
    } else {
        tracing::warn!(
            density_t_kg_per_l,
            temperature_c,
            %product,
            "density15 hit the iteration cap without converging"
        );
    }

    Density15Estimate {
        density15: rho15 / 1000.0,
        iterations,
        converged,
    }
}
