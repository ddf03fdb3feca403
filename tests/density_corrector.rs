//! 밀도 보정(VCF, ρT ↔ ρ15) 회귀 테스트.
use oil_calc_toolbox::density::{
    density15, density15_with_convergence, density_at_temperature, vcf, MAX_ITERATIONS,
};
use oil_calc_toolbox::ProductClass;

const DENSITIES: [f64; 6] = [0.60, 0.70, 0.80, 0.85, 1.00, 1.10];
const TEMPERATURES: [f64; 8] = [-50.0, -20.0, 0.0, 10.0, 25.0, 40.0, 60.0, 80.0];

#[test]
fn vcf_is_exactly_one_at_reference_temperature() {
    for product in ProductClass::ALL {
        for rho15 in DENSITIES {
            assert!((vcf(rho15, 15.0, product) - 1.0).abs() < 1e-7);
            assert!((density_at_temperature(rho15, 15.0, product) - rho15).abs() < 1e-7);
            assert_eq!(density15(rho15, 15.0, product), rho15);
        }
    }
}

#[test]
fn temperatures_within_identity_band_are_treated_as_reference() {
    assert_eq!(vcf(0.85, 15.0005, ProductClass::Refined), 1.0);
    assert_eq!(vcf(0.85, 14.9995, ProductClass::Crude), 1.0);
    assert!(vcf(0.85, 15.01, ProductClass::Refined) < 1.0);
}

#[test]
fn density15_round_trips_density_at_temperature() {
    for product in ProductClass::ALL {
        for rho15 in DENSITIES {
            for t in TEMPERATURES {
                let rho_t = density_at_temperature(rho15, t, product);
                let back = density15(rho_t, t, product);
                assert!(
                    (back - rho15).abs() < 1e-5,
                    "{product} rho15={rho15} T={t}: got {back}"
                );
            }
        }
    }
}

#[test]
fn warmer_liquid_expands_and_colder_contracts() {
    for product in ProductClass::ALL {
        for rho15 in DENSITIES {
            assert!(vcf(rho15, 30.0, product) < 1.0);
            assert!(vcf(rho15, 80.0, product) < 1.0);
            assert!(vcf(rho15, 0.0, product) > 1.0);
            assert!(vcf(rho15, -50.0, product) > 1.0);
        }
    }
}

#[test]
fn crude_expands_more_than_refined() {
    for rho15 in DENSITIES {
        for t in [20.0, 30.0, 50.0] {
            assert!(vcf(rho15, t, ProductClass::Crude) < vcf(rho15, t, ProductClass::Refined));
        }
    }
}

#[test]
fn refined_diesel_reference_value() {
    // alpha = 341.0957 / 840^2, dT = 15 -> VCF ≈ 0.99273
    let v = vcf(0.840, 30.0, ProductClass::Refined);
    assert!(v > 0.992 && v < 0.993, "vcf={v}");
}

#[test]
fn crude_reference_value() {
    // alpha = 613.9723 / 850^2, dT = 15 -> VCF ≈ 0.98721
    let crude = vcf(0.850, 30.0, ProductClass::Crude);
    let refined = vcf(0.850, 30.0, ProductClass::Refined);
    assert!(crude > 0.987 && crude < 0.988, "vcf={crude}");
    assert!(crude < refined);
}

#[test]
fn density15_is_heavier_than_warm_observed_density() {
    let rho15 = density15(0.840, 25.0, ProductClass::Refined);
    assert!(rho15 > 0.840);
    let rho_t = density_at_temperature(rho15, 25.0, ProductClass::Refined);
    assert!((rho_t - 0.840).abs() < 1e-5);
}

#[test]
fn convergence_diagnostics_match_plain_result() {
    let est = density15_with_convergence(0.850, 25.0, ProductClass::Refined);
    assert_eq!(est.density15, density15(0.850, 25.0, ProductClass::Refined));
    assert!(est.converged);
    assert!(est.iterations > 0 && est.iterations < 20, "iterations={}", est.iterations);

    let identity = density15_with_convergence(0.850, 15.0, ProductClass::Crude);
    assert_eq!(identity.iterations, 0);
    assert!(identity.converged);
}

#[test]
fn iteration_is_bounded_for_invalid_input() {
    let est = density15_with_convergence(f64::NAN, 30.0, ProductClass::Refined);
    assert_eq!(est.iterations, MAX_ITERATIONS);
    assert!(!est.converged);
}

#[test]
fn non_positive_density_collapses_vcf_to_one() {
    assert_eq!(vcf(0.0, 40.0, ProductClass::Refined), 1.0);
    assert_eq!(vcf(-0.5, 40.0, ProductClass::Crude), 1.0);
}
