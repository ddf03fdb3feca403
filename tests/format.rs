use oil_calc_toolbox::format::{
    format_density, format_mass, format_percent, format_signed, format_temperature,
    format_volume, DeltaClass,
};

#[test]
fn mass_and_volume_use_grouped_two_decimals() {
    assert_eq!(format_mass(1_176.4706), "1 176.47");
    assert_eq!(format_volume(25_000.0), "25 000.00");
    assert_eq!(format_volume(1_234_567.891), "1 234 567.89");
    assert_eq!(format_mass(850.0), "850.00");
    assert_eq!(format_mass(-12_345.6), "-12 345.60");
}

#[test]
fn density_and_temperature_precision() {
    assert_eq!(format_density(0.84567), "0.846");
    assert_eq!(format_temperature(25.04), "25.0");
    assert_eq!(format_temperature(-0.01), "0.0");
}

#[test]
fn gains_carry_a_plus_sign() {
    assert_eq!(format_percent(0.4231), "+0.42");
    assert_eq!(format_percent(-0.4231), "-0.42");
    assert_eq!(format_percent(0.0), "0.00");
    assert_eq!(format_percent(0.001), "0.00");
    assert_eq!(format_percent(-0.001), "0.00");
    assert_eq!(format_signed(1500.0), "+1 500.00");
    assert_eq!(format_signed(-20.0), "-20.00");
}

#[test]
fn delta_classification_follows_sign() {
    assert_eq!(DeltaClass::of(-20.0), DeltaClass::Loss);
    assert_eq!(DeltaClass::of(3.5), DeltaClass::Gain);
    assert_eq!(DeltaClass::of(0.0), DeltaClass::Neutral);
    assert_eq!(DeltaClass::of(-0.004), DeltaClass::Neutral);
}
