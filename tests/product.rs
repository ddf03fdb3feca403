use std::str::FromStr;

use oil_calc_toolbox::{DensityFrame, ProductClass};

#[test]
fn product_class_aliases() {
    assert_eq!(ProductClass::from_str("Refined"), Ok(ProductClass::Refined));
    assert_eq!(ProductClass::from_str("54b"), Ok(ProductClass::Refined));
    assert_eq!(ProductClass::from_str(" crude "), Ok(ProductClass::Crude));
    assert_eq!(ProductClass::from_str("54A"), Ok(ProductClass::Crude));
    assert!(ProductClass::from_str("lpg").is_err());
    assert_eq!(ProductClass::default(), ProductClass::Refined);
}

#[test]
fn density_frame_aliases() {
    assert_eq!(DensityFrame::from_str("at15"), Ok(DensityFrame::At15));
    assert_eq!(DensityFrame::from_str("15"), Ok(DensityFrame::At15));
    assert_eq!(DensityFrame::from_str("actual"), Ok(DensityFrame::AtActualTemperature));
    assert_eq!(DensityFrame::from_str("rhoT"), Ok(DensityFrame::AtActualTemperature));
    assert!(DensityFrame::from_str("20").is_err());
}

#[test]
fn serde_codes_are_stable() {
    assert_eq!(serde_json::to_string(&ProductClass::Crude).expect("json"), "\"crude\"");
    assert_eq!(
        serde_json::to_string(&DensityFrame::AtActualTemperature).expect("json"),
        "\"at_actual_temperature\""
    );
}
