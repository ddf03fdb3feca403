use oil_calc_toolbox::validation::{
    check_inputs, check_range, format_bound, parse_density, parse_mass, parse_number,
    parse_temperature, parse_volume, ValidationError,
};

#[test]
fn comma_decimal_separator_is_accepted() {
    assert_eq!(parse_number("0,845", "density"), Ok(0.845));
    assert_eq!(parse_number("  12.5 ", "mass"), Ok(12.5));
}

#[test]
fn empty_and_garbage_input_are_rejected() {
    assert_eq!(
        parse_number("   ", "mass"),
        Err(ValidationError::Empty("mass".into()))
    );
    assert_eq!(
        parse_number("abc", "mass"),
        Err(ValidationError::NotNumber("mass".into()))
    );
    assert_eq!(
        parse_number("inf", "mass"),
        Err(ValidationError::NotNumber("mass".into()))
    );
}

#[test]
fn density_must_be_in_working_range() {
    assert_eq!(parse_density("0.60", "density"), Ok(0.60));
    assert_eq!(parse_density("1.10", "density"), Ok(1.10));
    let err = parse_density("1.2", "density").unwrap_err();
    assert_eq!(
        err,
        ValidationError::OutOfRange {
            field: "density".into(),
            min: Some(0.60),
            max: Some(1.10),
        }
    );
    assert_eq!(
        err.to_string(),
        "field \"density\" must be in range 0.60 - 1.10"
    );
}

#[test]
fn temperature_range_is_inclusive() {
    assert_eq!(parse_temperature("-50", "t"), Ok(-50.0));
    assert_eq!(parse_temperature("80", "t"), Ok(80.0));
    let err = parse_temperature("-50.5", "t").unwrap_err();
    assert_eq!(err.to_string(), "field \"t\" must be in range -50 - 80");
}

#[test]
fn quantities_must_be_positive() {
    assert_eq!(parse_mass("1000", "mass"), Ok(1000.0));
    assert_eq!(parse_volume("1e6", "volume"), Ok(1_000_000.0));
    let err = parse_mass("0", "mass").unwrap_err();
    assert_eq!(err.field(), "mass");
    assert_eq!(err.to_string(), "field \"mass\" must be greater than 0");
    assert!(parse_volume("-1", "volume").is_err());
}

#[test]
fn open_ended_ranges() {
    assert_eq!(check_range(5.0, "x", None, Some(10.0)), Ok(5.0));
    let err = check_range(11.0, "x", None, Some(10.0)).unwrap_err();
    assert_eq!(err.to_string(), "field \"x\" must be at most 10");
    assert!(check_range(f64::NAN, "x", None, None).is_err());
}

#[test]
fn bounds_are_printed_compactly() {
    assert_eq!(format_bound(80.0), "80");
    assert_eq!(format_bound(-50.0), "-50");
    assert_eq!(format_bound(0.6), "0.60");
}

#[test]
fn numeric_inputs_are_checked_together() {
    assert!(check_inputs(1000.0, 0.85, 25.0).is_ok());
    assert_eq!(check_inputs(0.0, 0.85, 25.0).unwrap_err().field(), "quantity");
    assert_eq!(check_inputs(10.0, 0.3, 25.0).unwrap_err().field(), "density");
    assert_eq!(check_inputs(10.0, 0.85, 95.0).unwrap_err().field(), "temperature");
}
