//! 결과 표 출력과 `--point` 인자 해석 테스트.
use oil_calc_toolbox::app::AppError;
use oil_calc_toolbox::calculator::{mass_to_volume, volume_to_mass};
use oil_calc_toolbox::i18n::{keys, Translator};
use oil_calc_toolbox::store::{HistoryEntry, HistoryStore};
use oil_calc_toolbox::trip::calculate;
use oil_calc_toolbox::ui_cli::{
    conversion_parameters, parse_point_arg, render_conversion, render_history_entry,
    render_history_list, render_trip, trip_parameters,
};
use oil_calc_toolbox::validation::ValidationError;
use oil_calc_toolbox::{DensityFrame, MeasurementPoint, ProductClass};

fn losing_route() -> Vec<MeasurementPoint> {
    vec![
        MeasurementPoint::new("A", 1000.0, 0.85, 20.0, DensityFrame::AtActualTemperature),
        MeasurementPoint::new("B", 990.0, 0.85, 20.0, DensityFrame::AtActualTemperature),
    ]
}

fn delta_rows(out: &str) -> Vec<&str> {
    out.lines().filter(|l| l.trim_start().starts_with('Δ')).collect()
}

#[test]
fn losing_trip_marks_every_delta_row_as_loss() {
    let tr = Translator::new("en");
    let out = render_trip(&tr, &calculate(&losing_route(), ProductClass::Refined));

    assert!(out.contains("1. A:"), "{out}");
    assert!(out.contains("2. B:"), "{out}");
    assert!(out.contains(&tr.t(keys::TRIP_SEGMENTS)), "{out}");
    assert!(out.contains(&tr.t(keys::TRIP_TOTAL)), "{out}");
    assert!(out.contains("A → B"), "{out}");

    // 구간 3행 + 전체 3행
    let rows = delta_rows(&out);
    assert_eq!(rows.len(), 6, "{out}");
    for row in rows {
        assert!(row.contains(&tr.t(keys::DELTA_LOSS)), "row without loss mark: {row}");
    }
    assert!(out.contains("-10.00 kg"), "{out}");
    assert!(out.contains("-1.00 %"), "{out}");
}

#[test]
fn gaining_trip_is_marked_as_gain() {
    let tr = Translator::new("en");
    let mut points = losing_route();
    points.reverse();
    let out = render_trip(&tr, &calculate(&points, ProductClass::Crude));
    for row in delta_rows(&out) {
        assert!(row.contains(&tr.t(keys::DELTA_GAIN)), "{row}");
    }
}

#[test]
fn single_point_trip_prints_notice_without_segments() {
    let tr = Translator::new("en");
    let out = render_trip(&tr, &calculate(&losing_route()[..1], ProductClass::Refined));
    assert!(out.contains("At least two points are needed to compare."), "{out}");
    assert!(!out.contains(&tr.t(keys::TRIP_SEGMENTS)), "{out}");
    assert!(delta_rows(&out).is_empty(), "{out}");
    assert!(out.contains("1. A:"), "{out}");
}

#[test]
fn conversion_table_title_names_the_quantity() {
    let tr = Translator::new("en");
    let m2v = mass_to_volume(1000.0, 0.85, 25.0, DensityFrame::At15, ProductClass::Refined);
    let out = render_conversion(&tr, &m2v);
    assert_eq!(out.lines().next(), Some("Volume"));
    assert!(out.contains(&tr.t(keys::RESULT_AT15)));
    assert!(out.contains(&tr.t(keys::RESULT_AT_ACTUAL)));
    assert!(out.contains("1 176.47 L"), "{out}");

    let v2m = volume_to_mass(1000.0, 0.85, 15.0, DensityFrame::At15, ProductClass::Refined);
    let out = render_conversion(&tr, &v2m);
    assert_eq!(out.lines().next(), Some("Mass"));
    assert!(out.contains("850.00 kg"), "{out}");
}

#[test]
fn history_entry_shows_its_parameters() {
    let tr = Translator::new("en");
    let points = losing_route();
    let entry = HistoryEntry::trip(
        calculate(&points, ProductClass::Refined),
        trip_parameters(&points, ProductClass::Refined),
    );
    let out = render_history_entry(&tr, &entry);
    assert!(out.contains(&entry.id.to_string()), "{out}");
    assert!(out.contains("route = A → B"), "{out}");
    assert!(out.contains("points = 2"), "{out}");
    assert!(out.contains("product = refined"), "{out}");
    assert!(out.contains(&tr.t(keys::TRIP_TOTAL)), "{out}");
}

#[test]
fn history_list_summarises_mass_results_in_kg() {
    let tr = Translator::new("en");
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = HistoryStore::open(dir.path(), None).expect("open");
    let result = volume_to_mass(20_000.0, 0.85, 15.0, DensityFrame::At15, ProductClass::Refined);
    let params = conversion_parameters(20_000.0, 0.85, 15.0, DensityFrame::At15, ProductClass::Refined);
    store.add(HistoryEntry::conversion(result, params)).expect("add");

    let out = render_history_list(&tr, &store);
    assert!(out.starts_with("  1) "), "{out}");
    assert!(out.contains("Conversion: 17 000.00 kg / 17 000.00 kg"), "{out}");
}

#[test]
fn point_arg_without_frame_uses_default() {
    let p = parse_point_arg("Ulsan:25000:0,842:-5", DensityFrame::AtActualTemperature)
        .expect("point");
    assert_eq!(p.name, "Ulsan");
    assert_eq!(p.mass_kg, 25_000.0);
    assert_eq!(p.density, 0.842);
    assert_eq!(p.temperature_c, -5.0);
    assert_eq!(p.density_frame, DensityFrame::AtActualTemperature);

    let p = parse_point_arg("Busan:100:0.85:20:at15", DensityFrame::AtActualTemperature)
        .expect("point");
    assert_eq!(p.density_frame, DensityFrame::At15);
}

#[test]
fn point_arg_with_wrong_field_count_is_rejected() {
    let err = parse_point_arg("A:1000:0.85", DensityFrame::At15).unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)), "{err}");
    let err = parse_point_arg("A:1000:0.85:20:at15:x", DensityFrame::At15).unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)), "{err}");
}

#[test]
fn point_arg_with_bad_values_reports_the_cause() {
    let err = parse_point_arg("A:1000:1.5:20", DensityFrame::At15).unwrap_err();
    match err {
        AppError::Validation(ValidationError::OutOfRange { field, min, max }) => {
            assert_eq!(field, "density");
            assert_eq!(min, Some(0.60));
            assert_eq!(max, Some(1.10));
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = parse_point_arg("A:0:0.85:20", DensityFrame::At15).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "{err}");

    let err = parse_point_arg("A:1000:0.85:20:hot", DensityFrame::At15).unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)), "{err}");
}
