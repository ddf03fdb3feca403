use oil_calc_toolbox::config::{load_or_default, Config};
use oil_calc_toolbox::{DensityFrame, ProductClass};
use pretty_assertions::assert_eq;

#[test]
fn missing_config_is_written_with_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let cfg = load_or_default(&path).expect("load");
    assert_eq!(cfg, Config::default());
    assert!(path.exists());
    assert_eq!(cfg.language, "auto");
    assert_eq!(cfg.history_limit, Some(200));
    assert_eq!(cfg.log_level, "warn");
}

#[test]
fn partial_config_fills_missing_fields() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "language = \"ko\"\ndefault_product = \"crude\"\n").expect("write");
    let cfg = load_or_default(&path).expect("load");
    assert_eq!(cfg.language, "ko");
    assert_eq!(cfg.default_product, ProductClass::Crude);
    assert_eq!(cfg.default_density_frame, DensityFrame::At15);
    assert_eq!(cfg.history_limit, Some(200));
}

#[test]
fn saved_config_reloads_identically() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("config.toml");
    let cfg = Config {
        language: "en".into(),
        default_product: ProductClass::Crude,
        default_density_frame: DensityFrame::AtActualTemperature,
        data_dir: Some(dir.path().join("data")),
        locales_dir: Some(dir.path().join("locales")),
        history_limit: Some(10),
        log_level: "debug".into(),
    };
    cfg.save(&path).expect("save");
    let back = load_or_default(&path).expect("load");
    assert_eq!(back, cfg);
    assert_eq!(back.resolved_data_dir(), dir.path().join("data"));
}

#[test]
fn invalid_config_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "default_product = \"gasoline\"\n").expect("write");
    assert!(load_or_default(&path).is_err());
}
