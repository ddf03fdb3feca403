use oil_calc_toolbox::i18n::{keys, resolve_language, Language, Translator};
use oil_calc_toolbox::validation::{parse_density, parse_mass};

#[test]
fn explicit_language_wins_over_config() {
    assert_eq!(resolve_language(Some("ko"), Some("en")), "ko");
    assert_eq!(resolve_language(Some("en-US"), Some("ko")), "en");
    assert_eq!(resolve_language(Some("auto"), Some("ko_KR")), "ko");
    assert_eq!(resolve_language(None, Some("ko")), "ko");
}

#[test]
fn unknown_codes_fall_back_to_english() {
    let tr = Translator::new("fr");
    assert_eq!(tr.language(), Language::En);
    assert_eq!(tr.language_code(), "en");
    assert_eq!(tr.t(keys::ERROR_PREFIX), "Error:");
}

#[test]
fn korean_strings_and_placeholders() {
    let tr = Translator::new("ko");
    assert_eq!(tr.t(keys::ERROR_PREFIX), "오류:");
    assert_eq!(tr.tf(keys::TRIP_POINT_HEADING, &[("n", "2")]), "\n[지점 2]");
}

#[test]
fn unknown_key_is_returned_verbatim() {
    let tr = Translator::new("en");
    assert_eq!(tr.t("no.such.key"), "no.such.key");
}

#[test]
fn validation_errors_are_localized() {
    let en = Translator::new("en");
    let ko = Translator::new("ko");
    let err = parse_density("1.5", "Density").unwrap_err();
    assert_eq!(
        en.validation_message(&err),
        "Field \"Density\" must be in range 0.60 - 1.10"
    );
    assert_eq!(
        ko.validation_message(&err),
        "\"Density\" 값은 0.60 - 1.10 범위여야 합니다"
    );

    let err = parse_mass("-3", "Mass").unwrap_err();
    assert_eq!(
        en.validation_message(&err),
        "Field \"Mass\" must be greater than 0"
    );
}

#[test]
fn override_pack_replaces_builtin_strings() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("en.toml"),
        "[general]\nerror_prefix = \"Failure:\"\n",
    )
    .expect("write");
    let tr = Translator::new_with_pack("en", Some(dir.path()));
    assert_eq!(tr.t(keys::ERROR_PREFIX), "Failure:");
    assert_eq!(tr.t(keys::APP_EXIT), Translator::new("en").t(keys::APP_EXIT));
}
