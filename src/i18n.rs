use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

use crate::validation::{format_bound, ValidationError};

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const YES_NO_HINT: &str = "general.yes_no_hint";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_MASS_TO_VOLUME: &str = "main_menu.mass_to_volume";
    pub const MAIN_MENU_VOLUME_TO_MASS: &str = "main_menu.volume_to_mass";
    pub const MAIN_MENU_TRIP: &str = "main_menu.trip";
    pub const MAIN_MENU_HISTORY: &str = "main_menu.history";
    pub const MAIN_MENU_TEMPLATES: &str = "main_menu.templates";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const PRODUCT_OPTIONS: &str = "product.options";
    pub const PRODUCT_REFINED: &str = "product.refined";
    pub const PRODUCT_CRUDE: &str = "product.crude";
    pub const FRAME_OPTIONS: &str = "frame.options";
    pub const FRAME_AT15: &str = "frame.at15";
    pub const FRAME_ACTUAL: &str = "frame.actual";

    pub const FIELD_MASS: &str = "field.mass";
    pub const FIELD_VOLUME: &str = "field.volume";
    pub const FIELD_DENSITY: &str = "field.density";
    pub const FIELD_TEMPERATURE: &str = "field.temperature";
    pub const FIELD_POINT_NAME: &str = "field.point_name";

    pub const CONVERSION_HEADING_MASS: &str = "conversion.heading_mass";
    pub const CONVERSION_HEADING_VOLUME: &str = "conversion.heading_volume";

    pub const RESULT_AT15: &str = "result.at15";
    pub const RESULT_AT_ACTUAL: &str = "result.at_actual";
    pub const RESULT_DIFFERENCE: &str = "result.difference";
    pub const RESULT_PERCENT_DIFFERENCE: &str = "result.percent_difference";
    pub const RESULT_DENSITY15: &str = "result.density15";
    pub const RESULT_DENSITY_ACTUAL: &str = "result.density_actual";
    pub const RESULT_MASS: &str = "result.mass";
    pub const RESULT_VOLUME: &str = "result.volume";
    pub const RESULT_VOLUME15: &str = "result.volume15";
    pub const RESULT_VOLUME_ACTUAL: &str = "result.volume_actual";
    pub const RESULT_TEMPERATURE: &str = "result.temperature";

    pub const PROMPT_SAVE_HISTORY: &str = "prompt.save_history";
    pub const HISTORY_SAVED: &str = "history.saved";

    pub const TRIP_HEADING: &str = "trip.heading";
    pub const TRIP_POINT_HEADING: &str = "trip.point_heading";
    pub const TRIP_DEFAULT_POINT_NAME: &str = "trip.default_point_name";
    pub const TRIP_PROMPT_MORE: &str = "trip.prompt_more";
    pub const TRIP_POINTS: &str = "trip.points";
    pub const TRIP_SEGMENTS: &str = "trip.segments";
    pub const TRIP_TOTAL: &str = "trip.total";
    pub const TRIP_NOT_ENOUGH_POINTS: &str = "trip.not_enough_points";
    pub const TRIP_PROMPT_TEMPLATE: &str = "trip.prompt_template";
    pub const TRIP_PROMPT_SAVE_TEMPLATE: &str = "trip.prompt_save_template";
    pub const DELTA_GAIN: &str = "delta.gain";
    pub const DELTA_LOSS: &str = "delta.loss";
    pub const DELTA_NEUTRAL: &str = "delta.neutral";

    pub const HISTORY_HEADING: &str = "history.heading";
    pub const HISTORY_EMPTY: &str = "history.empty";
    pub const HISTORY_OPTIONS: &str = "history.options";
    pub const HISTORY_DELETED: &str = "history.deleted";
    pub const HISTORY_CLEARED: &str = "history.cleared";
    pub const HISTORY_NOT_FOUND: &str = "history.not_found";
    pub const HISTORY_KIND_CONVERSION: &str = "history.kind_conversion";
    pub const HISTORY_KIND_TRIP: &str = "history.kind_trip";

    pub const TEMPLATES_HEADING: &str = "templates.heading";
    pub const TEMPLATES_EMPTY: &str = "templates.empty";
    pub const TEMPLATES_OPTIONS: &str = "templates.options";
    pub const TEMPLATE_SAVED: &str = "templates.saved";
    pub const TEMPLATE_DELETED: &str = "templates.deleted";
    pub const TEMPLATE_NOT_FOUND: &str = "templates.not_found";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT: &str = "settings.current";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_PROMPT_HISTORY_LIMIT: &str = "settings.prompt_history_limit";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const VALIDATION_EMPTY: &str = "validation.empty";
    pub const VALIDATION_NOT_NUMBER: &str = "validation.not_number";
    pub const VALIDATION_OUT_OF_RANGE: &str = "validation.out_of_range";
    pub const VALIDATION_OUT_OF_RANGE_MIN: &str = "validation.out_of_range_min";
    pub const VALIDATION_OUT_OF_RANGE_MAX: &str = "validation.out_of_range_max";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다. 전역 상태 없이 값으로 넘겨 쓴다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&Path>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides(Path::new("locales"), lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 언어팩 → 현재 언어 → 영어 순으로 찾고, 없으면 키를 그대로 돌려준다.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.clone();
        }
        let builtin = match self.lang {
            Language::Ko => ko(key).or_else(|| en(key)),
            Language::En => en(key),
        };
        builtin.unwrap_or(key).to_string()
    }

    /// `{name}` 형태의 자리표시자를 채운다.
    pub fn tf(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut s = self.t(key);
        for (name, value) in args {
            s = s.replace(&format!("{{{name}}}"), value);
        }
        s
    }

    /// 검증 오류를 현재 언어 메시지로 바꾼다.
    pub fn validation_message(&self, err: &ValidationError) -> String {
        let field = err.field();
        match err {
            ValidationError::Empty(_) => self.tf(keys::VALIDATION_EMPTY, &[("field", field)]),
            ValidationError::NotNumber(_) => {
                self.tf(keys::VALIDATION_NOT_NUMBER, &[("field", field)])
            }
            ValidationError::OutOfRange { min, max, .. } => {
                let lo = min.map(format_bound).unwrap_or_default();
                let hi = max.map(format_bound).unwrap_or_default();
                let key = match (min, max) {
                    (Some(_), Some(_)) => keys::VALIDATION_OUT_OF_RANGE,
                    (Some(_), None) => keys::VALIDATION_OUT_OF_RANGE_MIN,
                    (None, Some(_)) => keys::VALIDATION_OUT_OF_RANGE_MAX,
                    (None, None) => return err.to_string(),
                };
                self.tf(
                    key,
                    &[("field", field), ("min", lo.as_str()), ("max", hi.as_str())],
                )
            }
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 테이블은 `a.b` 형태의 점 키로 펼친다.
fn load_overrides(dir: &Path, lang: &str) -> Option<HashMap<String, String>> {
    let path = dir.join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

pub(crate) fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error:",
        APP_EXIT => "Exiting.",
        YES_NO_HINT => "(y/N)",
        MAIN_MENU_TITLE => "\n=== Oil Calc Toolbox ===",
        MAIN_MENU_MASS_TO_VOLUME => "1) Mass → Volume",
        MAIN_MENU_VOLUME_TO_MASS => "2) Volume → Mass",
        MAIN_MENU_TRIP => "3) Trip loss analysis",
        MAIN_MENU_HISTORY => "4) History",
        MAIN_MENU_TEMPLATES => "5) Route templates",
        MAIN_MENU_SETTINGS => "6) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please choose again.",
        PRODUCT_OPTIONS => "Product: 1=Refined (54B) 2=Crude (54A) [enter = {current}]: ",
        PRODUCT_REFINED => "Refined products",
        PRODUCT_CRUDE => "Crude oil",
        FRAME_OPTIONS => "Density given: 1=at 15°C 2=at actual T [enter = {current}]: ",
        FRAME_AT15 => "Density at 15°C",
        FRAME_ACTUAL => "Density at actual T",
        FIELD_MASS => "Mass (kg)",
        FIELD_VOLUME => "Volume (L)",
        FIELD_DENSITY => "Density (kg/L)",
        FIELD_TEMPERATURE => "Temperature (°C)",
        FIELD_POINT_NAME => "Point name",
        CONVERSION_HEADING_MASS => "\n-- Mass → Volume --",
        CONVERSION_HEADING_VOLUME => "\n-- Volume → Mass --",
        RESULT_AT15 => "at 15°C",
        RESULT_AT_ACTUAL => "at actual T",
        RESULT_DIFFERENCE => "Difference",
        RESULT_PERCENT_DIFFERENCE => "Difference %",
        RESULT_DENSITY15 => "Density 15°C",
        RESULT_DENSITY_ACTUAL => "Density T",
        RESULT_MASS => "Mass",
        RESULT_VOLUME => "Volume",
        RESULT_VOLUME15 => "Volume 15°C",
        RESULT_VOLUME_ACTUAL => "Volume T",
        RESULT_TEMPERATURE => "Temperature",
        PROMPT_SAVE_HISTORY => "Save to history? ",
        HISTORY_SAVED => "Saved to history.",
        TRIP_HEADING => "\n-- Trip loss analysis --",
        TRIP_POINT_HEADING => "\n[Point {n}]",
        TRIP_DEFAULT_POINT_NAME => "Point {n}",
        TRIP_PROMPT_MORE => "Add another point? ",
        TRIP_POINTS => "Points:",
        TRIP_SEGMENTS => "Segments:",
        TRIP_TOTAL => "Total (first → last):",
        TRIP_NOT_ENOUGH_POINTS => "At least two points are needed to compare.",
        TRIP_PROMPT_TEMPLATE => "Template name to load (enter to skip): ",
        TRIP_PROMPT_SAVE_TEMPLATE => "Save route as template, name (enter to skip): ",
        DELTA_GAIN => "gain",
        DELTA_LOSS => "loss",
        DELTA_NEUTRAL => "no change",
        HISTORY_HEADING => "\n-- History --",
        HISTORY_EMPTY => "History is empty.",
        HISTORY_OPTIONS => "<n>=show  d <n>=delete  c=clear all  enter=back: ",
        HISTORY_DELETED => "Entry deleted.",
        HISTORY_CLEARED => "History cleared.",
        HISTORY_NOT_FOUND => "No such history entry.",
        HISTORY_KIND_CONVERSION => "Conversion",
        HISTORY_KIND_TRIP => "Trip loss",
        TEMPLATES_HEADING => "\n-- Route templates --",
        TEMPLATES_EMPTY => "No templates saved.",
        TEMPLATES_OPTIONS => "d <n>=delete  enter=back: ",
        TEMPLATE_SAVED => "Template saved.",
        TEMPLATE_DELETED => "Template deleted.",
        TEMPLATE_NOT_FOUND => "Template not found.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT => "Language: {lang}, product: {product}, density: {frame}, history limit: {limit}",
        SETTINGS_OPTIONS => "1) Language  2) Default product  3) Default density  4) History limit  enter=back",
        SETTINGS_PROMPT_LANGUAGE => "Language (auto/ko/en): ",
        SETTINGS_PROMPT_HISTORY_LIMIT => "History limit (0 = unlimited): ",
        SETTINGS_SAVED => "Settings saved.",
        VALIDATION_EMPTY => "Field \"{field}\" is empty",
        VALIDATION_NOT_NUMBER => "Field \"{field}\" contains an invalid number",
        VALIDATION_OUT_OF_RANGE => "Field \"{field}\" must be in range {min} - {max}",
        VALIDATION_OUT_OF_RANGE_MIN => "Field \"{field}\" must be greater than {min}",
        VALIDATION_OUT_OF_RANGE_MAX => "Field \"{field}\" must be at most {max}",
        _ => return None,
    })
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류:",
        APP_EXIT => "프로그램을 종료합니다.",
        YES_NO_HINT => "(y/N)",
        MAIN_MENU_TITLE => "\n=== 유류 환산 계산기 ===",
        MAIN_MENU_MASS_TO_VOLUME => "1) 질량 → 체적",
        MAIN_MENU_VOLUME_TO_MASS => "2) 체적 → 질량",
        MAIN_MENU_TRIP => "3) 운송 손실 분석",
        MAIN_MENU_HISTORY => "4) 계산 이력",
        MAIN_MENU_TEMPLATES => "5) 경로 템플릿",
        MAIN_MENU_SETTINGS => "6) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        PRODUCT_OPTIONS => "제품: 1=정제유(54B) 2=원유(54A) [엔터 = {current}]: ",
        PRODUCT_REFINED => "정제유",
        PRODUCT_CRUDE => "원유",
        FRAME_OPTIONS => "입력 밀도 기준: 1=15°C 2=실측 온도 [엔터 = {current}]: ",
        FRAME_AT15 => "15°C 밀도",
        FRAME_ACTUAL => "실측 온도 밀도",
        FIELD_MASS => "질량 (kg)",
        FIELD_VOLUME => "체적 (L)",
        FIELD_DENSITY => "밀도 (kg/L)",
        FIELD_TEMPERATURE => "온도 (°C)",
        FIELD_POINT_NAME => "지점 이름",
        CONVERSION_HEADING_MASS => "\n-- 질량 → 체적 --",
        CONVERSION_HEADING_VOLUME => "\n-- 체적 → 질량 --",
        RESULT_AT15 => "15°C 기준",
        RESULT_AT_ACTUAL => "실측 온도 기준",
        RESULT_DIFFERENCE => "차이",
        RESULT_PERCENT_DIFFERENCE => "차이 %",
        RESULT_DENSITY15 => "15°C 밀도",
        RESULT_DENSITY_ACTUAL => "실측 밀도",
        RESULT_MASS => "질량",
        RESULT_VOLUME => "체적",
        RESULT_VOLUME15 => "15°C 체적",
        RESULT_VOLUME_ACTUAL => "실측 체적",
        RESULT_TEMPERATURE => "온도",
        PROMPT_SAVE_HISTORY => "이력에 저장할까요? ",
        HISTORY_SAVED => "이력에 저장했습니다.",
        TRIP_HEADING => "\n-- 운송 손실 분석 --",
        TRIP_POINT_HEADING => "\n[지점 {n}]",
        TRIP_DEFAULT_POINT_NAME => "지점 {n}",
        TRIP_PROMPT_MORE => "지점을 더 추가할까요? ",
        TRIP_POINTS => "지점:",
        TRIP_SEGMENTS => "구간:",
        TRIP_TOTAL => "전체 (처음 → 마지막):",
        TRIP_NOT_ENOUGH_POINTS => "비교하려면 지점이 2개 이상 필요합니다.",
        TRIP_PROMPT_TEMPLATE => "불러올 템플릿 이름 (건너뛰려면 엔터): ",
        TRIP_PROMPT_SAVE_TEMPLATE => "경로를 템플릿으로 저장, 이름 (건너뛰려면 엔터): ",
        DELTA_GAIN => "증가",
        DELTA_LOSS => "손실",
        DELTA_NEUTRAL => "변화 없음",
        HISTORY_HEADING => "\n-- 계산 이력 --",
        HISTORY_EMPTY => "이력이 비어 있습니다.",
        HISTORY_OPTIONS => "<번호>=보기  d <번호>=삭제  c=전체 삭제  엔터=뒤로: ",
        HISTORY_DELETED => "삭제했습니다.",
        HISTORY_CLEARED => "이력을 모두 지웠습니다.",
        HISTORY_NOT_FOUND => "해당 이력이 없습니다.",
        HISTORY_KIND_CONVERSION => "환산",
        HISTORY_KIND_TRIP => "운송 손실",
        TEMPLATES_HEADING => "\n-- 경로 템플릿 --",
        TEMPLATES_EMPTY => "저장된 템플릿이 없습니다.",
        TEMPLATES_OPTIONS => "d <번호>=삭제  엔터=뒤로: ",
        TEMPLATE_SAVED => "템플릿을 저장했습니다.",
        TEMPLATE_DELETED => "템플릿을 삭제했습니다.",
        TEMPLATE_NOT_FOUND => "템플릿을 찾을 수 없습니다.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT => "언어: {lang}, 제품: {product}, 밀도 기준: {frame}, 이력 한도: {limit}",
        SETTINGS_OPTIONS => "1) 언어  2) 기본 제품  3) 기본 밀도 기준  4) 이력 한도  엔터=뒤로",
        SETTINGS_PROMPT_LANGUAGE => "언어 (auto/ko/en): ",
        SETTINGS_PROMPT_HISTORY_LIMIT => "이력 한도 (0 = 무제한): ",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        VALIDATION_EMPTY => "\"{field}\" 항목이 비어 있습니다",
        VALIDATION_NOT_NUMBER => "\"{field}\" 항목이 올바른 숫자가 아닙니다",
        VALIDATION_OUT_OF_RANGE => "\"{field}\" 값은 {min} - {max} 범위여야 합니다",
        VALIDATION_OUT_OF_RANGE_MIN => "\"{field}\" 값은 {min}보다 커야 합니다",
        VALIDATION_OUT_OF_RANGE_MAX => "\"{field}\" 값은 {max} 이하여야 합니다",
        _ => return None,
    })
}
