//! 입력 문자열 검증. 계산 코어에 넘기기 전에 숫자 파싱과 범위 검사를 끝낸다.
//! 소수점 구분자로 `,`도 허용한다.

use thiserror::Error;

/// 허용 밀도 범위 [kg/L]
pub const DENSITY_RANGE: (f64, f64) = (0.60, 1.10);
/// 허용 온도 범위 [°C]
pub const TEMPERATURE_RANGE: (f64, f64) = (-50.0, 80.0);

/// 입력 검증 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("field \"{0}\" is empty")]
    Empty(String),

    #[error("field \"{0}\" contains an invalid number")]
    NotNumber(String),

    #[error("field \"{field}\" {}", describe_range(.min, .max))]
    OutOfRange {
        field: String,
        min: Option<f64>,
        max: Option<f64>,
    },
}

impl ValidationError {
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Empty(f) | ValidationError::NotNumber(f) => f,
            ValidationError::OutOfRange { field, .. } => field,
        }
    }
}

/// 정수면 소수점 없이, 아니면 두 자리로 표시한다.
pub fn format_bound(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn describe_range(min: &Option<f64>, max: &Option<f64>) -> String {
    match (*min, *max) {
        (Some(lo), Some(hi)) => format!(
            "must be in range {} - {}",
            format_bound(lo),
            format_bound(hi)
        ),
        (Some(lo), None) => format!("must be greater than {}", format_bound(lo)),
        (None, Some(hi)) => format!("must be at most {}", format_bound(hi)),
        (None, None) => "is out of range".to_string(),
    }
}

/// 문자열을 숫자로 파싱한다.
pub fn parse_number(text: &str, field: &str) -> Result<f64, ValidationError> {
    let clean = text.trim().replace(',', ".");
    if clean.is_empty() {
        return Err(ValidationError::Empty(field.to_string()));
    }
    match clean.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ValidationError::NotNumber(field.to_string())),
    }
}

/// 숫자 파싱 후 [min, max] 범위를 검사한다. `None`은 제한 없음.
pub fn parse_in_range(
    text: &str,
    field: &str,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<f64, ValidationError> {
    let value = parse_number(text, field)?;
    check_range(value, field, min, max)
}

/// 이미 숫자로 받은 값의 범위를 검사한다.
pub fn check_range(
    value: f64,
    field: &str,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<f64, ValidationError> {
    let below = min.is_some_and(|lo| value < lo);
    let above = max.is_some_and(|hi| value > hi);
    if below || above || !value.is_finite() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min,
            max,
        });
    }
    Ok(value)
}

pub fn parse_density(text: &str, field: &str) -> Result<f64, ValidationError> {
    parse_in_range(text, field, Some(DENSITY_RANGE.0), Some(DENSITY_RANGE.1))
}

pub fn parse_temperature(text: &str, field: &str) -> Result<f64, ValidationError> {
    parse_in_range(
        text,
        field,
        Some(TEMPERATURE_RANGE.0),
        Some(TEMPERATURE_RANGE.1),
    )
}

fn parse_positive(text: &str, field: &str) -> Result<f64, ValidationError> {
    let value = parse_number(text, field)?;
    check_positive(value, field)
}

fn check_positive(value: f64, field: &str) -> Result<f64, ValidationError> {
    if value <= 0.0 || !value.is_finite() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: Some(0.0),
            max: None,
        });
    }
    Ok(value)
}

/// 질량은 양수만 허용한다. 상한은 없다.
pub fn parse_mass(text: &str, field: &str) -> Result<f64, ValidationError> {
    parse_positive(text, field)
}

/// 체적은 양수만 허용한다. 상한은 없다.
pub fn parse_volume(text: &str, field: &str) -> Result<f64, ValidationError> {
    parse_positive(text, field)
}

/// 숫자로 받은 한 건의 입력(수량, 밀도, 온도)을 한꺼번에 검사한다. CLI 플래그 입력용.
pub fn check_inputs(
    quantity: f64,
    density: f64,
    temperature_c: f64,
) -> Result<(), ValidationError> {
    check_positive(quantity, "quantity")?;
    check_range(
        density,
        "density",
        Some(DENSITY_RANGE.0),
        Some(DENSITY_RANGE.1),
    )?;
    check_range(
        temperature_c,
        "temperature",
        Some(TEMPERATURE_RANGE.0),
        Some(TEMPERATURE_RANGE.1),
    )?;
    Ok(())
}
