//! 결과 표시 형식. 질량/체적 소수 2자리(공백 천 단위 구분), 밀도 3자리,
//! 온도 1자리, 백분율 2자리(양수에 `+` 표시).

/// 표시 기준으로 0으로 보는 차이 크기.
const NEUTRAL_BAND: f64 = 0.005;

/// 구간 차이의 분류. 부호 규칙(`to - from`)을 그대로 따른다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaClass {
    Gain,
    Loss,
    Neutral,
}

impl DeltaClass {
    pub fn of(value: f64) -> Self {
        if value.abs() < NEUTRAL_BAND {
            DeltaClass::Neutral
        } else if value > 0.0 {
            DeltaClass::Gain
        } else {
            DeltaClass::Loss
        }
    }
}

/// 정수부에 공백 천 단위 구분자를 넣는다.
fn group_thousands(formatted: &str) -> String {
    let (sign, body) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (body, None),
    };
    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(*c);
    }
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// 반올림 결과가 0이면 `-0.00` 대신 `0.00`이 되도록 부호를 정리한다.
fn fixed(value: f64, decimals: usize) -> String {
    let s = format!("{value:.decimals$}");
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s[1..].to_string()
    } else {
        s
    }
}

pub fn format_mass(value: f64) -> String {
    group_thousands(&fixed(value, 2))
}

pub fn format_volume(value: f64) -> String {
    group_thousands(&fixed(value, 2))
}

pub fn format_density(value: f64) -> String {
    fixed(value, 3)
}

pub fn format_temperature(value: f64) -> String {
    fixed(value, 1)
}

pub fn format_percent(value: f64) -> String {
    let s = fixed(value, 2);
    if value > 0.0 && !s.chars().all(|c| c == '0' || c == '.') {
        format!("+{s}")
    } else {
        s
    }
}

/// 부호가 있는 질량/체적 차이.
pub fn format_signed(value: f64) -> String {
    let s = format_mass(value);
    if value > 0.0 && !s.chars().all(|c| c == '0' || c == '.') {
        format!("+{s}")
    } else {
        s
    }
}
