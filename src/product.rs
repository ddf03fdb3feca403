use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 제품 분류. 열팽창 계수 K0 선택에 사용한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductClass {
    /// 정제유 (Table 54B)
    #[default]
    Refined,
    /// 원유 (Table 54A)
    Crude,
}

impl ProductClass {
    pub const ALL: [ProductClass; 2] = [ProductClass::Refined, ProductClass::Crude];

    pub fn as_code(&self) -> &'static str {
        match self {
            ProductClass::Refined => "refined",
            ProductClass::Crude => "crude",
        }
    }
}

impl fmt::Display for ProductClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

impl FromStr for ProductClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "refined" | "r" | "54b" => Ok(ProductClass::Refined),
            "crude" | "c" | "54a" => Ok(ProductClass::Crude),
            other => Err(format!("unknown product class: {other}")),
        }
    }
}

/// 입력 밀도가 어느 온도 기준인지 표시한다. 나머지 하나는 항상 계산으로 얻는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DensityFrame {
    /// 15°C 기준 밀도(ρ15)
    #[default]
    At15,
    /// 실측 온도 기준 밀도(ρT)
    AtActualTemperature,
}

impl DensityFrame {
    pub fn as_code(&self) -> &'static str {
        match self {
            DensityFrame::At15 => "at15",
            DensityFrame::AtActualTemperature => "actual",
        }
    }

    /// 화면 표시용 약어.
    pub fn symbol(&self) -> &'static str {
        match self {
            DensityFrame::At15 => "ρ15",
            DensityFrame::AtActualTemperature => "ρT",
        }
    }
}

impl fmt::Display for DensityFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

impl FromStr for DensityFrame {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "at15" | "15" | "rho15" => Ok(DensityFrame::At15),
            "actual" | "t" | "at_t" | "rhot" => Ok(DensityFrame::AtActualTemperature),
            other => Err(format!("unknown density frame: {other}")),
        }
    }
}
