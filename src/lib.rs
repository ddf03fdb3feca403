//! 유류 질량/체적 환산 핵심 계산을 라이브러리로 분리하여 CLI 외 다른 화면에서도 재사용한다.
//!
//! 계산 코어는 [`density`], [`calculator`], [`trip`]이며 순수 함수만 제공한다.
//! 나머지 모듈은 입력 검증, 표시 형식, 저장, 설정, 다국어, CLI를 담당한다.

pub mod app;
pub mod calculator;
pub mod config;
pub mod density;
pub mod format;
pub mod i18n;
pub mod logging;
pub mod product;
pub mod store;
pub mod trip;
pub mod ui_cli;
pub mod validation;

pub use calculator::{ConversionDirection, ConversionResult};
pub use product::{DensityFrame, ProductClass};
pub use trip::{Delta, MeasurementPoint, PointResult, Segment, TripResult};
