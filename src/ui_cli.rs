use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::{self, Write};
use std::str::FromStr;

use crate::app::{AppContext, AppError};
use crate::calculator::{self, ConversionDirection, ConversionResult};
use crate::format::{
    format_density, format_mass, format_percent, format_signed, format_temperature,
    format_volume, DeltaClass,
};
use crate::i18n::{keys, Translator};
use crate::product::{DensityFrame, ProductClass};
use crate::store::{CalculationKind, HistoryEntry, HistoryStore, TripTemplate};
use crate::trip::{self, Delta, MeasurementPoint, TripResult};
use crate::validation::{self, ValidationError};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    MassToVolume,
    VolumeToMass,
    TripLoss,
    History,
    Templates,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_MASS_TO_VOLUME,
        keys::MAIN_MENU_VOLUME_TO_MASS,
        keys::MAIN_MENU_TRIP,
        keys::MAIN_MENU_HISTORY,
        keys::MAIN_MENU_TEMPLATES,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::MassToVolume),
            "2" => return Ok(MenuChoice::VolumeToMass),
            "3" => return Ok(MenuChoice::TripLoss),
            "4" => return Ok(MenuChoice::History),
            "5" => return Ok(MenuChoice::Templates),
            "6" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 질량 → 체적 메뉴를 처리한다.
pub fn handle_mass_to_volume(ctx: &mut AppContext) -> Result<(), AppError> {
    handle_conversion(ctx, ConversionDirection::MassToVolume)
}

/// 체적 → 질량 메뉴를 처리한다.
pub fn handle_volume_to_mass(ctx: &mut AppContext) -> Result<(), AppError> {
    handle_conversion(ctx, ConversionDirection::VolumeToMass)
}

fn handle_conversion(ctx: &mut AppContext, direction: ConversionDirection) -> Result<(), AppError> {
    let tr = &ctx.tr;
    let heading = match direction {
        ConversionDirection::MassToVolume => keys::CONVERSION_HEADING_MASS,
        ConversionDirection::VolumeToMass => keys::CONVERSION_HEADING_VOLUME,
    };
    println!("{}", tr.t(heading));
    let product = read_product(tr, ctx.config.default_product)?;
    let frame = read_frame(tr, ctx.config.default_density_frame)?;
    let value = match direction {
        ConversionDirection::MassToVolume => {
            read_validated(tr, keys::FIELD_MASS, validation::parse_mass)?
        }
        ConversionDirection::VolumeToMass => {
            read_validated(tr, keys::FIELD_VOLUME, validation::parse_volume)?
        }
    };
    let density = read_validated(tr, keys::FIELD_DENSITY, validation::parse_density)?;
    let temperature = read_validated(tr, keys::FIELD_TEMPERATURE, validation::parse_temperature)?;

    let result = calculator::convert(direction, value, density, temperature, frame, product);
    print!("{}", render_conversion(tr, &result));

    if read_yes_no(tr, keys::PROMPT_SAVE_HISTORY)? {
        let params = conversion_parameters(value, density, temperature, frame, product);
        ctx.history.add(HistoryEntry::conversion(result, params))?;
        println!("{}", ctx.tr.t(keys::HISTORY_SAVED));
    }
    Ok(())
}

/// 이력 표시용 입력 파라미터.
pub fn conversion_parameters(
    value: f64,
    density: f64,
    temperature_c: f64,
    frame: DensityFrame,
    product: ProductClass,
) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("value".to_string(), value.to_string()),
        ("density".to_string(), density.to_string()),
        ("temperature".to_string(), temperature_c.to_string()),
        ("frame".to_string(), frame.to_string()),
        ("product".to_string(), product.to_string()),
    ])
}

/// 운송 손실 분석 메뉴를 처리한다.
pub fn handle_trip_loss(ctx: &mut AppContext) -> Result<(), AppError> {
    let tr = ctx.tr.clone();
    println!("{}", tr.t(keys::TRIP_HEADING));

    let template = if ctx.templates.list().is_empty() {
        None
    } else {
        let names: Vec<&str> = ctx.templates.list().iter().map(|t| t.name.as_str()).collect();
        println!("[{}]", names.join(", "));
        let name = read_line(&tr.t(keys::TRIP_PROMPT_TEMPLATE))?;
        if name.trim().is_empty() {
            None
        } else {
            let found = ctx.templates.find_by_name(&name).cloned();
            if found.is_none() {
                println!("{}", tr.t(keys::TEMPLATE_NOT_FOUND));
            }
            found
        }
    };

    let product = match &template {
        Some(t) => t.product,
        None => read_product(&tr, ctx.config.default_product)?,
    };

    let mut points = Vec::new();
    match &template {
        Some(t) => {
            for (i, tp) in t.points.iter().enumerate() {
                let n = (i + 1).to_string();
                println!(
                    "{} {}",
                    tr.tf(keys::TRIP_POINT_HEADING, &[("n", n.as_str())]),
                    tp.name
                );
                points.push(read_point_values(&tr, tp.name.clone(), tp.density_frame)?);
            }
        }
        None => loop {
            let n = (points.len() + 1).to_string();
            println!("{}", tr.tf(keys::TRIP_POINT_HEADING, &[("n", n.as_str())]));
            let default_name = tr.tf(keys::TRIP_DEFAULT_POINT_NAME, &[("n", n.as_str())]);
            let name = read_line(&format!("{} [{default_name}]: ", tr.t(keys::FIELD_POINT_NAME)))?;
            let name = match name.trim() {
                "" => default_name,
                other => other.to_string(),
            };
            let frame = read_frame(&tr, ctx.config.default_density_frame)?;
            points.push(read_point_values(&tr, name, frame)?);
            if points.len() >= 2 && !read_yes_no(&tr, keys::TRIP_PROMPT_MORE)? {
                break;
            }
        },
    }

    let result = trip::calculate(&points, product);
    print!("{}", render_trip(&tr, &result));

    if read_yes_no(&tr, keys::PROMPT_SAVE_HISTORY)? {
        let params = trip_parameters(&points, product);
        ctx.history.add(HistoryEntry::trip(result, params))?;
        println!("{}", tr.t(keys::HISTORY_SAVED));
    }
    if template.is_none() {
        let name = read_line(&tr.t(keys::TRIP_PROMPT_SAVE_TEMPLATE))?;
        if !name.trim().is_empty() {
            ctx.templates
                .save(TripTemplate::from_points(name.trim(), product, &points))?;
            println!("{}", tr.t(keys::TEMPLATE_SAVED));
        }
    }
    Ok(())
}

fn read_point_values(
    tr: &Translator,
    name: String,
    frame: DensityFrame,
) -> Result<MeasurementPoint, AppError> {
    let mass = read_validated(tr, keys::FIELD_MASS, validation::parse_mass)?;
    let density = read_validated(tr, keys::FIELD_DENSITY, validation::parse_density)?;
    let temperature = read_validated(tr, keys::FIELD_TEMPERATURE, validation::parse_temperature)?;
    Ok(MeasurementPoint::new(name, mass, density, temperature, frame))
}

/// `--point`의 `name:mass:density:temperature[:frame]` 형식의 지점 인자를 해석한다. frame이 없으면 `default_frame`을 쓴다.
pub fn parse_point_arg(arg: &str, default_frame: DensityFrame) -> Result<MeasurementPoint, AppError> {
    let parts: Vec<&str> = arg.split(':').collect();
    if !(4..=5).contains(&parts.len()) {
        return Err(AppError::InvalidArgument(format!(
            "point must be name:mass:density:temperature[:frame], got {arg}"
        )));
    }
    let mass = validation::parse_mass(parts[1], "mass")?;
    let density = validation::parse_density(parts[2], "density")?;
    let temperature = validation::parse_temperature(parts[3], "temperature")?;
    let frame = match parts.get(4) {
        Some(f) => DensityFrame::from_str(f).map_err(AppError::InvalidArgument)?,
        None => default_frame,
    };
    Ok(MeasurementPoint::new(parts[0].trim(), mass, density, temperature, frame))
}

/// 이력 표시용 경로 파라미터.
pub fn trip_parameters(points: &[MeasurementPoint], product: ProductClass) -> BTreeMap<String, String> {
    let route = points
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(" → ");
    BTreeMap::from([
        ("product".to_string(), product.to_string()),
        ("points".to_string(), points.len().to_string()),
        ("route".to_string(), route),
    ])
}

/// 이력 메뉴를 처리한다.
pub fn handle_history(ctx: &mut AppContext) -> Result<(), AppError> {
    let tr = ctx.tr.clone();
    loop {
        println!("{}", tr.t(keys::HISTORY_HEADING));
        if ctx.history.is_empty() {
            println!("{}", tr.t(keys::HISTORY_EMPTY));
            return Ok(());
        }
        print!("{}", render_history_list(&tr, &ctx.history));
        let sel = read_line(&tr.t(keys::HISTORY_OPTIONS))?;
        let sel = sel.trim();
        if sel.is_empty() {
            return Ok(());
        }
        if sel.eq_ignore_ascii_case("c") {
            ctx.history.clear()?;
            println!("{}", tr.t(keys::HISTORY_CLEARED));
            return Ok(());
        }
        let (delete, index) = match sel.strip_prefix(['d', 'D']) {
            Some(rest) => (true, rest.trim()),
            None => (false, sel),
        };
        let entry = index
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| ctx.history.entries().get(i))
            .cloned();
        match entry {
            Some(entry) if delete => {
                ctx.history.remove(entry.id)?;
                println!("{}", tr.t(keys::HISTORY_DELETED));
            }
            Some(entry) => print!("{}", render_history_entry(&tr, &entry)),
            None => println!("{}", tr.t(keys::HISTORY_NOT_FOUND)),
        }
    }
}

/// 템플릿 메뉴를 처리한다.
pub fn handle_templates(ctx: &mut AppContext) -> Result<(), AppError> {
    let tr = ctx.tr.clone();
    loop {
        println!("{}", tr.t(keys::TEMPLATES_HEADING));
        if ctx.templates.list().is_empty() {
            println!("{}", tr.t(keys::TEMPLATES_EMPTY));
            return Ok(());
        }
        for (i, t) in ctx.templates.list().iter().enumerate() {
            let route = t
                .points
                .iter()
                .map(|p| format!("{} ({})", p.name, p.density_frame.symbol()))
                .collect::<Vec<_>>()
                .join(" → ");
            println!("{:>3}) {} [{}] {}", i + 1, t.name, product_label(&tr, t.product), route);
        }
        let sel = read_line(&tr.t(keys::TEMPLATES_OPTIONS))?;
        let sel = sel.trim();
        if sel.is_empty() {
            return Ok(());
        }
        let id = sel
            .strip_prefix(['d', 'D'])
            .and_then(|rest| rest.trim().parse::<usize>().ok())
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| ctx.templates.list().get(i))
            .map(|t| t.id);
        match id {
            Some(id) => {
                ctx.templates.delete(id)?;
                println!("{}", tr.t(keys::TEMPLATE_DELETED));
            }
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(ctx: &mut AppContext) -> Result<(), AppError> {
    let tr = ctx.tr.clone();
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    let limit = ctx
        .config
        .history_limit
        .map(|n| n.to_string())
        .unwrap_or_else(|| "∞".to_string());
    let product = product_label(&tr, ctx.config.default_product);
    let frame = frame_label(&tr, ctx.config.default_density_frame);
    println!(
        "{}",
        tr.tf(
            keys::SETTINGS_CURRENT,
            &[
                ("lang", ctx.config.language.as_str()),
                ("product", product.as_str()),
                ("frame", frame.as_str()),
                ("limit", limit.as_str()),
            ],
        )
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(&tr.t(keys::PROMPT_SELECT))?;
    match sel.trim() {
        "" => return Ok(()),
        "1" => {
            let lang = read_line(&tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
            match lang.trim().to_lowercase().as_str() {
                code @ ("auto" | "ko" | "en") => {
                    ctx.config.language = code.to_string();
                    ctx.reload_translator();
                }
                _ => {
                    println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
                    return Ok(());
                }
            }
        }
        "2" => ctx.config.default_product = read_product(&tr, ctx.config.default_product)?,
        "3" => {
            ctx.config.default_density_frame = read_frame(&tr, ctx.config.default_density_frame)?
        }
        "4" => {
            let text = read_line(&tr.t(keys::SETTINGS_PROMPT_HISTORY_LIMIT))?;
            match text.trim().parse::<usize>() {
                Ok(0) => ctx.config.history_limit = None,
                Ok(n) => ctx.config.history_limit = Some(n),
                Err(_) => {
                    println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
                    return Ok(());
                }
            }
            ctx.history = HistoryStore::open(ctx.config.resolved_data_dir(), ctx.config.history_limit)?;
        }
        _ => {
            println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
            return Ok(());
        }
    }
    println!("{}", ctx.tr.t(keys::SETTINGS_SAVED));
    Ok(())
}

pub fn product_label(tr: &Translator, product: ProductClass) -> String {
    match product {
        ProductClass::Refined => tr.t(keys::PRODUCT_REFINED),
        ProductClass::Crude => tr.t(keys::PRODUCT_CRUDE),
    }
}

pub fn frame_label(tr: &Translator, frame: DensityFrame) -> String {
    match frame {
        DensityFrame::At15 => tr.t(keys::FRAME_AT15),
        DensityFrame::AtActualTemperature => tr.t(keys::FRAME_ACTUAL),
    }
}

fn delta_label(tr: &Translator, value: f64) -> String {
    match DeltaClass::of(value) {
        DeltaClass::Gain => tr.t(keys::DELTA_GAIN),
        DeltaClass::Loss => tr.t(keys::DELTA_LOSS),
        DeltaClass::Neutral => tr.t(keys::DELTA_NEUTRAL),
    }
}

/// 이중 환산 결과를 표로 만든다.
pub fn render_conversion(tr: &Translator, result: &ConversionResult) -> String {
    let (label, unit) = match result.direction {
        ConversionDirection::MassToVolume => (tr.t(keys::RESULT_VOLUME), "L"),
        ConversionDirection::VolumeToMass => (tr.t(keys::RESULT_MASS), "kg"),
    };
    let fmt: fn(f64) -> String = match result.direction {
        ConversionDirection::MassToVolume => format_volume,
        ConversionDirection::VolumeToMass => format_mass,
    };
    let mut out = String::new();
    let _ = writeln!(out, "{label}");
    let _ = writeln!(out, "  {:<20} {:>14} {unit}", tr.t(keys::RESULT_AT15), fmt(result.at15));
    let _ = writeln!(
        out,
        "  {:<20} {:>14} {unit}",
        tr.t(keys::RESULT_AT_ACTUAL),
        fmt(result.at_actual)
    );
    let _ = writeln!(
        out,
        "  {:<20} {:>14} {unit}",
        tr.t(keys::RESULT_DIFFERENCE),
        format_signed(result.difference())
    );
    let _ = writeln!(
        out,
        "  {:<20} {:>14} %",
        tr.t(keys::RESULT_PERCENT_DIFFERENCE),
        format_percent(result.percent_difference())
    );
    let _ = writeln!(
        out,
        "  {:<20} {:>14} kg/L",
        tr.t(keys::RESULT_DENSITY15),
        format_density(result.density15)
    );
    let _ = writeln!(
        out,
        "  {:<20} {:>14} kg/L",
        tr.t(keys::RESULT_DENSITY_ACTUAL),
        format_density(result.density_actual)
    );
    out
}

fn render_delta(tr: &Translator, out: &mut String, delta: &Delta) {
    let rows = [
        (keys::RESULT_MASS, delta.mass_kg, delta.mass_percent, "kg"),
        (keys::RESULT_VOLUME15, delta.volume15_l, delta.volume15_percent, "L"),
        (
            keys::RESULT_VOLUME_ACTUAL,
            delta.volume_actual_l,
            delta.volume_actual_percent,
            "L",
        ),
    ];
    for (key, value, percent, unit) in rows {
        let _ = writeln!(
            out,
            "    Δ {:<16} {:>14} {unit:<2} ({:>7} %) {}",
            tr.t(key),
            format_signed(value),
            format_percent(percent),
            delta_label(tr, value)
        );
    }
}

/// 운송 손실 결과를 지점 → 구간 → 전체 순서로 출력한다.
pub fn render_trip(tr: &Translator, result: &TripResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", tr.t(keys::TRIP_POINTS), product_label(tr, result.product));
    for (i, p) in result.points.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {}: {} {} kg, ρ15 {}, ρT {}, {} °C, V15 {} L, VT {} L",
            i + 1,
            p.name,
            tr.t(keys::RESULT_MASS),
            format_mass(p.mass_kg),
            format_density(p.density15),
            format_density(p.density_actual),
            format_temperature(p.temperature_c),
            format_volume(p.volume15_l),
            format_volume(p.volume_actual_l)
        );
    }
    if !result.is_complete() {
        let _ = writeln!(out, "{}", tr.t(keys::TRIP_NOT_ENOUGH_POINTS));
        return out;
    }
    let _ = writeln!(out, "{}", tr.t(keys::TRIP_SEGMENTS));
    for seg in &result.segments {
        let _ = writeln!(out, "  {} → {}", seg.from.name, seg.to.name);
        render_delta(tr, &mut out, &seg.delta);
    }
    let _ = writeln!(out, "{}", tr.t(keys::TRIP_TOTAL));
    if let (Some(first), Some(last)) = (result.first(), result.last()) {
        let _ = writeln!(out, "  {} → {}", first.name, last.name);
    }
    render_delta(tr, &mut out, &result.total);
    out
}

/// 이력 목록 한 줄 요약.
pub fn render_history_list(tr: &Translator, history: &HistoryStore) -> String {
    let mut out = String::new();
    for (i, e) in history.entries().iter().enumerate() {
        let summary = match (e.kind, &e.conversion, &e.trip) {
            (CalculationKind::Conversion, Some(c), _) => {
                let fmt: fn(f64) -> String = match c.direction {
                    ConversionDirection::MassToVolume => format_volume,
                    ConversionDirection::VolumeToMass => format_mass,
                };
                let unit = match c.direction {
                    ConversionDirection::MassToVolume => "L",
                    ConversionDirection::VolumeToMass => "kg",
                };
                format!(
                    "{}: {} {unit} / {} {unit}",
                    tr.t(keys::HISTORY_KIND_CONVERSION),
                    fmt(c.at15),
                    fmt(c.at_actual)
                )
            }
            (CalculationKind::TripLoss, _, Some(t)) => format!(
                "{}: {} ({} kg)",
                tr.t(keys::HISTORY_KIND_TRIP),
                e.parameters.get("route").cloned().unwrap_or_default(),
                format_signed(t.total.mass_kg)
            ),
            _ => String::new(),
        };
        let _ = writeln!(
            out,
            "{:>3}) {} {summary}",
            i + 1,
            e.recorded_at.format("%Y-%m-%d %H:%M")
        );
    }
    out
}

/// 이력 한 건의 상세 내용.
pub fn render_history_entry(tr: &Translator, entry: &HistoryEntry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", entry.recorded_at.format("%Y-%m-%d %H:%M:%S UTC"), entry.id);
    for (k, v) in &entry.parameters {
        let _ = writeln!(out, "  {k} = {v}");
    }
    if let Some(c) = &entry.conversion {
        out.push_str(&render_conversion(tr, c));
    }
    if let Some(t) = &entry.trip {
        out.push_str(&render_trip(tr, t));
    }
    out
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    let n = io::stdin().read_line(&mut buf)?;
    if n == 0 {
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed",
        )));
    }
    Ok(buf)
}

/// 검증을 통과할 때까지 다시 묻는다.
fn read_validated(
    tr: &Translator,
    field_key: &str,
    parse: fn(&str, &str) -> Result<f64, ValidationError>,
) -> Result<f64, AppError> {
    let field = tr.t(field_key);
    loop {
        let s = read_line(&format!("{field}: "))?;
        match parse(&s, &field) {
            Ok(v) => return Ok(v),
            Err(err) => println!("{}", tr.validation_message(&err)),
        }
    }
}

fn read_yes_no(tr: &Translator, prompt_key: &str) -> Result<bool, AppError> {
    let s = read_line(&format!("{}{} ", tr.t(prompt_key), tr.t(keys::YES_NO_HINT)))?;
    Ok(matches!(s.trim().to_lowercase().as_str(), "y" | "yes" | "예" | "네"))
}

fn read_product(tr: &Translator, current: ProductClass) -> Result<ProductClass, AppError> {
    let label = product_label(tr, current);
    let sel = read_line(&tr.tf(keys::PRODUCT_OPTIONS, &[("current", label.as_str())]))?;
    Ok(match sel.trim() {
        "1" => ProductClass::Refined,
        "2" => ProductClass::Crude,
        _ => current,
    })
}

fn read_frame(tr: &Translator, current: DensityFrame) -> Result<DensityFrame, AppError> {
    let label = frame_label(tr, current);
    let sel = read_line(&tr.tf(keys::FRAME_OPTIONS, &[("current", label.as_str())]))?;
    Ok(match sel.trim() {
        "1" => DensityFrame::At15,
        "2" => DensityFrame::AtActualTemperature,
        _ => current,
    })
}
