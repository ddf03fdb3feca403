use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use oil_calc_toolbox::app::{self, AppContext, AppError};
use oil_calc_toolbox::calculator::{self, ConversionDirection};
use oil_calc_toolbox::config::{self, DEFAULT_CONFIG_FILE};
use oil_calc_toolbox::i18n::{self, keys, Translator};
use oil_calc_toolbox::logging;
use oil_calc_toolbox::product::{DensityFrame, ProductClass};
use oil_calc_toolbox::store::HistoryEntry;
use oil_calc_toolbox::trip;
use oil_calc_toolbox::ui_cli;
use oil_calc_toolbox::validation;

#[derive(Parser)]
#[command(name = "oil_calc_toolbox")]
#[command(version)]
#[command(about = "Petroleum mass/volume conversion and trip loss analysis (API MPMS 11.1)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Language (auto, ko, en). Overrides the config value.
    #[arg(long, short = 'L', global = true)]
    lang: Option<String>,

    /// Path to config.toml
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert mass to volume or volume to mass
    Convert {
        /// mass-to-volume or volume-to-mass
        #[arg(long, default_value = "mass-to-volume", value_parser = parse_direction)]
        mode: ConversionDirection,

        /// Mass [kg] or volume [L]
        #[arg(long)]
        value: f64,

        /// Density [kg/L]
        #[arg(long)]
        density: f64,

        /// Actual temperature [°C]
        #[arg(long, allow_hyphen_values = true)]
        temperature: f64,

        /// Density frame of --density (at15, actual)
        #[arg(long, value_parser = DensityFrame::from_str)]
        frame: Option<DensityFrame>,

        /// Product class (refined, crude)
        #[arg(long, value_parser = ProductClass::from_str)]
        product: Option<ProductClass>,

        /// Store the result in the history
        #[arg(long)]
        save: bool,
    },
    /// Trip loss analysis over ordered measurement points
    Trip {
        /// Point as name:mass:density:temperature[:frame], in route order
        #[arg(long = "point", required = true, allow_hyphen_values = true)]
        points: Vec<String>,

        /// Product class (refined, crude)
        #[arg(long, value_parser = ProductClass::from_str)]
        product: Option<ProductClass>,

        /// Store the result in the history
        #[arg(long)]
        save: bool,
    },
    /// Show or edit the calculation history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List entries, newest first
    List,
    /// Show one entry by id
    Show { id: uuid::Uuid },
    /// Remove one entry by id
    Remove { id: uuid::Uuid },
    /// Remove all entries
    Clear,
}

fn parse_direction(s: &str) -> Result<ConversionDirection, String> {
    match s.trim().to_lowercase().as_str() {
        "mass-to-volume" | "m2v" | "mass" => Ok(ConversionDirection::MassToVolume),
        "volume-to-mass" | "v2m" | "volume" => Ok(ConversionDirection::VolumeToMass),
        other => Err(format!("unknown mode: {other}")),
    }
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    let fallback_tr = Translator::new(&i18n::resolve_language(cli.lang.as_deref(), None));
    match try_run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let msg = match &err {
                AppError::Validation(v) => fallback_tr.validation_message(v),
                other => other.to_string(),
            };
            eprintln!("{} {msg}", fallback_tr.t(keys::ERROR_PREFIX));
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let cfg = config::load_or_default(&cli.config)?;
    logging::init(&cfg.log_level, cli.verbose);
    let lang = i18n::resolve_language(cli.lang.as_deref(), Some(cfg.language.as_str()));
    let tr = Translator::new_with_pack(&lang, cfg.locales_dir.as_deref());
    tracing::debug!(language = %lang, config = %cli.config.display(), "starting");
    let mut ctx = AppContext::open(cfg, cli.config.clone(), tr)?;

    match cli.command {
        None => app::run(&mut ctx),
        Some(Commands::Convert {
            mode,
            value,
            density,
            temperature,
            frame,
            product,
            save,
        }) => {
            validation::check_inputs(value, density, temperature)?;
            let frame = frame.unwrap_or(ctx.config.default_density_frame);
            let product = product.unwrap_or(ctx.config.default_product);
            let result = calculator::convert(mode, value, density, temperature, frame, product);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", ui_cli::render_conversion(&ctx.tr, &result));
            }
            if save {
                let params = ui_cli::conversion_parameters(value, density, temperature, frame, product);
                ctx.history.add(HistoryEntry::conversion(result, params))?;
            }
            Ok(())
        }
        Some(Commands::Trip {
            points,
            product,
            save,
        }) => {
            let default_frame = ctx.config.default_density_frame;
            let points = points
                .iter()
                .map(|p| ui_cli::parse_point_arg(p, default_frame))
                .collect::<Result<Vec<_>, _>>()?;
            let product = product.unwrap_or(ctx.config.default_product);
            let result = trip::calculate(&points, product);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", ui_cli::render_trip(&ctx.tr, &result));
            }
            if save {
                let params = ui_cli::trip_parameters(&points, product);
                ctx.history.add(HistoryEntry::trip(result, params))?;
            }
            Ok(())
        }
        Some(Commands::History { action }) => match action {
            HistoryAction::List => {
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(ctx.history.entries())?);
                } else if ctx.history.is_empty() {
                    println!("{}", ctx.tr.t(keys::HISTORY_EMPTY));
                } else {
                    print!("{}", ui_cli::render_history_list(&ctx.tr, &ctx.history));
                }
                Ok(())
            }
            HistoryAction::Show { id } => {
                match ctx.history.get(id) {
                    Some(entry) if cli.json => println!("{}", serde_json::to_string_pretty(entry)?),
                    Some(entry) => print!("{}", ui_cli::render_history_entry(&ctx.tr, entry)),
                    None => println!("{}", ctx.tr.t(keys::HISTORY_NOT_FOUND)),
                }
                Ok(())
            }
            HistoryAction::Remove { id } => {
                let key = if ctx.history.remove(id)? {
                    keys::HISTORY_DELETED
                } else {
                    keys::HISTORY_NOT_FOUND
                };
                println!("{}", ctx.tr.t(key));
                Ok(())
            }
            HistoryAction::Clear => {
                ctx.history.clear()?;
                println!("{}", ctx.tr.t(keys::HISTORY_CLEARED));
                Ok(())
            }
        },
    }
}
