//! Wind map generator.
//!
//! Builds an interactive map of current forecast wind over U.S. wind turbine
//! sites:
//! - Turbine locations from the USWTDB API or a local CSV
//! - One representative turbine per grid cell
//! - Forecast wind from api.weather.gov, drawn as colored arrows or markers

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use renderer::HtmlMapSink;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use wind_map::config::{MapConfig, MapOverrides, RenderStyle};
use wind_map::export::export_turbine_locations;
use wind_map::generate_map;
use wind_map::sources::{build_client, turbine_source, NwsGridSource};

#[derive(Parser, Debug)]
#[command(name = "wind-map")]
#[command(about = "Wind speed and direction map over wind turbine sites")]
struct Args {
    /// YAML configuration file
    #[arg(short, long, env = "WIND_MAP_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit JSON log lines
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch turbines and forecasts and write the HTML map
    Generate {
        /// Two-letter state code
        #[arg(long, env = "WIND_MAP_STATE")]
        state: Option<String>,

        /// Grid cell size in degrees
        #[arg(long)]
        grid_size: Option<f64>,

        /// Arrow length in degrees per mph
        #[arg(long)]
        arrow_scale: Option<f64>,

        #[arg(long, value_enum)]
        style: Option<RenderStyle>,

        /// Output HTML file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Read turbine locations from a CSV instead of the USWTDB API
        #[arg(long)]
        turbines_csv: Option<PathBuf>,

        /// User-Agent sent to upstream APIs
        #[arg(long, env = "WIND_MAP_USER_AGENT")]
        user_agent: Option<String>,
    },

    /// Save turbine locations for a state to CSV
    ExportTurbines {
        #[arg(long, env = "WIND_MAP_STATE")]
        state: Option<String>,

        #[arg(short, long, default_value = "turbine_locations.csv")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);
    if args.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    let mut config = MapConfig::load_or_default(args.config.as_deref())?;

    match args.command {
        Command::Generate {
            state,
            grid_size,
            arrow_scale,
            style,
            output,
            turbines_csv,
            user_agent,
        } => {
            config.apply_overrides(MapOverrides {
                state,
                grid_size,
                arrow_scale,
                style,
                output,
                turbines_csv,
                user_agent,
            });
            run_generate(config).await
        }
        Command::ExportTurbines { state, output } => {
            if let Some(state) = state {
                config.state = state;
            }
            run_export(config, output).await
        }
    }
}

async fn run_generate(config: MapConfig) -> Result<()> {
    config.validate().context("Invalid map configuration")?;

    info!(
        state = %config.state_code(),
        grid_size = config.grid_size,
        style = ?config.style,
        output = %config.output.display(),
        "Starting wind map generation"
    );

    let client = build_client(&config.sources).context("Failed to create HTTP client")?;
    let turbines = turbine_source(&config.sources, &client);
    let weather = NwsGridSource::new(client, config.sources.weather_api_url.clone());

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, finishing map with data gathered so far");
            ctrl_c.cancel();
        }
    });

    let sink = HtmlMapSink::new(&config.output, config.title())
        .with_subtitle("Current forecast wind at representative turbine sites");

    let mut last_logged = 0;
    let (path, summary) = generate_map(
        &config,
        turbines.as_ref(),
        &weather,
        sink,
        &cancel,
        |progress| {
            let percent = (progress.fraction() * 100.0) as usize;
            if percent / 10 > last_logged / 10 || progress.processed == progress.total {
                info!(
                    processed = progress.processed,
                    total = progress.total,
                    "Fetching wind data: {}%",
                    percent
                );
                last_logged = percent;
            }
        },
    )
    .await
    .context("Map generation failed")?;

    info!(
        path = %path.display(),
        representatives = summary.representatives,
        samples = summary.samples,
        skipped_no_forecast = summary.skipped_no_forecast,
        skipped_unavailable = summary.skipped_unavailable,
        skipped_invalid = summary.skipped_invalid,
        cancelled = summary.cancelled,
        "Wind map saved"
    );
    Ok(())
}

async fn run_export(config: MapConfig, output: PathBuf) -> Result<()> {
    config.validate().context("Invalid map configuration")?;

    let client = build_client(&config.sources).context("Failed to create HTTP client")?;
    let source = turbine_source(&config.sources, &client);
    let records = source
        .fetch_turbines(&config.state_code())
        .await
        .context("Failed to fetch turbine data")?;

    let written = export_turbine_locations(&records, &output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(rows = written, path = %output.display(), "Export complete");
    Ok(())
}
