//! # Daylight Mask Command Line
//!
//! Builds, inspects and queries packed daylight years.
//!
//! ```text
//! daylight-mask simulate                 # synthetic sun-times.json
//! daylight-mask encode                   # sun-times.json → daylight.bin
//! daylight-mask check --at 2025-01-01T16:30:00Z
//! daylight-mask check --full             # load all 640 bytes instead of 2–3
//! daylight-mask locate --at 1735689600
//! daylight-mask show --day 0
//! ```
//!
//! Paths default to the values in daylight-config.toml. Logs go to stderr,
//! answers to stdout.

use anyhow::{bail, Context};
use chrono::DateTime;
use clap::{Parser, Subcommand};
use daylight_mask::{
    config::Config,
    dataset, encoder, load_day, locate,
    query::{day_index, now_timestamp},
    simulate::simulate_year,
    DaylightWindow, INTERVAL_MINUTES,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "daylight-mask", version, about = "Packed yearly daylight schedules")]
struct Cli {
    /// Config file [default: daylight-config.toml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a synthetic year of sunrise/sunset records as JSON
    Simulate {
        /// Output dataset (defaults to data.dataset_path)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Encode a JSON dataset into a 640-byte packed year
    Encode {
        /// Input dataset (defaults to data.dataset_path)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Output packed year (defaults to data.packed_path)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Answer whether an instant is in daylight
    Check {
        /// Packed year (defaults to data.packed_path)
        #[arg(long)]
        file: Option<PathBuf>,
        /// RFC 3339 instant or epoch seconds; defaults to now
        #[arg(long)]
        at: Option<String>,
        /// Load the whole file rather than just the day's bytes
        #[arg(long)]
        full: bool,
    },
    /// Print the byte range holding an instant's day
    Locate {
        /// RFC 3339 instant or epoch seconds; defaults to now
        #[arg(long)]
        at: Option<String>,
    },
    /// Print one day's sunrise and sunset
    Show {
        /// Packed year (defaults to data.packed_path)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Day index 0–364
        #[arg(long, conflicts_with = "at")]
        day: Option<u16>,
        /// RFC 3339 instant or epoch seconds; defaults to now
        #[arg(long)]
        at: Option<String>,
    },
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };

    // RUST_LOG wins over the config file
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Simulate { output } => {
            let output = output.unwrap_or(config.data.dataset_path);
            let entries = simulate_year(&config.simulation);
            dataset::save_entries(&output, &entries)
                .with_context(|| format!("writing dataset {}", output.display()))?;
            println!("{} records → {}", entries.len(), output.display());
        }
        Command::Encode { input, output } => {
            let input = input.unwrap_or(config.data.dataset_path);
            let output = output.unwrap_or(config.data.packed_path);
            let entries = dataset::load_entries(&input)
                .with_context(|| format!("reading dataset {}", input.display()))?;
            if entries.is_empty() {
                warn!("Dataset {} is empty, every day will be dark", input.display());
            }
            let year = encoder::encode(&entries);
            dataset::write_packed_file(&output, &year)
                .with_context(|| format!("writing packed year {}", output.display()))?;
            println!("{} → {}", input.display(), output.display());
        }
        Command::Check { file, at, full } => {
            let file = file.unwrap_or(config.data.packed_path);
            let timestamp = parse_instant(at.as_deref())?;
            let daylight = if full {
                dataset::read_packed_file(&file)?.is_daylight(timestamp)?
            } else {
                load_day(&file, Some(timestamp))?.is_daylight(timestamp)?
            };
            info!("{} at {}: daylight={}", file.display(), timestamp, daylight);
            println!("{}", if daylight { "daylight" } else { "dark" });
        }
        Command::Locate { at } => {
            let fragment = locate(Some(parse_instant(at.as_deref())?));
            println!(
                "day {} → bytes {}..{} ({} bytes, shift {})",
                fragment.day_index(),
                fragment.byte_offset(),
                fragment.byte_offset() + fragment.fragment_size() as u64,
                fragment.fragment_size(),
                fragment.shift().unwrap_or_default()
            );
        }
        Command::Show { file, day, at } => {
            let file = file.unwrap_or(config.data.packed_path);
            let day = match day {
                Some(day) if day >= 365 => bail!("day {} is outside 0–364", day),
                Some(day) => day,
                None => day_index(parse_instant(at.as_deref())?),
            };
            let year = dataset::read_packed_file(&file)?;
            let window = year.window(day).unwrap_or_default();
            println!("day {}: {}", day, describe(window));
        }
    }

    Ok(())
}

/// Parse `--at`: RFC 3339 first, then plain epoch seconds; `None` is now.
fn parse_instant(at: Option<&str>) -> anyhow::Result<i64> {
    let Some(at) = at else {
        return Ok(now_timestamp());
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(at) {
        return Ok(dt.timestamp());
    }
    at.trim()
        .parse::<i64>()
        .with_context(|| format!("{:?} is neither RFC 3339 nor epoch seconds", at))
}

fn describe(window: DaylightWindow) -> String {
    if window.daylight_intervals() == 0 {
        return format!(
            "dark all day (sunrise {}, sunset {})",
            interval_clock(window.sunrise_index),
            interval_clock(window.sunset_index)
        );
    }
    format!(
        "daylight {}–{} UTC ({} intervals)",
        interval_clock(window.sunrise_index),
        interval_clock(window.sunset_index),
        window.daylight_intervals()
    )
}

/// Start of an interval as `"HH:MM"`; index 96 prints as `"24:00"`.
fn interval_clock(index: u8) -> String {
    let minutes = u32::from(index) * INTERVAL_MINUTES;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
