//! # Synthetic Daylight Year
//!
//! Generates a full year of daily records from a simple cosine day-length
//! model. Used for demos, for exercising the encoder without a scraped
//! dataset, and by the CLI's `simulate` command.
//!
//! ## Model
//! - **Day length**: `mean ± amplitude`, shortest on Jan 1 and longest mid-year:
//!   `length = mean + amplitude * cos(2π * day / 365 + π)`
//! - **Solar noon**: fixed UTC clock time; sunrise and sunset sit half a day
//!   length either side of it
//! - **Wrapping**: clock times are taken modulo 24 h. A window that crosses
//!   UTC midnight therefore has its sunset before its sunrise, which the
//!   packed layout treats as "never daylight". Keep `solar_noon ± (mean +
//!   amplitude) / 2` inside one UTC day to avoid that.
//!
//! The defaults (12 h ± 4 h around 12:00 UTC) stay inside one UTC day.

use crate::{encoder::reference_dates, DailyEntry};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Parameters of the cosine day-length model, all in minutes.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct SimulationParams {
    /// Solar noon as minutes after UTC midnight
    pub solar_noon_minutes: u32,
    /// Average day length
    pub mean_day_minutes: u32,
    /// Half the difference between the longest and the shortest day
    pub amplitude_minutes: u32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        SimulationParams {
            solar_noon_minutes: 12 * 60,
            mean_day_minutes: 720, // 12 h
            amplitude_minutes: 240, // 8 h in winter, 16 h in summer
        }
    }
}

/// Generate one record per reference-year day.
///
/// # Example
/// ```
/// use daylight_mask::simulate::{simulate_year, SimulationParams};
///
/// let entries = simulate_year(&SimulationParams::default());
/// assert_eq!(entries.len(), 365);
/// assert_eq!(entries[0].date, "01-01");
/// assert_eq!(entries[0].sunrise, "08:00");
/// assert_eq!(entries[0].sunset, "16:00");
/// ```
pub fn simulate_year(params: &SimulationParams) -> Vec<DailyEntry> {
    let days = reference_dates().count() as f64;
    reference_dates()
        .enumerate()
        .map(|(i, date)| {
            let day_fraction = i as f64 / days;
            let length = f64::from(params.mean_day_minutes)
                + f64::from(params.amplitude_minutes) * (day_fraction * TAU + TAU / 2.0).cos();
            let half = (length as i64) / 2;
            let noon = i64::from(params.solar_noon_minutes);

            DailyEntry {
                date: date.format("%m-%d").to_string(),
                sunrise: format_clock(noon - half),
                sunset: format_clock(noon + half),
            }
        })
        .collect()
}

/// Format minutes (wrapped into one day) as `"HH:MM"`.
fn format_clock(minutes: i64) -> String {
    let minutes = minutes.rem_euclid(MINUTES_PER_DAY);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
