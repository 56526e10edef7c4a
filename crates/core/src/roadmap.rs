//! Roadmap chart aggregation.
//!
//! Buckets approved Actions by month of a single year along three disjoint
//! dimensions:
//!
//! - **started**: `progress_started_at` falls in the month.
//! - **continued**: `updated_at` falls in the month and the Action started
//!   before the year (or has no recorded start).
//! - **completed**: status is COMPLETED and `updated_at` falls in the month.
//!
//! The in-progress series is derived as started + continued. An Action that
//! started in the chart year is only ever counted as started, so the two
//! never overlap.
//!
//! Everything here is a pure function of the candidate rows, the requested
//! year and today's date, so the initial page render and the "change year"
//! refresh share one code path.

use chrono::Datelike;
use serde::Serialize;

use crate::action_status::ActionStatus;
use crate::types::{Date, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// First year of the strategy pilot; earlier years are not selectable.
pub const PILOT_START_YEAR: i32 = 2024;

/// The default chart year never falls before this year.
pub const DEFAULT_YEAR_FLOOR: i32 = 2026;

pub const MONTH_LABELS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const MONTH_LABELS_GA: [&str; 12] = [
    "Eanáir",
    "Feabhra",
    "Márta",
    "Aibreán",
    "Bealtaine",
    "Meitheamh",
    "Iúil",
    "Lúnasa",
    "Meán Fómhair",
    "Deireadh Fómhair",
    "Samhain",
    "Nollaig",
];

/// Twelve monthly counts, January first.
pub type MonthlySeries = [i64; 12];

// ---------------------------------------------------------------------------
// Year resolution
// ---------------------------------------------------------------------------

/// The year shown when none (or an invalid one) is requested.
pub fn default_chart_year(today: Date) -> i32 {
    today.year().max(DEFAULT_YEAR_FLOOR)
}

/// Resolve the `?year=` parameter.
///
/// Missing, unparseable, pre-pilot and future years all silently fall back
/// to [`default_chart_year`].
pub fn resolve_chart_year(param: Option<&str>, today: Date) -> i32 {
    let default = default_chart_year(today);
    match param.and_then(|raw| raw.trim().parse::<i32>().ok()) {
        Some(year) if (PILOT_START_YEAR..=today.year()).contains(&year) => year,
        _ => default,
    }
}

/// Selectable years, pilot start through the current year inclusive.
pub fn year_options(today: Date) -> Vec<i32> {
    (PILOT_START_YEAR..=today.year()).collect()
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// The fields of an Action the roadmap needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapAction {
    pub status: ActionStatus,
    pub is_approved: bool,
    pub progress_started_at: Option<Date>,
    pub updated_at: Timestamp,
}

/// The three disjoint monthly series for one year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoadmapSeries {
    pub started: MonthlySeries,
    pub continued: MonthlySeries,
    pub completed: MonthlySeries,
}

impl RoadmapSeries {
    /// Started + continued, month by month.
    pub fn in_progress(&self) -> MonthlySeries {
        std::array::from_fn(|m| self.started[m] + self.continued[m])
    }
}

/// Month index (0 = January) of `date` if it falls in `year`.
fn month_in_year(date: Date, year: i32) -> Option<usize> {
    (date.year() == year).then(|| date.month0() as usize)
}

/// Count approved Actions into the started / continued / completed series.
pub fn aggregate(actions: &[RoadmapAction], year: i32) -> RoadmapSeries {
    let mut series = RoadmapSeries::default();

    for action in actions.iter().filter(|a| a.is_approved) {
        let started_in = action.progress_started_at;

        if let Some(m) = started_in.and_then(|d| month_in_year(d, year)) {
            series.started[m] += 1;
        }

        let updated_month = month_in_year(action.updated_at.date_naive(), year);
        if let Some(m) = updated_month {
            let started_before_year = started_in.is_none_or(|d| d.year() < year);
            if started_before_year {
                series.continued[m] += 1;
            }
            if action.status == ActionStatus::Completed {
                series.completed[m] += 1;
            }
        }
    }

    series
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Chart payload returned by `GET /roadmap`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoadmapPayload {
    pub chart_year: i32,
    pub chart_labels_en: [&'static str; 12],
    pub chart_labels_ga: [&'static str; 12],
    pub chart_data_completed: MonthlySeries,
    pub chart_data_in_progress: MonthlySeries,
    pub chart_data_started: MonthlySeries,
    pub chart_data_continued: MonthlySeries,
    pub completed_total_year: i64,
    pub in_progress_total_year: i64,
    pub started_total_year: i64,
    pub continued_total_year: i64,
    pub year_options: Vec<i32>,
}

/// Build the payload for an already-resolved `year`.
pub fn build_roadmap(actions: &[RoadmapAction], year: i32, today: Date) -> RoadmapPayload {
    let series = aggregate(actions, year);
    let in_progress = series.in_progress();

    RoadmapPayload {
        chart_year: year,
        chart_labels_en: MONTH_LABELS_EN,
        chart_labels_ga: MONTH_LABELS_GA,
        chart_data_completed: series.completed,
        chart_data_in_progress: in_progress,
        chart_data_started: series.started,
        chart_data_continued: series.continued,
        completed_total_year: series.completed.iter().sum(),
        in_progress_total_year: in_progress.iter().sum(),
        started_total_year: series.started.iter().sum(),
        continued_total_year: series.continued.iter().sum(),
        year_options: year_options(today),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
