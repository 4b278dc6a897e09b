//! Chart aggregation for the trailing-days views.
//!
//! All bucketing uses the local calendar with day boundaries at local
//! midnight. Days without entries stay in the window as empty slots so
//! the charts can distinguish "no data" from "data without alerts".

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use log::debug;
use std::collections::BTreeMap;

use shared::{
    BubbleSize, ChartVariant, DailyEntryPoint, DehydrationDayCell, DehydrationDayState,
    DehydrationGridResponse, EntryChartResponse, WeightAveragePoint, WeightChartResponse,
};

use crate::domain::models::{
    DehydrationCheck, EntryRecord, FeedEntry, FeedingMethod, StoolEntry, VolumeLevel, WeightEntry,
    WeightUnit, WetDiaperEntry,
};
use crate::domain::units;

/// Trailing window length for the entry charts, today included.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Narrower window used by the dehydration-alert grid.
pub const DEHYDRATION_WINDOW_DAYS: u32 = 5;

/// Chart aggregation service.
#[derive(Clone)]
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// The trailing `days`-day x-axis domain ending at `today`, oldest
    /// day first.
    pub fn chart_window(&self, today: NaiveDate, days: u32) -> Vec<NaiveDate> {
        (0..days as i64)
            .rev()
            .map(|back| today - Duration::days(back))
            .collect()
    }

    /// Feed scatter chart: one bubble per feed, stacked by daily index.
    pub fn feed_chart(&self, entries: &[FeedEntry], today: NaiveDate) -> EntryChartResponse {
        let window = self.chart_window(today, DEFAULT_WINDOW_DAYS);
        let points = daily_indexed_points(entries, &window, |entry| {
            let bubble = match entry.method {
                FeedingMethod::DirectBreastfeeding { minutes } => bubble_for_minutes(minutes),
                FeedingMethod::Bottle { volume_ml, .. } => bubble_for_milliliters(volume_ml),
            };
            (bubble, false)
        });

        debug!("Feed chart: {} points in window", points.len());
        EntryChartResponse {
            window: window.iter().map(NaiveDate::to_string).collect(),
            points,
        }
    }

    /// Stool scatter chart; beige entries are flagged.
    pub fn stool_chart(&self, entries: &[StoolEntry], today: NaiveDate) -> EntryChartResponse {
        let window = self.chart_window(today, DEFAULT_WINDOW_DAYS);
        let points = daily_indexed_points(entries, &window, |entry| {
            (bubble_for_volume(entry.volume), entry.medical_alert())
        });

        EntryChartResponse {
            window: window.iter().map(NaiveDate::to_string).collect(),
            points,
        }
    }

    /// Wet-diaper scatter chart; discolored entries are flagged.
    pub fn wet_diaper_chart(
        &self,
        entries: &[WetDiaperEntry],
        today: NaiveDate,
    ) -> EntryChartResponse {
        let window = self.chart_window(today, DEFAULT_WINDOW_DAYS);
        let points = daily_indexed_points(entries, &window, |entry| {
            (bubble_for_volume(entry.volume), entry.dehydration_alert())
        });

        EntryChartResponse {
            window: window.iter().map(NaiveDate::to_string).collect(),
            points,
        }
    }

    /// Weight line chart: one point per day with data, the arithmetic
    /// mean of that day's measurements in the requested unit.
    pub fn weight_chart(
        &self,
        entries: &[WeightEntry],
        unit: WeightUnit,
        today: NaiveDate,
    ) -> WeightChartResponse {
        let window = self.chart_window(today, DEFAULT_WINDOW_DAYS);
        let first_day = window[0];

        let mut by_day: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
        for entry in entries {
            let day = local_day(entry.timestamp);
            if day < first_day || day > today {
                continue;
            }
            let value = match unit {
                WeightUnit::Kilograms => entry.kilograms(),
                WeightUnit::PoundsOunces => entry.pounds(),
            };
            by_day.entry(day).or_default().push(value);
        }

        let points = by_day
            .into_iter()
            .map(|(day, values)| {
                let average = values.iter().sum::<f64>() / values.len() as f64;
                WeightAveragePoint {
                    day: day.to_string(),
                    average: units::round_for_display(average),
                }
            })
            .collect();

        WeightChartResponse {
            window: window.iter().map(NaiveDate::to_string).collect(),
            unit: map_unit(unit),
            points,
        }
    }

    /// Five-day dehydration grid with one cell per day. A day alerts
    /// when any of its checks alerts.
    pub fn dehydration_grid(
        &self,
        checks: &[DehydrationCheck],
        today: NaiveDate,
    ) -> DehydrationGridResponse {
        let window = self.chart_window(today, DEHYDRATION_WINDOW_DAYS);

        let days = window
            .iter()
            .map(|day| {
                let mut state = DehydrationDayState::NoData;
                for check in checks {
                    if local_day(check.timestamp) != *day {
                        continue;
                    }
                    if check.dehydration_alert() {
                        state = DehydrationDayState::Alert;
                        break;
                    }
                    state = DehydrationDayState::Ok;
                }
                DehydrationDayCell {
                    day: day.to_string(),
                    state,
                }
            })
            .collect();

        DehydrationGridResponse { days }
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}

/// Today in the local calendar, the default chart anchor.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

fn local_day(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.with_timezone(&Local).date_naive()
}

/// Sort ascending by timestamp and assign 1-based per-day indexes,
/// resetting the counter at each new calendar day.
fn daily_indexed_points<E, F>(
    entries: &[E],
    window: &[NaiveDate],
    describe: F,
) -> Vec<DailyEntryPoint>
where
    E: EntryRecord,
    F: Fn(&E) -> (BubbleSize, bool),
{
    let mut sorted: Vec<&E> = entries.iter().collect();
    sorted.sort_by_key(|e| e.timestamp());

    let first_day = window.first().copied();
    let last_day = window.last().copied();

    let mut points = Vec::new();
    let mut current_day: Option<NaiveDate> = None;
    let mut index = 0u32;

    for entry in sorted {
        let day = local_day(entry.timestamp());
        if current_day != Some(day) {
            current_day = Some(day);
            index = 0;
        }
        index += 1;

        // Entries outside the window still advance the day counter so
        // that in-window indexes match the full per-day sequence.
        if first_day.map(|d| day < d).unwrap_or(true) || last_day.map(|d| day > d).unwrap_or(true) {
            continue;
        }

        let (bubble, alert) = describe(entry);
        points.push(DailyEntryPoint {
            entry_id: entry.id().unwrap_or_default().to_string(),
            day: day.to_string(),
            daily_index: index,
            bubble,
            alert,
        });
    }

    points
}

fn bubble_for_minutes(minutes: u32) -> BubbleSize {
    match minutes {
        0..=9 => BubbleSize::Small,
        10..=19 => BubbleSize::Medium,
        _ => BubbleSize::Large,
    }
}

fn bubble_for_milliliters(volume_ml: f64) -> BubbleSize {
    if volume_ml < 60.0 {
        BubbleSize::Small
    } else if volume_ml < 120.0 {
        BubbleSize::Medium
    } else {
        BubbleSize::Large
    }
}

fn bubble_for_volume(volume: VolumeLevel) -> BubbleSize {
    match volume {
        VolumeLevel::Light => BubbleSize::Small,
        VolumeLevel::Medium => BubbleSize::Medium,
        VolumeLevel::Heavy => BubbleSize::Large,
    }
}

fn map_unit(unit: WeightUnit) -> shared::WeightUnit {
    match unit {
        WeightUnit::Kilograms => shared::WeightUnit::Kilograms,
        WeightUnit::PoundsOunces => shared::WeightUnit::PoundsOunces,
    }
}

/// Bubble radius in points for the given chart variant; mini charts use
/// half the full-chart radius.
pub fn bubble_radius(size: BubbleSize, variant: ChartVariant) -> f32 {
    let full = match size {
        BubbleSize::Small => 6.0,
        BubbleSize::Medium => 9.0,
        BubbleSize::Large => 12.0,
    };
    match variant {
        ChartVariant::Full => full,
        ChartVariant::Mini => full / 2.0,
    }
}
