// Dashboard domain model
use super::analysis::{CombinedAnalysis, FieldAnalysis};
use super::location::Location;
use super::reading::{TimeSeriesPoint, WeatherField};
use chrono::NaiveDate;

/// A closed value range on a chart's y axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Data extent widened on both sides by `padding_factor` of its span.
    pub fn from_values<I>(values: I, padding_factor: f64) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut bounds: Option<(f64, f64)> = None;
        for value in values.into_iter().filter(|v| v.is_finite()) {
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(value), max.max(value)),
                None => (value, value),
            });
        }

        bounds.map(|(min, max)| {
            let padding = (max - min) * padding_factor;
            Self::new(min - padding, max + padding)
        })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Gridline values from `min` in steps of `increment`, not exceeding `max`.
    pub fn ticks(&self, increment: f64) -> Vec<f64> {
        if increment <= 0.0 || self.span() < 0.0 {
            return Vec::new();
        }
        let steps = (self.span() / increment + 1e-9).floor() as usize;
        (0..=steps).map(|i| self.min + i as f64 * increment).collect()
    }
}

#[derive(Debug, Clone)]
pub struct ChartData {
    pub field: WeatherField,
    pub title: String,
    pub unit: String,
    pub color: String,
    pub points: Vec<TimeSeriesPoint>,
    /// Padded extent of this chart's own points; `None` without data.
    pub data_range: Option<AxisRange>,
    /// Shared range across sibling charts of the same field.
    pub axis: AxisRange,
    pub ticks: Vec<f64>,
    pub analysis: FieldAnalysis,
}

#[derive(Debug, Clone)]
pub struct DayCard {
    pub date: NaiveDate,
    pub combined: CombinedAnalysis,
    pub charts: Vec<ChartData>,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub title: String,
    pub location: Location,
    pub days: Vec<DayCard>,
}

impl Dashboard {
    pub fn new(title: String, location: Location, days: Vec<DayCard>) -> Self {
        Self {
            title,
            location,
            days,
        }
    }
}
