// Preference analysis results
use super::reading::WeatherField;
use chrono::{DateTime, TimeZone};

/// A maximal interval with uniform in-range status. Times are epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start_ms: i64,
    pub end_ms: i64,
    pub in_range: bool,
}

impl Segment {
    pub fn new(start_ms: i64, end_ms: i64, in_range: bool) -> Self {
        Self {
            start_ms,
            end_ms,
            in_range,
        }
    }

    pub fn point(time_ms: i64, in_range: bool) -> Self {
        Self::new(time_ms, time_ms, in_range)
    }

    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }

    /// "8 AM - 2 PM" in the given timezone.
    pub fn label<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        format!("{} - {}", format_hour(self.start_ms, tz), format_hour(self.end_ms, tz))
    }
}

fn format_hour<Tz: TimeZone>(time_ms: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match DateTime::from_timestamp_millis(time_ms) {
        Some(utc) => utc.with_timezone(tz).format("%-I %p").to_string(),
        None => String::from("?"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    Min,
    Max,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::Min => "min",
            ViolationKind::Max => "max",
        }
    }
}

/// One reading's field value falling outside a bound.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub field: WeatherField,
    pub value: f64,
    pub limit: f64,
    pub kind: ViolationKind,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldSummary {
    pub total_duration_ms: i64,
    pub in_range_duration_ms: i64,
    pub percent_in_range: f64,
    pub valid_ranges: Vec<String>,
}

/// Single-field segmentation, used for chart shading and per-field summaries.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldAnalysis {
    pub field: WeatherField,
    pub segments: Vec<Segment>,
    pub summary: FieldSummary,
}

impl FieldAnalysis {
    pub fn empty(field: WeatherField) -> Self {
        Self {
            field,
            segments: Vec::new(),
            summary: FieldSummary::default(),
        }
    }
}

/// Periods where every constraint holds at once, plus every individual violation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CombinedAnalysis {
    pub valid_time_ranges: Vec<String>,
    pub valid_segments: Vec<Segment>,
    pub violations: Vec<Violation>,
}

impl CombinedAnalysis {
    /// Fields with at least one violation, in first-seen order.
    pub fn violated_fields(&self) -> Vec<WeatherField> {
        let mut fields = Vec::new();
        for violation in &self.violations {
            if !fields.contains(&violation.field) {
                fields.push(violation.field);
            }
        }
        fields
    }
}
