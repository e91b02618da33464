// Request and response bodies for the HTTP API
use crate::domain::error::PreferenceError;
use crate::domain::preference::{
    ActivityPreset, MinimumDuration, TimePreset, TimeWindow, UserPreferences, WeatherPreferences,
};
use crate::domain::reading::WeatherField;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Deserialize, Default)]
pub struct DatesQuery {
    pub preset: Option<PresetDto>,
    pub start_hour: Option<u32>,
    pub end_hour: Option<u32>,
    /// 0 (Sunday) ..= 6, or "none" to list every weekday
    pub day: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DashboardRequest {
    pub dates: Vec<NaiveDate>,
    #[serde(default)]
    pub preferences: Option<PreferencesDto>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetDto {
    Morning,
    Afternoon,
    Evening,
    Custom,
}

impl From<PresetDto> for TimePreset {
    fn from(preset: PresetDto) -> Self {
        match preset {
            PresetDto::Morning => TimePreset::Morning,
            PresetDto::Afternoon => TimePreset::Afternoon,
            PresetDto::Evening => TimePreset::Evening,
            PresetDto::Custom => TimePreset::Custom,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TimeWindowDto {
    pub preset: Option<PresetDto>,
    pub start_hour: Option<u32>,
    pub end_hour: Option<u32>,
}

impl TryFrom<TimeWindowDto> for TimeWindow {
    type Error = PreferenceError;

    fn try_from(dto: TimeWindowDto) -> Result<Self, Self::Error> {
        match (dto.start_hour, dto.end_hour, dto.preset) {
            (Some(start), Some(end), _) => TimeWindow::custom(start, end),
            (_, _, Some(preset)) => Ok(TimeWindow::preset(preset.into())),
            _ => Ok(TimeWindow::default()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct ConstraintDto {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Missing sections fall back to the default preferences. A present
/// `constraints` map replaces the defaults entirely, then `activity`
/// overwrites the fields it names.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PreferencesDto {
    pub constraints: Option<BTreeMap<WeatherField, ConstraintDto>>,
    pub activity: Option<String>,
    pub minimum_duration_hours: Option<f64>,
    /// Missing keeps the default day, `null` means no preferred day
    #[serde(default, deserialize_with = "present_or_null")]
    pub preferred_day: Option<Option<u8>>,
    pub time_window: Option<TimeWindowDto>,
}

fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<u8>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<u8>::deserialize(deserializer).map(Some)
}

impl TryFrom<PreferencesDto> for UserPreferences {
    type Error = PreferenceError;

    fn try_from(dto: PreferencesDto) -> Result<Self, Self::Error> {
        let mut preferences = UserPreferences::default();

        if let Some(constraints) = dto.constraints {
            let mut weather = WeatherPreferences::new();
            for (field, constraint) in constraints {
                weather.set(field, constraint.min, constraint.max)?;
            }
            preferences.weather = weather;
        }
        if let Some(name) = dto.activity {
            let activity =
                ActivityPreset::find(&name).ok_or(PreferenceError::UnknownActivity(name))?;
            preferences.apply_activity(activity);
        }
        if let Some(hours) = dto.minimum_duration_hours {
            preferences.minimum_duration = MinimumDuration::new(hours)?;
        }
        if let Some(day) = dto.preferred_day {
            preferences.set_preferred_day(day)?;
        }
        if let Some(window) = dto.time_window {
            preferences.time_window = TimeWindow::try_from(window)?;
        }

        Ok(preferences)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActivityDto {
    pub name: String,
    pub constraints: BTreeMap<WeatherField, ConstraintDto>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LocationDto {
    pub id: String,
    pub name: String,
    pub resolved_address: String,
    pub timezone: String,
    pub utc_offset_seconds: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatesDto {
    pub location_id: String,
    pub dates: Vec<NaiveDate>,
    pub first_reading: Option<i64>,
    pub last_reading: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PointDto {
    pub time_ms: i64,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AxisDto {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SegmentDto {
    pub start_ms: i64,
    pub end_ms: i64,
    pub in_range: bool,
    pub label: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ViolationDto {
    pub field: WeatherField,
    pub value: f64,
    pub limit: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub timestamp: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChartDto {
    pub field: WeatherField,
    pub title: String,
    pub unit: String,
    pub color: String,
    pub points: Vec<PointDto>,
    pub data_range: Option<AxisDto>,
    pub axis: AxisDto,
    pub ticks: Vec<f64>,
    pub segments: Vec<SegmentDto>,
    pub valid_ranges: Vec<String>,
    pub percent_in_range: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayCardDto {
    pub date: NaiveDate,
    pub weekday: String,
    pub valid_time_ranges: Vec<String>,
    pub valid_segments: Vec<SegmentDto>,
    pub violations: Vec<ViolationDto>,
    pub charts: Vec<ChartDto>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardDto {
    pub title: String,
    pub location: LocationDto,
    pub days: Vec<DayCardDto>,
}
