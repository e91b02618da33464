// User preference domain models
use super::error::PreferenceError;
use super::reading::WeatherField;
use chrono::Weekday;
use std::collections::BTreeMap;

pub const MIN_DURATION_HOURS: f64 = 0.1;

/// Optional lower/upper bound for one field.
///
/// A present bound is always a real bound, including zero: `min: Some(0.0)`
/// rejects negative values. An inverted range (`min > max`) is legal and never
/// matches anything.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RangeConstraint {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl RangeConstraint {
    pub const fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub const fn between(min: f64, max: f64) -> Self {
        Self::new(Some(min), Some(max))
    }

    pub const fn at_least(min: f64) -> Self {
        Self::new(Some(min), None)
    }

    pub const fn at_most(max: f64) -> Self {
        Self::new(None, Some(max))
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, value: f64) -> bool {
        let above_min = self.min.is_none_or(|min| value >= min);
        let below_max = self.max.is_none_or(|max| value <= max);
        above_min && below_max
    }

    /// The bound a value outside the range sits beyond, if any.
    pub fn bound_exceeded_by(&self, value: f64) -> Option<f64> {
        match (self.min, self.max) {
            (_, Some(max)) if value > max => Some(max),
            (Some(min), _) if value < min => Some(min),
            _ => None,
        }
    }
}

/// Per-field constraints keyed by field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeatherPreferences {
    constraints: BTreeMap<WeatherField, RangeConstraint>,
}

impl WeatherPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: WeatherField, constraint: RangeConstraint) -> Self {
        self.constraints.insert(field, constraint);
        self
    }

    pub fn get(&self, field: WeatherField) -> Option<&RangeConstraint> {
        self.constraints.get(&field)
    }

    pub fn set(&mut self, field: WeatherField, min: Option<f64>, max: Option<f64>) -> Result<(), PreferenceError> {
        for value in [min, max].into_iter().flatten() {
            if !value.is_finite() {
                return Err(PreferenceError::NonFiniteBound { field, value });
            }
        }
        self.constraints.insert(field, RangeConstraint::new(min, max));
        Ok(())
    }

    pub fn insert(&mut self, field: WeatherField, constraint: RangeConstraint) {
        self.constraints.insert(field, constraint);
    }

    pub fn clear(&mut self, field: WeatherField) {
        self.constraints.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WeatherField, &RangeConstraint)> {
        self.constraints.iter().map(|(field, constraint)| (*field, constraint))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePreset {
    Morning,
    Afternoon,
    Evening,
    Custom,
}

impl TimePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimePreset::Morning => "morning",
            TimePreset::Afternoon => "afternoon",
            TimePreset::Evening => "evening",
            TimePreset::Custom => "custom",
        }
    }
}

/// Daily hours of interest. Both ends are inclusive whole hours; a window
/// with `start_hour > end_hour` wraps past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start_hour: u32,
    pub end_hour: u32,
    pub preset: TimePreset,
}

impl TimeWindow {
    pub fn preset(preset: TimePreset) -> Self {
        let (start_hour, end_hour) = match preset {
            TimePreset::Morning => (6, 12),
            TimePreset::Afternoon => (12, 18),
            TimePreset::Evening => (18, 22),
            TimePreset::Custom => (9, 17),
        };
        Self {
            start_hour,
            end_hour,
            preset,
        }
    }

    pub fn custom(start_hour: u32, end_hour: u32) -> Result<Self, PreferenceError> {
        for hour in [start_hour, end_hour] {
            if hour > 23 {
                return Err(PreferenceError::HourOutOfRange(hour));
            }
        }
        Ok(Self {
            start_hour,
            end_hour,
            preset: TimePreset::Custom,
        })
    }

    pub fn wraps(&self) -> bool {
        self.start_hour > self.end_hour
    }

    pub fn contains_hour(&self, hour: u32) -> bool {
        if self.wraps() {
            hour >= self.start_hour || hour <= self.end_hour
        } else {
            (self.start_hour..=self.end_hour).contains(&hour)
        }
    }

    /// Every whole hour covered, evening side first for a wrapping window.
    pub fn hours(&self) -> Vec<u32> {
        if self.wraps() {
            (self.start_hour..24).chain(0..=self.end_hour).collect()
        } else {
            (self.start_hour..=self.end_hour).collect()
        }
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::preset(TimePreset::Afternoon)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimumDuration(f64);

impl MinimumDuration {
    pub fn new(hours: f64) -> Result<Self, PreferenceError> {
        if !hours.is_finite() || hours < MIN_DURATION_HOURS {
            return Err(PreferenceError::DurationTooShort {
                min: MIN_DURATION_HOURS,
                got: hours,
            });
        }
        Ok(Self(hours))
    }

    pub fn hours(&self) -> f64 {
        self.0
    }
}

impl Default for MinimumDuration {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Named bundle of constraints for a typical outdoor activity. Fields left
/// as `None` are not touched when the activity is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityPreset {
    pub name: &'static str,
    pub temperature: Option<RangeConstraint>,
    pub humidity: Option<RangeConstraint>,
    pub wind_speed: Option<RangeConstraint>,
    pub precipitation_probability: Option<RangeConstraint>,
}

const fn bounded(min: Option<f64>, max: Option<f64>) -> Option<RangeConstraint> {
    Some(RangeConstraint::new(min, max))
}

impl ActivityPreset {
    const fn new(
        name: &'static str,
        temperature: Option<RangeConstraint>,
        humidity: Option<RangeConstraint>,
        wind_speed: Option<RangeConstraint>,
        precipitation_probability: Option<RangeConstraint>,
    ) -> Self {
        Self {
            name,
            temperature,
            humidity,
            wind_speed,
            precipitation_probability,
        }
    }

    /// Case-insensitive lookup in [`ACTIVITY_PRESETS`].
    pub fn find(name: &str) -> Option<&'static ActivityPreset> {
        ACTIVITY_PRESETS
            .iter()
            .find(|preset| preset.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn constraints(&self) -> impl Iterator<Item = (WeatherField, RangeConstraint)> {
        [
            (WeatherField::Temperature, self.temperature),
            (WeatherField::Humidity, self.humidity),
            (WeatherField::WindSpeed, self.wind_speed),
            (WeatherField::PrecipitationProbability, self.precipitation_probability),
        ]
        .into_iter()
        .filter_map(|(field, constraint)| constraint.map(|c| (field, c)))
    }
}

// Temperature, humidity, wind speed, precipitation probability
pub const ACTIVITY_PRESETS: &[ActivityPreset] = &[
    ActivityPreset::new("Hiking", bounded(Some(45.0), Some(80.0)), bounded(None, Some(80.0)), bounded(None, Some(15.0)), bounded(None, Some(30.0))),
    ActivityPreset::new("Kite Flying", None, None, bounded(Some(5.0), Some(20.0)), bounded(None, Some(20.0))),
    ActivityPreset::new("Golfing", bounded(Some(50.0), Some(85.0)), bounded(None, Some(85.0)), bounded(None, Some(20.0)), bounded(None, Some(40.0))),
    ActivityPreset::new("Jogging", bounded(Some(50.0), Some(75.0)), bounded(None, Some(80.0)), bounded(None, Some(15.0)), bounded(None, Some(30.0))),
    ActivityPreset::new("Tennis", bounded(Some(55.0), Some(85.0)), bounded(None, Some(75.0)), bounded(None, Some(15.0)), bounded(None, Some(20.0))),
    ActivityPreset::new("Soccer", bounded(Some(50.0), Some(85.0)), bounded(None, Some(85.0)), bounded(None, Some(15.0)), bounded(None, Some(30.0))),
    ActivityPreset::new("Swimming (outdoor)", bounded(Some(70.0), Some(100.0)), None, None, bounded(None, Some(40.0))),
    ActivityPreset::new("Sunbathing", bounded(Some(75.0), Some(95.0)), bounded(None, Some(60.0)), None, bounded(None, Some(10.0))),
    ActivityPreset::new("Picnic", bounded(Some(60.0), Some(80.0)), bounded(None, Some(80.0)), bounded(None, Some(10.0)), bounded(None, Some(20.0))),
    ActivityPreset::new("Fishing", bounded(Some(45.0), Some(85.0)), None, None, bounded(None, Some(50.0))),
    ActivityPreset::new("Camping", bounded(Some(40.0), Some(80.0)), bounded(None, Some(90.0)), bounded(None, Some(15.0)), bounded(None, Some(40.0))),
    ActivityPreset::new("Mountain Biking", bounded(Some(50.0), Some(85.0)), bounded(None, Some(75.0)), bounded(None, Some(20.0)), bounded(None, Some(40.0))),
    ActivityPreset::new("Rock Climbing", bounded(Some(50.0), Some(80.0)), bounded(None, Some(70.0)), bounded(None, Some(20.0)), bounded(None, Some(20.0))),
    ActivityPreset::new("Surfing", bounded(Some(70.0), Some(95.0)), None, None, bounded(None, Some(50.0))),
    ActivityPreset::new("Sailing", bounded(Some(60.0), Some(85.0)), None, bounded(Some(5.0), Some(25.0)), bounded(None, Some(40.0))),
    ActivityPreset::new("Kayaking", bounded(Some(50.0), Some(90.0)), None, bounded(None, Some(15.0)), bounded(None, Some(30.0))),
    ActivityPreset::new("Canoeing", bounded(Some(50.0), Some(85.0)), None, bounded(None, Some(15.0)), bounded(None, Some(30.0))),
    ActivityPreset::new("Stand-up Paddleboarding", bounded(Some(65.0), Some(90.0)), None, bounded(None, Some(10.0)), bounded(None, Some(30.0))),
    ActivityPreset::new("Beach Volleyball", bounded(Some(70.0), Some(90.0)), bounded(None, Some(70.0)), bounded(None, Some(15.0)), bounded(None, Some(20.0))),
    ActivityPreset::new("Outdoor Yoga", bounded(Some(60.0), Some(85.0)), bounded(None, Some(75.0)), bounded(None, Some(10.0)), bounded(None, Some(20.0))),
    ActivityPreset::new("Archery", bounded(Some(50.0), Some(80.0)), bounded(None, Some(70.0)), bounded(None, Some(10.0)), bounded(None, Some(30.0))),
    ActivityPreset::new("Horse Riding", bounded(Some(40.0), Some(85.0)), bounded(None, Some(80.0)), bounded(None, Some(20.0)), bounded(None, Some(40.0))),
    ActivityPreset::new("Bird Watching", bounded(Some(40.0), Some(80.0)), None, None, bounded(None, Some(50.0))),
    ActivityPreset::new("Photography (Nature)", bounded(Some(40.0), Some(80.0)), None, bounded(None, Some(15.0)), bounded(None, Some(40.0))),
    ActivityPreset::new("Outdoor Painting", bounded(Some(50.0), Some(85.0)), None, bounded(None, Some(10.0)), bounded(None, Some(30.0))),
    ActivityPreset::new("Running a Marathon", bounded(Some(45.0), Some(65.0)), bounded(None, Some(80.0)), bounded(None, Some(15.0)), bounded(None, Some(40.0))),
    ActivityPreset::new("Triathlon", bounded(Some(60.0), Some(75.0)), bounded(None, Some(80.0)), bounded(None, Some(15.0)), bounded(None, Some(40.0))),
    ActivityPreset::new("Skateboarding", bounded(Some(50.0), Some(85.0)), None, bounded(None, Some(15.0)), bounded(None, Some(30.0))),
    ActivityPreset::new("Rollerblading", bounded(Some(50.0), Some(85.0)), None, bounded(None, Some(15.0)), bounded(None, Some(30.0))),
    ActivityPreset::new("Frisbee", bounded(Some(50.0), Some(85.0)), bounded(None, Some(80.0)), bounded(None, Some(15.0)), bounded(None, Some(30.0))),
    ActivityPreset::new("Basketball (Outdoor)", bounded(Some(50.0), Some(85.0)), bounded(None, Some(80.0)), bounded(None, Some(15.0)), bounded(None, Some(30.0))),
    ActivityPreset::new("Flag Football", bounded(Some(50.0), Some(85.0)), bounded(None, Some(85.0)), bounded(None, Some(15.0)), bounded(None, Some(30.0))),
    ActivityPreset::new("Softball/Baseball", bounded(Some(50.0), Some(85.0)), bounded(None, Some(85.0)), bounded(None, Some(15.0)), bounded(None, Some(30.0))),
    ActivityPreset::new("Hockey (Field/Street)", bounded(Some(40.0), Some(70.0)), bounded(None, Some(80.0)), bounded(None, Some(15.0)), bounded(None, Some(30.0))),
    ActivityPreset::new("Outdoor Concert", bounded(Some(60.0), Some(90.0)), bounded(None, Some(85.0)), bounded(None, Some(20.0)), bounded(None, Some(40.0))),
    ActivityPreset::new("Stargazing", bounded(Some(40.0), Some(70.0)), None, bounded(None, Some(10.0)), bounded(None, Some(20.0))),
    ActivityPreset::new("Outdoor Movie Night", bounded(Some(50.0), Some(80.0)), bounded(None, Some(80.0)), bounded(None, Some(10.0)), bounded(None, Some(20.0))),
    ActivityPreset::new("Gardening", bounded(Some(50.0), Some(85.0)), None, None, bounded(None, Some(50.0))),
    ActivityPreset::new("Paintball", bounded(Some(50.0), Some(80.0)), bounded(None, Some(80.0)), bounded(None, Some(15.0)), bounded(None, Some(40.0))),
    ActivityPreset::new("Scuba Diving (Beach Entry)", bounded(Some(70.0), Some(90.0)), None, bounded(None, Some(15.0)), bounded(None, Some(40.0))),
    ActivityPreset::new("Snorkeling", bounded(Some(70.0), Some(90.0)), None, bounded(None, Some(15.0)), bounded(None, Some(40.0))),
    ActivityPreset::new("Outdoor Meditation", bounded(Some(55.0), Some(80.0)), None, bounded(None, Some(10.0)), bounded(None, Some(20.0))),
    ActivityPreset::new("Water Balloon Fight", bounded(Some(70.0), Some(90.0)), None, bounded(None, Some(10.0)), bounded(None, Some(30.0))),
    ActivityPreset::new("Outdoor BBQ", bounded(Some(60.0), Some(90.0)), None, bounded(None, Some(15.0)), bounded(None, Some(30.0))),
    ActivityPreset::new("Outdoor Wedding", bounded(Some(60.0), Some(80.0)), bounded(None, Some(70.0)), bounded(None, Some(10.0)), bounded(None, Some(20.0))),
    ActivityPreset::new("Sledding", bounded(None, Some(32.0)), None, bounded(None, Some(15.0)), None),
    ActivityPreset::new("Snowboarding", bounded(Some(20.0), Some(32.0)), None, bounded(None, Some(25.0)), None),
    ActivityPreset::new("Skiing", bounded(Some(20.0), Some(32.0)), None, bounded(None, Some(25.0)), None),
    ActivityPreset::new("Snowshoeing", bounded(Some(20.0), Some(32.0)), None, bounded(None, Some(20.0)), None),
    ActivityPreset::new("Ice Skating (Outdoor)", bounded(None, Some(32.0)), None, bounded(None, Some(10.0)), None),
];

/// Convert a 0 (Sunday) ..= 6 (Saturday) index into a weekday.
pub fn weekday_from_index(index: u8) -> Result<Weekday, PreferenceError> {
    match index {
        0 => Ok(Weekday::Sun),
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        other => Err(PreferenceError::WeekdayOutOfRange(other)),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserPreferences {
    pub weather: WeatherPreferences,
    pub minimum_duration: MinimumDuration,
    pub preferred_day: Option<Weekday>,
    pub time_window: TimeWindow,
}

impl UserPreferences {
    pub fn set_constraint(&mut self, field: WeatherField, min: Option<f64>, max: Option<f64>) -> Result<(), PreferenceError> {
        self.weather.set(field, min, max)
    }

    pub fn clear_constraint(&mut self, field: WeatherField) {
        self.weather.clear(field);
    }

    pub fn set_minimum_duration(&mut self, hours: f64) -> Result<(), PreferenceError> {
        self.minimum_duration = MinimumDuration::new(hours)?;
        Ok(())
    }

    pub fn set_preferred_day(&mut self, index: Option<u8>) -> Result<(), PreferenceError> {
        self.preferred_day = index.map(weekday_from_index).transpose()?;
        Ok(())
    }

    /// Overwrite the constraints the activity names. Other fields keep
    /// their current constraint.
    pub fn apply_activity(&mut self, activity: &ActivityPreset) {
        for (field, constraint) in activity.constraints() {
            self.weather.insert(field, constraint);
        }
    }

    pub fn set_preset(&mut self, preset: TimePreset) {
        self.time_window = TimeWindow::preset(preset);
    }

    pub fn set_custom_window(&mut self, start_hour: u32, end_hour: u32) -> Result<(), PreferenceError> {
        self.time_window = TimeWindow::custom(start_hour, end_hour)?;
        Ok(())
    }
}

impl Default for UserPreferences {
    fn default() -> Self {
        // A pleasant Midwest afternoon
        let weather = WeatherPreferences::new()
            .with(WeatherField::Temperature, RangeConstraint::between(60.0, 80.0))
            .with(WeatherField::WindSpeed, RangeConstraint::at_most(10.0))
            .with(WeatherField::PrecipitationProbability, RangeConstraint::at_most(20.0));

        Self {
            weather,
            minimum_duration: MinimumDuration::default(),
            preferred_day: Some(Weekday::Fri),
            time_window: TimeWindow::default(),
        }
    }
}
