// Weather reading domain models
use chrono::{DateTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric weather quantity that can carry a comfort constraint and a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherField {
    Temperature,
    WindSpeed,
    PrecipitationProbability,
    Humidity,
}

impl WeatherField {
    pub const ALL: [WeatherField; 4] = [
        WeatherField::Temperature,
        WeatherField::WindSpeed,
        WeatherField::PrecipitationProbability,
        WeatherField::Humidity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherField::Temperature => "temperature",
            WeatherField::WindSpeed => "wind_speed",
            WeatherField::PrecipitationProbability => "precipitation_probability",
            WeatherField::Humidity => "humidity",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WeatherField::Temperature => "Temperature",
            WeatherField::WindSpeed => "Wind Speed",
            WeatherField::PrecipitationProbability => "Chance of Precipitation",
            WeatherField::Humidity => "Humidity",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            WeatherField::Temperature => "°F",
            WeatherField::WindSpeed => "mph",
            WeatherField::PrecipitationProbability | WeatherField::Humidity => "%",
        }
    }
}

impl fmt::Display for WeatherField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One hourly observation. `timestamp` is seconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reading {
    pub timestamp: i64,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub precipitation: f64,
    pub precipitation_probability: f64,
    pub wind_speed: f64,
    pub wind_gust: f64,
    pub pressure: f64,
    pub cloud_cover: f64,
    pub uv_index: f64,
    pub conditions: String,
    pub icon: String,
}

impl Reading {
    pub fn at(timestamp: i64) -> Self {
        Self {
            timestamp,
            ..Self::default()
        }
    }

    pub fn with(mut self, field: WeatherField, value: f64) -> Self {
        match field {
            WeatherField::Temperature => self.temperature = value,
            WeatherField::WindSpeed => self.wind_speed = value,
            WeatherField::PrecipitationProbability => self.precipitation_probability = value,
            WeatherField::Humidity => self.humidity = value,
        }
        self
    }

    pub fn value(&self, field: WeatherField) -> f64 {
        match field {
            WeatherField::Temperature => self.temperature,
            WeatherField::WindSpeed => self.wind_speed,
            WeatherField::PrecipitationProbability => self.precipitation_probability,
            WeatherField::Humidity => self.humidity,
        }
    }

    pub fn time_ms(&self) -> i64 {
        self.timestamp.saturating_mul(1000)
    }

    pub fn local_datetime<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        DateTime::from_timestamp(self.timestamp, 0).map(|utc| utc.with_timezone(tz))
    }

    pub fn local_hour<Tz: TimeZone>(&self, tz: &Tz) -> Option<u32> {
        self.local_datetime(tz).map(|local| local.hour())
    }
}

/// A single (time, value) sample of one field, as drawn by a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesPoint {
    pub time_ms: i64,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(time_ms: i64, value: f64) -> Self {
        Self { time_ms, value }
    }

    pub fn from_reading(reading: &Reading, field: WeatherField) -> Self {
        Self::new(reading.time_ms(), reading.value(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_field_accessors_round_trip() {
        let reading = Reading::at(0)
            .with(WeatherField::Temperature, 71.5)
            .with(WeatherField::Humidity, 40.0);

        assert_eq!(reading.value(WeatherField::Temperature), 71.5);
        assert_eq!(reading.value(WeatherField::Humidity), 40.0);
        assert_eq!(reading.value(WeatherField::WindSpeed), 0.0);
    }

    #[test]
    fn test_time_ms_saturates() {
        assert_eq!(Reading::at(1_710_460_800).time_ms(), 1_710_460_800_000);
        assert_eq!(Reading::at(i64::MAX / 10).time_ms(), i64::MAX);
        assert_eq!(Reading::at(i64::MIN / 10).time_ms(), i64::MIN);
    }

    #[test]
    fn test_local_hour_uses_offset() {
        // 2024-03-15T17:00:00Z
        let reading = Reading::at(1_710_522_000);
        let eastern = FixedOffset::west_opt(4 * 3600).unwrap();

        assert_eq!(reading.local_hour(&chrono::Utc), Some(17));
        assert_eq!(reading.local_hour(&eastern), Some(13));
    }
}
