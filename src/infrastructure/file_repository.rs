// File-backed repository of normalized per-location readings
use crate::application::reading_repository::ReadingRepository;
use crate::domain::location::{Location, LocationReadings};
use crate::domain::reading::Reading;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct FileReadingRepository {
    locations: BTreeMap<String, Arc<LocationReadings>>,
}

#[derive(Debug, Deserialize)]
struct LocationRecord {
    id: String,
    #[serde(default)]
    resolved_address: String,
    #[serde(default)]
    timezone: String,
    #[serde(default)]
    tz_offset_hours: f64,
    #[serde(default)]
    readings: Vec<ReadingRecord>,
}

#[derive(Debug, Deserialize)]
struct ReadingRecord {
    timestamp: i64,
    temperature: f64,
    humidity: f64,
    precipitation_probability: f64,
    wind_speed: f64,
    #[serde(default)]
    feels_like: Option<f64>,
    #[serde(default)]
    precipitation: f64,
    #[serde(default)]
    wind_gust: f64,
    #[serde(default)]
    pressure: f64,
    #[serde(default)]
    cloud_cover: f64,
    #[serde(default)]
    uv_index: f64,
    #[serde(default)]
    conditions: String,
    #[serde(default)]
    icon: String,
}

impl From<ReadingRecord> for Reading {
    fn from(record: ReadingRecord) -> Self {
        Reading {
            timestamp: record.timestamp,
            temperature: record.temperature,
            feels_like: record.feels_like.unwrap_or(record.temperature),
            humidity: record.humidity,
            precipitation: record.precipitation,
            precipitation_probability: record.precipitation_probability,
            wind_speed: record.wind_speed,
            wind_gust: record.wind_gust,
            pressure: record.pressure,
            cloud_cover: record.cloud_cover,
            uv_index: record.uv_index,
            conditions: record.conditions,
            icon: record.icon,
        }
    }
}

impl FileReadingRepository {
    pub fn from_locations(locations: Vec<LocationReadings>) -> Self {
        let locations = locations
            .into_iter()
            .map(|data| (data.location.id.clone(), Arc::new(data)))
            .collect();
        Self { locations }
    }

    /// Load every `*.json` file in `directory`. Files that fail to parse are
    /// skipped with a warning.
    pub async fn load(directory: impl AsRef<Path>) -> Result<Self> {
        let directory = directory.as_ref();
        let mut entries = tokio::fs::read_dir(directory)
            .await
            .with_context(|| format!("Failed to read data directory {}", directory.display()))?;

        let mut locations = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let contents = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            match Self::parse_location(&contents) {
                Ok(data) => {
                    tracing::info!(
                        "Loaded {} readings for {} from {}",
                        data.readings.len(),
                        data.location.id,
                        path.display()
                    );
                    locations.push(data);
                }
                Err(e) => {
                    tracing::warn!("Skipping {}: {:#}", path.display(), e);
                }
            }
        }

        Ok(Self::from_locations(locations))
    }

    fn parse_location(json: &str) -> Result<LocationReadings> {
        let record: LocationRecord =
            serde_json::from_str(json).context("Failed to parse location readings")?;

        let offset_seconds = (record.tz_offset_hours * 3600.0).round() as i32;
        let utc_offset = FixedOffset::east_opt(offset_seconds)
            .with_context(|| format!("Invalid UTC offset {} hours", record.tz_offset_hours))?;

        let location = Location::new(record.id, record.resolved_address, record.timezone, utc_offset);
        let readings = record
            .readings
            .into_iter()
            .map(|reading| {
                DateTime::from_timestamp(reading.timestamp, 0)
                    .with_context(|| format!("Timestamp {} is out of range", reading.timestamp))?;
                Ok(Reading::from(reading))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(LocationReadings::new(location, readings))
    }
}

#[async_trait]
impl ReadingRepository for FileReadingRepository {
    async fn list_locations(&self) -> Result<Vec<Location>> {
        Ok(self
            .locations
            .values()
            .map(|data| data.location.clone())
            .collect())
    }

    async fn get_readings(&self, location_id: &str) -> Result<Option<Arc<LocationReadings>>> {
        Ok(self.locations.get(location_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": "Dolores_Park_",
        "resolved_address": "Dolores Park, San Francisco, CA",
        "timezone": "America/Los_Angeles",
        "tz_offset_hours": -7,
        "readings": [
            {"timestamp": 1710525600, "temperature": 61.0, "humidity": 70, "precipitation_probability": 10, "wind_speed": 8.5, "conditions": "Clear", "icon": "clear-day"},
            {"timestamp": 1710522000, "temperature": 59.5, "humidity": 72, "precipitation_probability": 5, "wind_speed": 7.0, "feels_like": 58.0}
        ]
    }"#;

    #[test]
    fn test_parse_location() {
        let data = FileReadingRepository::parse_location(SAMPLE).unwrap();

        assert_eq!(data.location.name, "Dolores Park");
        assert_eq!(data.location.utc_offset.local_minus_utc(), -7 * 3600);
        assert_eq!(data.readings.len(), 2);
        // Sorted on load
        assert_eq!(data.readings[0].timestamp, 1_710_522_000);
        assert_eq!(data.readings[0].feels_like, 58.0);
        assert_eq!(data.readings[1].feels_like, 61.0);
        assert_eq!(data.readings[1].icon, "clear-day");
    }

    #[test]
    fn test_parse_rejects_bad_offset() {
        let json = r#"{"id": "x", "tz_offset_hours": 30, "readings": []}"#;
        assert!(FileReadingRepository::parse_location(json).is_err());
    }

    #[test]
    fn test_parse_rejects_out_of_range_timestamp() {
        let json = r#"{
            "id": "x",
            "readings": [
                {"timestamp": 9300000000000000, "temperature": 60, "humidity": 50, "precipitation_probability": 0, "wind_speed": 3}
            ]
        }"#;
        let err = FileReadingRepository::parse_location(json).unwrap_err();
        assert!(format!("{:#}", err).contains("out of range"));
    }

    #[tokio::test]
    async fn test_lookup() {
        let data = FileReadingRepository::parse_location(SAMPLE).unwrap();
        let repository = FileReadingRepository::from_locations(vec![data]);

        let locations = repository.list_locations().await.unwrap();
        assert_eq!(locations.len(), 1);
        assert!(repository.get_readings("Dolores_Park_").await.unwrap().is_some());
        assert!(repository.get_readings("elsewhere").await.unwrap().is_none());
    }
}
