// Location service - Use cases for listing locations and their available dates
use crate::application::availability::{available_dates, available_time_range, filter_by_weekday};
use crate::application::reading_repository::ReadingRepository;
use crate::domain::location::Location;
use crate::domain::preference::TimeWindow;
use chrono::{NaiveDate, Weekday};
use std::sync::Arc;

/// Dates a location can show for one window, plus the span of its data
/// in epoch seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct DateAvailability {
    pub dates: Vec<NaiveDate>,
    pub time_range: Option<(i64, i64)>,
}

#[derive(Clone)]
pub struct LocationService {
    repository: Arc<dyn ReadingRepository>,
}

impl LocationService {
    pub fn new(repository: Arc<dyn ReadingRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_locations(&self) -> anyhow::Result<Vec<Location>> {
        self.repository.list_locations().await
    }

    /// Dates fully covering `window`, optionally limited to one weekday,
    /// most recent first. `None` when the location is unknown.
    pub async fn available_dates(
        &self,
        location_id: &str,
        window: &TimeWindow,
        preferred_day: Option<Weekday>,
    ) -> anyhow::Result<Option<DateAvailability>> {
        let Some(data) = self.repository.get_readings(location_id).await? else {
            return Ok(None);
        };

        let dates = available_dates(&data.readings, window, &data.location.utc_offset);
        let dates = filter_by_weekday(&dates, preferred_day);
        tracing::debug!("{} dates available for {}", dates.len(), location_id);

        Ok(Some(DateAvailability {
            dates,
            time_range: available_time_range(&data.readings),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::location::LocationReadings;
    use crate::domain::preference::TimePreset;
    use crate::domain::reading::Reading;
    use crate::infrastructure::file_repository::FileReadingRepository;
    use chrono::FixedOffset;

    // 2024-03-15T00:00:00Z, a Friday
    const DAY0: i64 = 1_710_460_800;

    fn service() -> LocationService {
        let readings = (0..72).map(|h| Reading::at(DAY0 + h * 3600)).collect();
        let location = Location::new(
            "Ocean_Beach_".to_string(),
            "Ocean Beach".to_string(),
            "UTC".to_string(),
            FixedOffset::east_opt(0).unwrap(),
        );
        let repository = FileReadingRepository::from_locations(vec![LocationReadings::new(location, readings)]);
        LocationService::new(Arc::new(repository))
    }

    #[tokio::test]
    async fn test_list_locations_formats_names() {
        let locations = service().list_locations().await.unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].name, "Ocean Beach");
    }

    #[tokio::test]
    async fn test_available_dates_by_weekday() {
        let window = TimeWindow::preset(TimePreset::Evening);

        let all = service()
            .available_dates("Ocean_Beach_", &window, None)
            .await
            .unwrap()
            .unwrap();
        let expected: Vec<NaiveDate> = [17, 16, 15]
            .into_iter()
            .map(|d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap())
            .collect();
        assert_eq!(all.dates, expected);
        assert_eq!(all.time_range, Some((DAY0, DAY0 + 71 * 3600)));

        let saturdays = service()
            .available_dates("Ocean_Beach_", &window, Some(Weekday::Sat))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(saturdays.dates, vec![NaiveDate::from_ymd_opt(2024, 3, 16).unwrap()]);
    }

    #[tokio::test]
    async fn test_unknown_location() {
        let window = TimeWindow::default();
        let result = service().available_dates("nowhere", &window, None).await.unwrap();
        assert!(result.is_none());
    }
}
