// Dashboard service - Use case for building per-date preference dashboards
use crate::application::availability::{day_window_bounds, readings_for_range};
use crate::application::axis_registry::AxisLimitRegistry;
use crate::application::preference_evaluator::PreferenceEvaluator;
use crate::application::reading_repository::ReadingRepository;
use crate::domain::dashboard::{AxisRange, ChartData, Dashboard, DayCard};
use crate::domain::preference::UserPreferences;
use crate::domain::reading::{Reading, TimeSeriesPoint};
use crate::infrastructure::config::DashboardConfig;
use chrono::{FixedOffset, NaiveDate};
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn ReadingRepository>,
    dashboard_config: DashboardConfig,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn ReadingRepository>, dashboard_config: DashboardConfig) -> Self {
        Self {
            repository,
            dashboard_config,
        }
    }

    /// Build one day card per requested date. Every chart registers its data
    /// range before any chart reads its axis, so sibling charts of a field
    /// end up on the same scale.
    pub async fn build_dashboard(
        &self,
        location_id: &str,
        dates: &[NaiveDate],
        preferences: &UserPreferences,
    ) -> anyhow::Result<Option<Dashboard>> {
        let Some(data) = self.repository.get_readings(location_id).await? else {
            return Ok(None);
        };

        let tz = data.location.utc_offset;
        let evaluator = PreferenceEvaluator::new(preferences.minimum_duration.hours(), tz)
            .with_gap_threshold_minutes(self.dashboard_config.gap_threshold_minutes);
        let mut registry = self.dashboard_config.new_registry();

        // Register all
        let mut days: Vec<DayCard> = dates
            .iter()
            .map(|date| self.build_day(&data.readings, *date, &tz, preferences, &evaluator, &mut registry))
            .collect();

        // Read all
        for chart in days.iter_mut().flat_map(|day| day.charts.iter_mut()) {
            let limit = registry.limit(chart.field);
            chart.axis = limit.range();
            chart.ticks = chart.axis.ticks(limit.increment);
        }

        tracing::debug!(
            "Built dashboard for {} with {} days",
            location_id,
            days.len()
        );

        let title = format!("{} Weather ({})", data.location.name, preferences.time_window.preset.as_str());
        Ok(Some(Dashboard::new(title, data.location.clone(), days)))
    }

    fn build_day(
        &self,
        readings: &[Reading],
        date: NaiveDate,
        tz: &FixedOffset,
        preferences: &UserPreferences,
        evaluator: &PreferenceEvaluator<FixedOffset>,
        registry: &mut AxisLimitRegistry,
    ) -> DayCard {
        let window = &preferences.time_window;
        let slice: &[Reading] = match day_window_bounds(date, window, tz) {
            Some((start, end)) => readings_for_range(readings, start, end, self.dashboard_config.buffer_hours),
            None => &[],
        };

        let combined = evaluator.evaluate_combined(slice, &preferences.weather, Some(window));

        let mut charts = Vec::with_capacity(self.dashboard_config.visible_fields.len());
        for &field in &self.dashboard_config.visible_fields {
            if self.dashboard_config.only_charts_with_preferences && preferences.weather.get(field).is_none() {
                continue;
            }
            let points: Vec<TimeSeriesPoint> = slice
                .iter()
                .map(|r| TimeSeriesPoint::from_reading(r, field))
                .collect();
            let data_range = AxisRange::from_values(
                points.iter().map(|p| p.value),
                self.dashboard_config.value_padding_factor,
            );
            if let Some(range) = data_range {
                registry.register_range(field, range);
            }

            let default_limit = registry.default_limit(field);
            charts.push(ChartData {
                field,
                title: field.title().to_string(),
                unit: field.unit().to_string(),
                color: default_limit.color.clone(),
                points,
                data_range,
                axis: default_limit.range(),
                ticks: Vec::new(),
                analysis: evaluator.analyze_field(slice, field, preferences.weather.get(field)),
            });
        }

        DayCard {
            date,
            combined,
            charts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::location::{Location, LocationReadings};
    use crate::domain::reading::WeatherField;
    use async_trait::async_trait;

    // 2024-03-15T00:00:00Z
    const DAY0: i64 = 1_710_460_800;

    struct StubRepository(Arc<LocationReadings>);

    #[async_trait]
    impl ReadingRepository for StubRepository {
        async fn list_locations(&self) -> anyhow::Result<Vec<Location>> {
            Ok(vec![self.0.location.clone()])
        }

        async fn get_readings(&self, location_id: &str) -> anyhow::Result<Option<Arc<LocationReadings>>> {
            Ok((self.0.location.id == location_id).then(|| self.0.clone()))
        }
    }

    fn service() -> DashboardService {
        service_with(DashboardConfig::default())
    }

    /// Two days of hourly readings; the second day runs much hotter.
    fn service_with(dashboard_config: DashboardConfig) -> DashboardService {
        let readings = (0..48)
            .map(|h| {
                let hot = if h >= 24 { 25.0 } else { 0.0 };
                Reading::at(DAY0 + h * 3600)
                    .with(WeatherField::Temperature, 60.0 + hot + (h % 24) as f64 * 0.5)
                    .with(WeatherField::WindSpeed, 5.0)
                    .with(WeatherField::Humidity, 50.0)
            })
            .collect();
        let location = Location::new(
            "Test_Park_".to_string(),
            "Test Park".to_string(),
            "UTC".to_string(),
            FixedOffset::east_opt(0).unwrap(),
        );
        let repository = Arc::new(StubRepository(Arc::new(LocationReadings::new(location, readings))));
        DashboardService::new(repository, dashboard_config)
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_location() {
        let dashboard = service()
            .build_dashboard("nowhere", &[date(15)], &UserPreferences::default())
            .await
            .unwrap();
        assert!(dashboard.is_none());
    }

    #[tokio::test]
    async fn test_sibling_charts_share_axis() {
        let dashboard = service()
            .build_dashboard("Test_Park_", &[date(15), date(16)], &UserPreferences::default())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(dashboard.title, "Test Park Weather (afternoon)");
        assert_eq!(dashboard.days.len(), 2);

        let temperature_axes: Vec<AxisRange> = dashboard
            .days
            .iter()
            .flat_map(|day| day.charts.iter())
            .filter(|chart| chart.field == WeatherField::Temperature)
            .map(|chart| chart.axis)
            .collect();
        assert_eq!(temperature_axes.len(), 2);
        assert_eq!(temperature_axes[0], temperature_axes[1]);

        let cool = dashboard.days[0].charts[0].data_range.unwrap();
        let hot = dashboard.days[1].charts[0].data_range.unwrap();
        assert!(temperature_axes[0].min <= cool.min);
        assert!(temperature_axes[0].max >= hot.max);
    }

    #[tokio::test]
    async fn test_day_card_reports_preferences() {
        let dashboard = service()
            .build_dashboard("Test_Park_", &[date(15), date(16)], &UserPreferences::default())
            .await
            .unwrap()
            .unwrap();

        // Day one stays within 60..80 all afternoon; day two is above 80.
        let cool = &dashboard.days[0].combined;
        assert_eq!(cool.valid_time_ranges, vec!["12 PM - 6 PM"]);
        assert!(cool.violations.is_empty());

        let hot = &dashboard.days[1].combined;
        assert!(hot.valid_time_ranges.is_empty());
        assert!(hot.violated_fields().contains(&WeatherField::Temperature));

        let chart = &dashboard.days[0].charts[0];
        assert_eq!(chart.points.len(), 11);
        assert!(!chart.ticks.is_empty());
    }

    #[tokio::test]
    async fn test_date_without_readings_has_empty_charts() {
        let dashboard = service()
            .build_dashboard("Test_Park_", &[date(20)], &UserPreferences::default())
            .await
            .unwrap()
            .unwrap();

        let day = &dashboard.days[0];
        assert!(day.combined.valid_time_ranges.is_empty());
        assert!(day.charts.iter().all(|chart| chart.points.is_empty() && chart.data_range.is_none()));
    }

    #[tokio::test]
    async fn test_only_charts_with_preferences() {
        let service = service_with(DashboardConfig {
            only_charts_with_preferences: true,
            ..DashboardConfig::default()
        });
        let dashboard = service
            .build_dashboard("Test_Park_", &[date(15)], &UserPreferences::default())
            .await
            .unwrap()
            .unwrap();

        let fields: Vec<WeatherField> = dashboard.days[0].charts.iter().map(|c| c.field).collect();
        assert_eq!(
            fields,
            vec![
                WeatherField::Temperature,
                WeatherField::WindSpeed,
                WeatherField::PrecipitationProbability,
            ]
        );
    }
}
