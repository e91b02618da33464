use crate::application::axis_registry::{AxisLimit, AxisLimitRegistry};
use crate::application::availability::DEFAULT_BUFFER_HOURS;
use crate::application::segmenter::DEFAULT_GAP_THRESHOLD_MINUTES;
use crate::domain::reading::WeatherField;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataSettings {
    pub directory: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            directory: "data".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardConfig {
    pub buffer_hours: f64,
    pub gap_threshold_minutes: i64,
    pub value_padding_factor: f64,
    pub visible_fields: Vec<WeatherField>,
    /// Skip charts for fields the user has no constraint on
    pub only_charts_with_preferences: bool,
    pub axis: BTreeMap<WeatherField, AxisSettings>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            buffer_hours: DEFAULT_BUFFER_HOURS,
            gap_threshold_minutes: DEFAULT_GAP_THRESHOLD_MINUTES,
            value_padding_factor: 0.1,
            visible_fields: WeatherField::ALL.to_vec(),
            only_charts_with_preferences: false,
            axis: BTreeMap::new(),
        }
    }
}

impl DashboardConfig {
    pub fn axis_limits(&self) -> BTreeMap<WeatherField, AxisLimit> {
        self.axis
            .iter()
            .map(|(field, settings)| (*field, AxisLimit::from(settings.clone())))
            .collect()
    }

    /// A fresh registry for one dashboard view session.
    pub fn new_registry(&self) -> AxisLimitRegistry {
        AxisLimitRegistry::new(self.axis_limits())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AxisSettings {
    pub min: f64,
    pub max: f64,
    pub increment: f64,
    pub color: String,
    pub hard_min: Option<f64>,
    pub hard_max: Option<f64>,
}

impl From<AxisSettings> for AxisLimit {
    fn from(settings: AxisSettings) -> Self {
        AxisLimit {
            min: settings.min,
            max: settings.max,
            increment: settings.increment,
            color: settings.color,
            hard_min: settings.hard_min,
            hard_max: settings.hard_max,
        }
    }
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    load("config/server")
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    load("config/dashboard")
}

/// Read `<name>.toml` if present, then apply `WEATHER__SECTION__KEY` overrides.
fn load<T: DeserializeOwned>(name: &str) -> anyhow::Result<T> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(name).required(false))
        .add_source(
            config::Environment::with_prefix("WEATHER")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::AxisRange;

    fn from_toml<T: DeserializeOwned>(toml: &str) -> T {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_dashboard_config_from_toml() {
        let config: DashboardConfig = from_toml(
            r#"
            buffer_hours = 1.0
            visible_fields = ["temperature", "humidity"]

            [axis.temperature]
            min = 10.0
            max = 30.0
            increment = 2.0
            color = "orange"
            hard_min = -40.0
            "#,
        );

        assert_eq!(config.buffer_hours, 1.0);
        assert!(!config.only_charts_with_preferences);
        assert_eq!(config.gap_threshold_minutes, DEFAULT_GAP_THRESHOLD_MINUTES);
        assert_eq!(
            config.visible_fields,
            vec![WeatherField::Temperature, WeatherField::Humidity]
        );

        let registry = config.new_registry();
        assert_eq!(
            registry.current_limits(WeatherField::Temperature),
            AxisRange::new(10.0, 30.0)
        );
        assert_eq!(registry.limit(WeatherField::Temperature).hard_max, None);
        assert_eq!(
            registry.current_limits(WeatherField::WindSpeed),
            AxisRange::new(0.0, 20.0)
        );
    }

    #[test]
    fn test_app_config_defaults() {
        let config: AppConfig = from_toml("");
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.data.directory, "data");
    }
}
