// Shared axis limits - keeps sibling charts of the same field on one scale
use crate::domain::dashboard::AxisRange;
use crate::domain::reading::WeatherField;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct AxisLimit {
    pub min: f64,
    pub max: f64,
    pub increment: f64,
    pub color: String,
    pub hard_min: Option<f64>,
    pub hard_max: Option<f64>,
}

impl AxisLimit {
    pub fn default_for(field: WeatherField) -> Self {
        let (min, max, increment, color, hard_min, hard_max) = match field {
            WeatherField::Temperature => (50.0, 60.0, 5.0, "red", -60.0, 130.0),
            WeatherField::WindSpeed => (0.0, 20.0, 5.0, "blue", 0.0, 100.0),
            WeatherField::PrecipitationProbability => (0.0, 100.0, 10.0, "green", 0.0, 100.0),
            WeatherField::Humidity => (0.0, 100.0, 10.0, "purple", 0.0, 100.0),
        };
        Self {
            min,
            max,
            increment,
            color: color.to_string(),
            hard_min: Some(hard_min),
            hard_max: Some(hard_max),
        }
    }

    pub fn range(&self) -> AxisRange {
        AxisRange::new(self.min, self.max)
    }

    fn widen(&mut self, min: f64, max: f64) {
        let (rounded_min, rounded_max) = if self.increment > 0.0 {
            (
                (min / self.increment).floor() * self.increment,
                (max / self.increment).ceil() * self.increment,
            )
        } else {
            (min, max)
        };

        let mut widened_min = self.min.min(rounded_min);
        let mut widened_max = self.max.max(rounded_max);
        if let Some(hard_min) = self.hard_min {
            widened_min = widened_min.max(hard_min);
        }
        if let Some(hard_max) = self.hard_max {
            widened_max = widened_max.min(hard_max);
        }

        self.min = widened_min;
        self.max = widened_max;
    }
}

/// Axis limits for one dashboard view session.
///
/// Charts register their local ranges first, then read back the converged
/// limits. Registration only ever widens a field's range, so the result does
/// not depend on the order charts register in.
#[derive(Debug, Clone)]
pub struct AxisLimitRegistry {
    defaults: BTreeMap<WeatherField, AxisLimit>,
    current: BTreeMap<WeatherField, AxisLimit>,
}

impl AxisLimitRegistry {
    pub fn new(mut defaults: BTreeMap<WeatherField, AxisLimit>) -> Self {
        for field in WeatherField::ALL {
            defaults
                .entry(field)
                .or_insert_with(|| AxisLimit::default_for(field));
        }
        Self {
            current: defaults.clone(),
            defaults,
        }
    }

    pub fn register_limit(&mut self, field: WeatherField, min: f64, max: f64) {
        if !min.is_finite() || !max.is_finite() {
            tracing::debug!("Ignoring non-finite {} range {}..{}", field, min, max);
            return;
        }
        self.current
            .entry(field)
            .or_insert_with(|| AxisLimit::default_for(field))
            .widen(min, max);
    }

    pub fn register_range(&mut self, field: WeatherField, range: AxisRange) {
        self.register_limit(field, range.min, range.max);
    }

    pub fn current_limits(&self, field: WeatherField) -> AxisRange {
        self.limit(field).range()
    }

    pub fn limit(&self, field: WeatherField) -> AxisLimit {
        self.current
            .get(&field)
            .cloned()
            .unwrap_or_else(|| AxisLimit::default_for(field))
    }

    pub fn default_limit(&self, field: WeatherField) -> AxisLimit {
        self.defaults
            .get(&field)
            .cloned()
            .unwrap_or_else(|| AxisLimit::default_for(field))
    }

    pub fn reset(&mut self) {
        self.current = self.defaults.clone();
    }
}

impl Default for AxisLimitRegistry {
    fn default() -> Self {
        Self::new(BTreeMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults() {
        let registry = AxisLimitRegistry::default();
        assert_eq!(
            registry.current_limits(WeatherField::Temperature),
            AxisRange::new(50.0, 60.0)
        );
        assert_eq!(registry.limit(WeatherField::Humidity).color, "purple");
    }

    #[test]
    fn test_register_rounds_to_increment() {
        let mut registry = AxisLimitRegistry::default();
        registry.register_limit(WeatherField::Temperature, 56.8, 71.2);
        assert_eq!(
            registry.current_limits(WeatherField::Temperature),
            AxisRange::new(50.0, 75.0)
        );

        registry.register_limit(WeatherField::Temperature, 41.0, 62.0);
        assert_eq!(
            registry.current_limits(WeatherField::Temperature),
            AxisRange::new(40.0, 75.0)
        );
    }

    #[test]
    fn test_register_never_narrows() {
        let mut registry = AxisLimitRegistry::default();
        registry.register_limit(WeatherField::WindSpeed, 0.0, 42.0);
        registry.register_limit(WeatherField::WindSpeed, 3.0, 7.0);
        assert_eq!(
            registry.current_limits(WeatherField::WindSpeed),
            AxisRange::new(0.0, 45.0)
        );
    }

    #[test]
    fn test_hard_bounds_clamp() {
        let mut registry = AxisLimitRegistry::default();
        registry.register_limit(WeatherField::Humidity, -12.0, 117.0);
        assert_eq!(
            registry.current_limits(WeatherField::Humidity),
            AxisRange::new(0.0, 100.0)
        );
    }

    #[test]
    fn test_fields_are_independent() {
        let mut registry = AxisLimitRegistry::default();
        registry.register_limit(WeatherField::Temperature, 20.0, 95.0);
        assert_eq!(
            registry.current_limits(WeatherField::WindSpeed),
            AxisRange::new(0.0, 20.0)
        );
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut registry = AxisLimitRegistry::default();
        registry.register_limit(WeatherField::Temperature, 20.0, 95.0);
        registry.reset();
        assert_eq!(
            registry.current_limits(WeatherField::Temperature),
            AxisRange::new(50.0, 60.0)
        );
    }

    #[test]
    fn test_non_finite_is_ignored() {
        let mut registry = AxisLimitRegistry::default();
        registry.register_limit(WeatherField::Temperature, f64::NAN, 200.0);
        assert_eq!(
            registry.current_limits(WeatherField::Temperature),
            AxisRange::new(50.0, 60.0)
        );
    }

    #[test]
    fn test_custom_defaults_fill_missing_fields() {
        let mut defaults = BTreeMap::new();
        defaults.insert(
            WeatherField::Temperature,
            AxisLimit {
                min: 10.0,
                max: 30.0,
                increment: 2.0,
                color: "orange".to_string(),
                hard_min: None,
                hard_max: None,
            },
        );
        let mut registry = AxisLimitRegistry::new(defaults);
        registry.register_limit(WeatherField::Temperature, -3.0, 31.0);

        assert_eq!(
            registry.current_limits(WeatherField::Temperature),
            AxisRange::new(-4.0, 32.0)
        );
        assert_eq!(registry.limit(WeatherField::WindSpeed).color, "blue");
    }

    fn ranges() -> impl Strategy<Value = Vec<(f64, f64)>> {
        prop::collection::vec((-100.0f64..150.0, -100.0f64..150.0), 1..12)
    }

    proptest! {
        #[test]
        fn prop_widening_is_monotonic(pairs in ranges()) {
            let mut registry = AxisLimitRegistry::default();
            let mut last = registry.current_limits(WeatherField::Temperature);
            for (a, b) in pairs {
                registry.register_limit(WeatherField::Temperature, a.min(b), a.max(b));
                let now = registry.current_limits(WeatherField::Temperature);
                prop_assert!(now.min <= last.min);
                prop_assert!(now.max >= last.max);
                last = now;
            }
        }

        #[test]
        fn prop_registration_order_does_not_matter(pairs in ranges()) {
            let mut forward = AxisLimitRegistry::default();
            let mut backward = AxisLimitRegistry::default();
            for (a, b) in &pairs {
                forward.register_limit(WeatherField::Temperature, *a, *b);
            }
            for (a, b) in pairs.iter().rev() {
                backward.register_limit(WeatherField::Temperature, *a, *b);
            }
            prop_assert_eq!(
                forward.current_limits(WeatherField::Temperature),
                backward.current_limits(WeatherField::Temperature)
            );
        }
    }
}
