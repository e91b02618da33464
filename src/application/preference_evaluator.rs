// Preference evaluation - single-field and combined constraint analysis
use crate::application::segmenter::{interpolate_crossing, Membership, Segmenter};
use crate::domain::analysis::{
    CombinedAnalysis, FieldAnalysis, FieldSummary, Segment, Violation, ViolationKind,
};
use crate::domain::preference::{RangeConstraint, TimeWindow, WeatherPreferences};
use crate::domain::reading::{Reading, WeatherField};
use chrono::TimeZone;
use std::fmt::Display;

struct FieldMembership<'a> {
    field: WeatherField,
    constraint: &'a RangeConstraint,
}

impl Membership for FieldMembership<'_> {
    fn contains(&self, reading: &Reading) -> bool {
        self.constraint.contains(reading.value(self.field))
    }

    fn crossing_ms(&self, before: &Reading, after: &Reading) -> Option<i64> {
        let v0 = before.value(self.field);
        let v1 = after.value(self.field);
        let outside = if self.constraint.contains(v0) { v1 } else { v0 };
        let bound = self.constraint.bound_exceeded_by(outside)?;
        interpolate_crossing((before.time_ms(), v0), (after.time_ms(), v1), bound)
    }
}

/// Every active constraint must hold at once.
struct AllPreferences<'a> {
    constraints: Vec<FieldMembership<'a>>,
}

impl<'a> AllPreferences<'a> {
    fn new(preferences: &'a WeatherPreferences) -> Self {
        let constraints = preferences
            .iter()
            .map(|(field, constraint)| FieldMembership { field, constraint })
            .collect();
        Self { constraints }
    }
}

impl Membership for AllPreferences<'_> {
    fn contains(&self, reading: &Reading) -> bool {
        self.constraints.iter().all(|c| c.contains(reading))
    }

    // Entering happens when the last field comes back in range; leaving
    // happens as soon as the first field drops out.
    fn crossing_ms(&self, before: &Reading, after: &Reading) -> Option<i64> {
        let entering = !self.contains(before);
        let crossings = self.constraints.iter().filter_map(|c| {
            let flipped = if entering {
                !c.contains(before) && c.contains(after)
            } else {
                c.contains(before) && !c.contains(after)
            };
            if flipped { c.crossing_ms(before, after) } else { None }
        });

        if entering { crossings.max() } else { crossings.min() }
    }
}

fn collect_violations(reading: &Reading, preferences: &WeatherPreferences, out: &mut Vec<Violation>) {
    for (field, constraint) in preferences.iter() {
        let value = reading.value(field);
        let breaches = [
            (ViolationKind::Min, constraint.min.filter(|min| value < *min)),
            (ViolationKind::Max, constraint.max.filter(|max| value > *max)),
        ];
        for (kind, limit) in breaches {
            if let Some(limit) = limit {
                out.push(Violation {
                    field,
                    value,
                    limit,
                    kind,
                    timestamp: reading.timestamp,
                });
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct PreferenceEvaluator<Tz: TimeZone> {
    segmenter: Segmenter,
    tz: Tz,
}

impl<Tz> PreferenceEvaluator<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    pub fn new(min_duration_hours: f64, tz: Tz) -> Self {
        Self {
            segmenter: Segmenter::new(min_duration_hours),
            tz,
        }
    }

    pub fn with_gap_threshold_minutes(mut self, minutes: i64) -> Self {
        self.segmenter = self.segmenter.with_gap_threshold_minutes(minutes);
        self
    }

    /// Segment one field's series against its constraint. A missing constraint
    /// yields an empty analysis rather than an error.
    pub fn analyze_field(
        &self,
        readings: &[Reading],
        field: WeatherField,
        constraint: Option<&RangeConstraint>,
    ) -> FieldAnalysis {
        let Some(constraint) = constraint else {
            return FieldAnalysis::empty(field);
        };

        let membership = FieldMembership { field, constraint };
        let segments = self.segmenter.segment(readings, &membership);

        let total_duration_ms: i64 = segments.iter().map(Segment::duration_ms).sum();
        let retained: Vec<&Segment> = segments
            .iter()
            .filter(|s| self.segmenter.meets_minimum(s))
            .collect();
        let in_range_duration_ms = self.in_range_interval_ms(readings, &membership);
        let percent_in_range = if total_duration_ms > 0 {
            in_range_duration_ms as f64 / total_duration_ms as f64 * 100.0
        } else {
            0.0
        };
        let valid_ranges = retained.iter().map(|s| s.label(&self.tz)).collect();

        tracing::debug!(
            "{}: {} segments, {} retained, {:.1}% in range",
            field,
            segments.len(),
            retained.len(),
            percent_in_range
        );

        FieldAnalysis {
            field,
            segments,
            summary: FieldSummary {
                total_duration_ms,
                in_range_duration_ms,
                percent_in_range,
                valid_ranges,
            },
        }
    }

    /// Find periods where every constraint holds inside the optional daily
    /// window, and collect every individual violation without short-circuiting.
    pub fn evaluate_combined(
        &self,
        readings: &[Reading],
        preferences: &WeatherPreferences,
        window: Option<&TimeWindow>,
    ) -> CombinedAnalysis {
        let windowed: Vec<&Reading> = readings
            .iter()
            .filter(|r| self.in_window(r, window))
            .collect();

        let mut violations = Vec::new();
        for reading in &windowed {
            collect_violations(reading, preferences, &mut violations);
        }

        let membership = AllPreferences::new(preferences);
        let segments = self.segmenter.segment(windowed.iter().copied(), &membership);

        let mut valid_segments = Vec::new();
        for segment in segments.into_iter().filter(|s| s.in_range) {
            if self.segmenter.meets_minimum(&segment) {
                valid_segments.push(segment);
            } else {
                tracing::debug!(
                    "Discarding {} ms segment shorter than {} ms",
                    segment.duration_ms(),
                    self.segmenter.min_duration_ms()
                );
            }
        }

        tracing::debug!(
            "Combined analysis over {} readings: {} valid ranges, {} violations",
            windowed.len(),
            valid_segments.len(),
            violations.len()
        );

        CombinedAnalysis {
            valid_time_ranges: valid_segments.iter().map(|s| s.label(&self.tz)).collect(),
            valid_segments,
            violations,
        }
    }

    /// Sum of sample-to-next-sample intervals that start in range and are
    /// individually at least the minimum duration.
    fn in_range_interval_ms<M: Membership>(&self, readings: &[Reading], membership: &M) -> i64 {
        readings
            .windows(2)
            .filter(|pair| membership.contains(&pair[0]))
            .map(|pair| pair[1].time_ms() - pair[0].time_ms())
            .filter(|interval| *interval >= self.segmenter.min_duration_ms())
            .sum()
    }

    fn in_window(&self, reading: &Reading, window: Option<&TimeWindow>) -> bool {
        match window {
            Some(window) => reading
                .local_hour(&self.tz)
                .is_some_and(|hour| window.contains_hour(hour)),
            None => true,
        }
    }
}
