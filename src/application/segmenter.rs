// Time-series segmentation shared by single-field and combined evaluation
use crate::domain::analysis::Segment;
use crate::domain::reading::Reading;

pub const MS_PER_HOUR: i64 = 60 * 60 * 1000;
pub const DEFAULT_GAP_THRESHOLD_MINUTES: i64 = 70;

/// Decides which readings belong to the "in range" state.
pub trait Membership {
    fn contains(&self, reading: &Reading) -> bool;

    /// Interpolated instant (epoch ms) at which membership flips between two
    /// consecutive samples. `None` falls back to the later sample's time.
    fn crossing_ms(&self, before: &Reading, after: &Reading) -> Option<i64>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segmenter {
    min_duration_ms: i64,
    gap_threshold_ms: i64,
}

impl Segmenter {
    pub fn new(min_duration_hours: f64) -> Self {
        Self {
            min_duration_ms: (min_duration_hours * MS_PER_HOUR as f64).round() as i64,
            gap_threshold_ms: DEFAULT_GAP_THRESHOLD_MINUTES * 60 * 1000,
        }
    }

    pub fn with_gap_threshold_minutes(mut self, minutes: i64) -> Self {
        self.gap_threshold_ms = minutes * 60 * 1000;
        self
    }

    pub fn min_duration_ms(&self) -> i64 {
        self.min_duration_ms
    }

    /// Walk time-ordered readings once, splitting on membership flips and on
    /// gaps wider than the discontinuity threshold. Flips share an
    /// interpolated endpoint; gaps close without interpolation.
    pub fn segment<'a, M, I>(&self, readings: I, membership: &M) -> Vec<Segment>
    where
        M: Membership + ?Sized,
        I: IntoIterator<Item = &'a Reading>,
    {
        let mut segments = Vec::new();
        let mut current: Option<Segment> = None;
        let mut previous: Option<(&Reading, bool)> = None;

        for reading in readings {
            let time = reading.time_ms();
            let in_range = membership.contains(reading);

            let next = match (current.take(), previous) {
                (Some(mut segment), Some((prev, prev_in_range))) => {
                    let prev_time = prev.time_ms();
                    if time - prev_time > self.gap_threshold_ms {
                        segments.push(segment);
                        Segment::point(time, in_range)
                    } else if prev_in_range != in_range {
                        let crossing = membership
                            .crossing_ms(prev, reading)
                            .unwrap_or(time)
                            .clamp(prev_time, time);
                        segment.end_ms = crossing;
                        segments.push(segment);
                        Segment::new(crossing, time, in_range)
                    } else {
                        segment.end_ms = time;
                        segment
                    }
                }
                _ => Segment::point(time, in_range),
            };

            current = Some(next);
            previous = Some((reading, in_range));
        }

        if let Some(segment) = current {
            segments.push(segment);
        }

        segments
    }

    /// In-range and at least the minimum duration (boundary inclusive).
    pub fn meets_minimum(&self, segment: &Segment) -> bool {
        segment.in_range && segment.duration_ms() >= self.min_duration_ms
    }
}

/// Linear interpolation of the instant `value` is reached between two samples.
pub fn interpolate_crossing(before: (i64, f64), after: (i64, f64), value: f64) -> Option<i64> {
    let (t0, v0) = before;
    let (t1, v1) = after;
    if v1 == v0 || !(v1 - v0).is_finite() {
        return None;
    }
    let fraction = ((value - v0) / (v1 - v0)).clamp(0.0, 1.0);
    Some(t0 + ((t1 - t0) as f64 * fraction).round() as i64)
}
