// Mapper to convert domain models to response bodies
use crate::domain::analysis::{Segment, Violation};
use crate::domain::dashboard::{AxisRange, ChartData, Dashboard, DayCard};
use crate::domain::location::Location;
use crate::domain::preference::ActivityPreset;
use crate::presentation::dto::{
    ActivityDto, AxisDto, ChartDto, ConstraintDto, DashboardDto, DayCardDto, LocationDto, PointDto,
    SegmentDto, ViolationDto,
};
use chrono::FixedOffset;

pub fn dashboard_to_dto(dashboard: Dashboard) -> DashboardDto {
    let tz = dashboard.location.utc_offset;

    let days: Vec<DayCardDto> = dashboard
        .days
        .into_iter()
        .map(|day| day_to_dto(day, &tz))
        .collect();

    DashboardDto {
        title: dashboard.title,
        location: location_to_dto(&dashboard.location),
        days,
    }
}

pub fn location_to_dto(location: &Location) -> LocationDto {
    LocationDto {
        id: location.id.clone(),
        name: location.name.clone(),
        resolved_address: location.resolved_address.clone(),
        timezone: location.timezone.clone(),
        utc_offset_seconds: location.utc_offset.local_minus_utc(),
    }
}

pub fn activity_to_dto(activity: &ActivityPreset) -> ActivityDto {
    ActivityDto {
        name: activity.name.to_string(),
        constraints: activity
            .constraints()
            .map(|(field, constraint)| {
                (
                    field,
                    ConstraintDto {
                        min: constraint.min,
                        max: constraint.max,
                    },
                )
            })
            .collect(),
    }
}

fn day_to_dto(day: DayCard, tz: &FixedOffset) -> DayCardDto {
    let charts: Vec<ChartDto> = day
        .charts
        .into_iter()
        .map(|chart| chart_to_dto(chart, tz))
        .collect();

    DayCardDto {
        date: day.date,
        weekday: day.date.format("%A").to_string(),
        valid_time_ranges: day.combined.valid_time_ranges,
        valid_segments: day
            .combined
            .valid_segments
            .iter()
            .map(|segment| segment_to_dto(segment, tz))
            .collect(),
        violations: day.combined.violations.into_iter().map(violation_to_dto).collect(),
        charts,
    }
}

fn chart_to_dto(chart: ChartData, tz: &FixedOffset) -> ChartDto {
    let points: Vec<PointDto> = chart
        .points
        .into_iter()
        .map(|point| PointDto {
            time_ms: point.time_ms,
            value: point.value,
        })
        .collect();

    ChartDto {
        field: chart.field,
        title: chart.title,
        unit: chart.unit,
        color: chart.color,
        points,
        data_range: chart.data_range.map(axis_to_dto),
        axis: axis_to_dto(chart.axis),
        ticks: chart.ticks,
        segments: chart
            .analysis
            .segments
            .iter()
            .map(|segment| segment_to_dto(segment, tz))
            .collect(),
        valid_ranges: chart.analysis.summary.valid_ranges,
        percent_in_range: chart.analysis.summary.percent_in_range,
    }
}

fn axis_to_dto(axis: AxisRange) -> AxisDto {
    AxisDto {
        min: axis.min,
        max: axis.max,
    }
}

fn segment_to_dto(segment: &Segment, tz: &FixedOffset) -> SegmentDto {
    SegmentDto {
        start_ms: segment.start_ms,
        end_ms: segment.end_ms,
        in_range: segment.in_range,
        label: segment.label(tz),
    }
}

fn violation_to_dto(violation: Violation) -> ViolationDto {
    ViolationDto {
        field: violation.field,
        value: violation.value,
        limit: violation.limit,
        kind: violation.kind.as_str().to_string(),
        timestamp: violation.timestamp,
    }
}
