// HTTP request handlers
use crate::domain::preference::{weekday_from_index, TimeWindow, UserPreferences, ACTIVITY_PRESETS};
use crate::presentation::app_state::AppState;
use crate::presentation::dto::{
    ActivityDto, DashboardDto, DashboardRequest, DatesDto, DatesQuery, LocationDto, TimeWindowDto,
};
use crate::presentation::error::AppError;
use crate::presentation::mapper::{activity_to_dto, dashboard_to_dto, location_to_dto};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Weekday;
use std::sync::Arc;

/// Upper bound on day cards built by a single dashboard request
pub const MAX_DATES_PER_DASHBOARD: usize = 31;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Named activity presets a dashboard request can apply
pub async fn list_activities() -> Json<Vec<ActivityDto>> {
    Json(ACTIVITY_PRESETS.iter().map(activity_to_dto).collect())
}

/// List all locations with loaded readings
pub async fn list_locations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LocationDto>>, AppError> {
    let locations = state.location_service.list_locations().await?;
    Ok(Json(locations.iter().map(location_to_dto).collect()))
}

/// Dates whose readings cover the requested time window
pub async fn available_dates(
    Path(id): Path<String>,
    Query(query): Query<DatesQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<DatesDto>, AppError> {
    let window = TimeWindow::try_from(TimeWindowDto {
        preset: query.preset,
        start_hour: query.start_hour,
        end_hour: query.end_hour,
    })?;
    let preferred_day = parse_day(query.day.as_deref())?;

    let availability = state
        .location_service
        .available_dates(&id, &window, preferred_day)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("unknown location {}", id)))?;

    Ok(Json(DatesDto {
        location_id: id,
        dates: availability.dates,
        first_reading: availability.time_range.map(|(first, _)| first),
        last_reading: availability.time_range.map(|(_, last)| last),
    }))
}

/// Evaluate preferences over each requested date
pub async fn build_dashboard(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<DashboardRequest>,
) -> Result<Json<DashboardDto>, AppError> {
    if request.dates.len() > MAX_DATES_PER_DASHBOARD {
        return Err(AppError::BadRequest(format!(
            "at most {} dates per dashboard, got {}",
            MAX_DATES_PER_DASHBOARD,
            request.dates.len()
        )));
    }

    let preferences = match request.preferences {
        Some(dto) => UserPreferences::try_from(dto)?,
        None => UserPreferences::default(),
    };

    let dashboard = state
        .dashboard_service
        .build_dashboard(&id, &request.dates, &preferences)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("unknown location {}", id)))?;

    Ok(Json(dashboard_to_dto(dashboard)))
}

/// Missing means the default preferred day, "none" disables the filter
fn parse_day(day: Option<&str>) -> Result<Option<Weekday>, AppError> {
    match day {
        None => Ok(UserPreferences::default().preferred_day),
        Some(value) if value.eq_ignore_ascii_case("none") => Ok(None),
        Some(value) => {
            let index: u8 = value
                .parse()
                .map_err(|_| AppError::BadRequest(format!("invalid day {}", value)))?;
            Ok(Some(weekday_from_index(index)?))
        }
    }
}
