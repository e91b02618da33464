// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::location_service::LocationService;

#[derive(Clone)]
pub struct AppState {
    pub location_service: LocationService,
    pub dashboard_service: DashboardService,
}
