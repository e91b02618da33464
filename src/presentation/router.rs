// HTTP routes and middleware
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    available_dates, build_dashboard, health_check, list_activities, list_locations,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/activities", get(list_activities))
        .route("/locations", get(list_locations))
        .route("/locations/:id/dates", get(available_dates))
        .route("/locations/:id/dashboard", post(build_dashboard))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
