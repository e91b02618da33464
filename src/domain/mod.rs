// Domain layer - Weather readings, preferences and analysis results
pub mod analysis;
pub mod dashboard;
pub mod error;
pub mod location;
pub mod preference;
pub mod reading;
