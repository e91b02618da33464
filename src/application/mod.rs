// Application layer - Preference engine and use cases
pub mod availability;
pub mod axis_registry;
pub mod dashboard_service;
pub mod location_service;
pub mod preference_evaluator;
pub mod reading_repository;
pub mod segmenter;
