// Infrastructure layer - Configuration and data loading adapters
pub mod config;
pub mod file_repository;
