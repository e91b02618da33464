// Repository trait for weather reading access
use crate::domain::location::{Location, LocationReadings};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait ReadingRepository: Send + Sync {
    /// List all locations with readings
    async fn list_locations(&self) -> anyhow::Result<Vec<Location>>;

    /// All readings for a location, sorted ascending by timestamp
    async fn get_readings(&self, location_id: &str) -> anyhow::Result<Option<Arc<LocationReadings>>>;
}
