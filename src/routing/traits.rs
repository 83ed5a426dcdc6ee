use crate::models::Place;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for all road-distance sources
/// The load generator only needs miles between two places, so OSRM, a fixed
/// table or an offline estimate can be swapped freely
#[async_trait]
pub trait DistanceLookup: Send + Sync {
    /// Road distance in miles from `origin` to `destination`
    async fn miles(&self, origin: &Place, destination: &Place) -> Result<f64>;

    /// Get the name of the distance source
    fn source_name(&self) -> &'static str;
}
