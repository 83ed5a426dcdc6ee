use crate::models::Place;
use crate::routing::traits::DistanceLookup;
use anyhow::Result;
use async_trait::async_trait;

/// Typical ratio of road miles to great-circle miles for US interstate lanes
pub const DEFAULT_CIRCUITY: f64 = 1.2;

/// Offline distance estimate: great-circle miles scaled by a circuity factor
#[derive(Debug, Clone)]
pub struct StraightLineLookup {
    circuity: f64,
}

impl StraightLineLookup {
    pub fn new() -> Self {
        Self::with_circuity(DEFAULT_CIRCUITY)
    }

    pub fn with_circuity(circuity: f64) -> Self {
        Self { circuity }
    }
}

impl Default for StraightLineLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DistanceLookup for StraightLineLookup {
    async fn miles(&self, origin: &Place, destination: &Place) -> Result<f64> {
        let miles = origin.great_circle_miles(destination) * self.circuity;
        if !(miles.is_finite() && miles > 0.0) {
            anyhow::bail!("No distance between {} and {}", origin, destination);
        }
        Ok(miles)
    }

    fn source_name(&self) -> &'static str {
        "straight-line"
    }
}
