use crate::models::Place;
use crate::routing::traits::DistanceLookup;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Fixed table of road miles from a single origin, keyed by destination city/state
#[derive(Debug, Clone)]
pub struct DistanceTable {
    origin: Place,
    miles: HashMap<(String, String), f64>,
}

impl DistanceTable {
    pub fn new(origin: Place) -> Self {
        Self {
            origin,
            miles: HashMap::new(),
        }
    }

    pub fn insert(&mut self, city: &str, state: &str, miles: f64) {
        self.miles.insert((city.to_string(), state.to_string()), miles);
    }

    /// Builder-style `insert`
    pub fn with(mut self, city: &str, state: &str, miles: f64) -> Self {
        self.insert(city, state, miles);
        self
    }
}

#[async_trait]
impl DistanceLookup for DistanceTable {
    async fn miles(&self, origin: &Place, destination: &Place) -> Result<f64> {
        if !origin.same_city(&self.origin) {
            anyhow::bail!("Distance table has no entries from {}", origin);
        }

        self.miles
            .get(&(destination.city.clone(), destination.state.clone()))
            .copied()
            .ok_or_else(|| anyhow::anyhow!("No distance from {} to {}", origin, destination))
    }

    fn source_name(&self) -> &'static str {
        "table"
    }
}
