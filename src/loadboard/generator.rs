use crate::error::GenerateError;
use crate::loadboard::cities::{reference_cities, select_destinations, within_radius};
use crate::loadboard::pricing::{price_load, PricingTable};
use crate::models::{Equipment, Lane, Load, Place};
use crate::routing::DistanceLookup;
use chrono::{Local, NaiveDate};
use futures::future::join_all;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Destinations used when the caller does not ask for a specific count
pub const DEFAULT_DESTINATION_COUNT: usize = 6;

/// Default per-destination distance lookup timeout
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(8);

/// One load-board query
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub origin: Place,
    /// Candidate destinations, sampled down to `count`
    pub candidates: Vec<Place>,
    pub equipment: Vec<Equipment>,
    pub count: usize,
    pub pickup_date: NaiveDate,
    /// Only consider candidates within this many great-circle miles of the origin
    pub radius_miles: Option<f64>,
}

impl LoadRequest {
    /// Request against the reference city list, picking up today
    pub fn new(origin: Place, equipment: Vec<Equipment>) -> Self {
        Self {
            origin,
            candidates: reference_cities(),
            equipment,
            count: DEFAULT_DESTINATION_COUNT,
            pickup_date: Local::now().date_naive(),
            radius_miles: None,
        }
    }

    pub fn with_candidates(mut self, candidates: Vec<Place>) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_pickup_date(mut self, pickup_date: NaiveDate) -> Self {
        self.pickup_date = pickup_date;
        self
    }

    pub fn with_radius(mut self, radius_miles: f64) -> Self {
        self.radius_miles = Some(radius_miles);
        self
    }
}

fn require_equipment(equipment: &[Equipment]) -> Result<(), GenerateError> {
    if equipment.is_empty() {
        return Err(GenerateError::InvalidInput(
            "at least one equipment type is required".to_string(),
        ));
    }
    Ok(())
}

fn validate(request: &LoadRequest) -> Result<(), GenerateError> {
    require_equipment(&request.equipment)?;
    if request.count == 0 {
        return Err(GenerateError::InvalidInput(
            "destination count must be positive".to_string(),
        ));
    }
    if let Some(radius) = request.radius_miles {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(GenerateError::InvalidInput(format!(
                "search radius {} must be a positive number of miles",
                radius
            )));
        }
    }
    Ok(())
}

/// Price every (lane, equipment) pair, lanes first then equipment in request order.
///
/// Lanes whose distance is unusable are skipped.
pub fn build_loads<R: Rng + ?Sized>(
    table: &PricingTable,
    origin: &Place,
    lanes: &[Lane],
    equipment: &[Equipment],
    pickup_date: NaiveDate,
    rng: &mut R,
) -> Result<Vec<Load>, GenerateError> {
    require_equipment(equipment)?;
    table.validate()?;

    let mut loads = Vec::with_capacity(lanes.len() * equipment.len());
    for lane in lanes {
        for &kind in equipment {
            match price_load(table, origin, lane, kind, pickup_date, rng) {
                Some(load) => loads.push(load),
                None => {
                    warn!(
                        "Skipping {} -> {}: unusable distance {}",
                        origin, lane.destination, lane.miles
                    );
                    break;
                }
            }
        }
    }

    Ok(loads)
}

/// Synthetic load board backed by a distance source
pub struct LoadGenerator {
    lookup: Arc<dyn DistanceLookup>,
    lookup_timeout: Duration,
    pricing: PricingTable,
}

impl LoadGenerator {
    pub fn new(lookup: Arc<dyn DistanceLookup>) -> Self {
        Self {
            lookup,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            pricing: PricingTable::default(),
        }
    }

    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    pub fn with_pricing(mut self, pricing: PricingTable) -> Self {
        self.pricing = pricing;
        self
    }

    /// Distance from origin to destination, or `None` if the lookup failed,
    /// timed out, or returned something that is not a positive distance
    async fn lane(&self, origin: &Place, destination: &Place) -> Option<Lane> {
        let lookup = self.lookup.miles(origin, destination);
        match tokio::time::timeout(self.lookup_timeout, lookup).await {
            Ok(Ok(miles)) if miles.is_finite() && miles > 0.0 => {
                debug!("{} -> {}: {:.1} mi", origin, destination, miles);
                Some(Lane {
                    destination: destination.clone(),
                    miles,
                })
            }
            Ok(Ok(miles)) => {
                warn!(
                    "Skipping {} -> {}: {} returned invalid distance {}",
                    origin,
                    destination,
                    self.lookup.source_name(),
                    miles
                );
                None
            }
            Ok(Err(e)) => {
                warn!(
                    "Skipping {} -> {}: {} lookup failed: {:#}",
                    origin,
                    destination,
                    self.lookup.source_name(),
                    e
                );
                None
            }
            Err(_) => {
                warn!(
                    "Skipping {} -> {}: {} lookup timed out after {:?}",
                    origin,
                    destination,
                    self.lookup.source_name(),
                    self.lookup_timeout
                );
                None
            }
        }
    }

    /// Generate loads for a request.
    ///
    /// Destinations are sampled first, then all distance lookups run
    /// concurrently; the random source is never touched while lookups are in
    /// flight, so identical seeds and distances give identical output.
    pub async fn generate<R: Rng + ?Sized>(
        &self,
        request: &LoadRequest,
        rng: &mut R,
    ) -> Result<Vec<Load>, GenerateError> {
        validate(request)?;
        self.pricing.validate()?;

        let destinations = match request.radius_miles {
            Some(radius) => {
                let nearby = within_radius(&request.origin, &request.candidates, radius);
                debug!(
                    "{} of {} candidates within {} mi of {}",
                    nearby.len(),
                    request.candidates.len(),
                    radius,
                    request.origin
                );
                select_destinations(&request.origin, &nearby, request.count, rng)
            }
            None => select_destinations(&request.origin, &request.candidates, request.count, rng),
        };
        info!(
            "Looking up {} lanes from {} via {}",
            destinations.len(),
            request.origin,
            self.lookup.source_name()
        );

        let lanes: Vec<Lane> = join_all(
            destinations
                .iter()
                .map(|destination| self.lane(&request.origin, destination)),
        )
        .await
        .into_iter()
        .flatten()
        .collect();

        if lanes.len() < destinations.len() {
            warn!(
                "{} of {} destinations skipped",
                destinations.len() - lanes.len(),
                destinations.len()
            );
        }

        let loads = build_loads(
            &self.pricing,
            &request.origin,
            &lanes,
            &request.equipment,
            request.pickup_date,
            rng,
        )?;
        info!("Generated {} loads from {}", loads.len(), request.origin);
        Ok(loads)
    }
}
