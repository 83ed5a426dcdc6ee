//! Fuel stops along a route geometry.
//!
//! Stops are placed at a fixed stride through the route's coordinates with a
//! small random offset, each with a diesel price. Display data only.

use crate::models::Coordinate;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Index of the first stop in the geometry
const FIRST_STOP: usize = 20;

/// Number of geometry points between stops
const STOP_STRIDE: usize = 40;

/// Max jitter applied to a stop, in degrees
const JITTER_DEGREES: f64 = 0.01;

const DIESEL_MIN: f64 = 3.50;
const DIESEL_SPREAD: f64 = 0.70;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelStop {
    pub position: Coordinate,
    /// Diesel, $/gal
    pub diesel_price: f64,
}

/// Place fuel stops at every `STOP_STRIDE`th coordinate starting at `FIRST_STOP`
pub fn fuel_stops_along<R: Rng + ?Sized>(geometry: &[Coordinate], rng: &mut R) -> Vec<FuelStop> {
    geometry
        .iter()
        .skip(FIRST_STOP)
        .step_by(STOP_STRIDE)
        .map(|point| {
            // same offset on both axes
            let jitter = rng.gen_range(-JITTER_DEGREES..JITTER_DEGREES);
            let price = DIESEL_MIN + rng.gen::<f64>() * DIESEL_SPREAD;
            FuelStop {
                position: Coordinate {
                    latitude: point.latitude + jitter,
                    longitude: point.longitude + jitter,
                },
                diesel_price: (price * 100.0).round() / 100.0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn line(points: usize) -> Vec<Coordinate> {
        (0..points)
            .map(|i| Coordinate {
                latitude: 35.0 + i as f64 * 0.001,
                longitude: -80.0 - i as f64 * 0.001,
            })
            .collect()
    }

    #[test]
    fn places_stops_at_fixed_stride() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let geometry = line(150);

        let stops = fuel_stops_along(&geometry, &mut rng);
        // indices 20, 60, 100, 140
        assert_eq!(stops.len(), 4);

        for (stop, idx) in stops.iter().zip([20usize, 60, 100, 140]) {
            let base = geometry[idx];
            assert!((stop.position.latitude - base.latitude).abs() <= JITTER_DEGREES);
            assert!((stop.position.longitude - base.longitude).abs() <= JITTER_DEGREES);
            assert!(stop.diesel_price >= 3.50 && stop.diesel_price <= 4.20);
        }
    }

    #[test]
    fn short_routes_have_no_stops() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!(fuel_stops_along(&line(20), &mut rng).is_empty());
        assert_eq!(fuel_stops_along(&line(21), &mut rng).len(), 1);
    }
}
