use crate::models::{Load, Route};
use crate::routing::FuelStop;

/// Everything the board currently shows.
///
/// Each load query takes a generation number from `begin_request`; results
/// that come back for an older generation are dropped instead of replacing
/// newer ones.
#[derive(Debug, Default)]
pub struct BoardView {
    generation: u64,
    loads: Vec<Load>,
    route: Option<Route>,
    fuel_stops: Vec<FuelStop>,
}

impl BoardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new query, invalidating any in flight
    pub fn begin_request(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Store `loads` if `generation` is still current. Returns whether they were kept.
    pub fn accept_loads(&mut self, generation: u64, loads: Vec<Load>) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.loads = loads;
        true
    }

    pub fn loads(&self) -> &[Load] {
        &self.loads
    }

    /// Replace the route; fuel stops belong to the old route and are cleared
    pub fn set_route(&mut self, route: Route) {
        self.route = Some(route);
        self.fuel_stops.clear();
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn set_fuel_stops(&mut self, stops: Vec<FuelStop>) {
        self.fuel_stops = stops;
    }

    pub fn fuel_stops(&self) -> &[FuelStop] {
        &self.fuel_stops
    }

    /// Drop loads, route and stops. The generation counter keeps counting.
    pub fn clear(&mut self) {
        self.loads.clear();
        self.route = None;
        self.fuel_stops.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, Equipment, Place};
    use chrono::NaiveDate;

    fn load(id: &str) -> Load {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        Load {
            id: id.to_string(),
            pickup: Place::new("Charlotte", "NC", 35.2271, -80.8431),
            delivery: Place::new("Atlanta", "GA", 33.749, -84.388),
            equipment: Equipment::VanDry,
            miles: 245,
            rate_per_mile: 2.5,
            pay: 613,
            weight: 30_000,
            commodity: "Beverages".to_string(),
            broker: "TQL".to_string(),
            posted_minutes_ago: 5,
            pickup_date: date,
            delivery_date: date,
            pickup_window: String::new(),
            delivery_window: String::new(),
            accessorials: String::new(),
        }
    }

    #[test]
    fn stale_results_are_discarded() {
        let mut view = BoardView::new();

        let first = view.begin_request();
        let second = view.begin_request();

        assert!(view.accept_loads(second, vec![load("LD-000002")]));
        assert!(!view.accept_loads(first, vec![load("LD-000001")]));
        assert_eq!(view.loads().len(), 1);
        assert_eq!(view.loads()[0].id, "LD-000002");
    }

    #[test]
    fn new_route_clears_fuel_stops() {
        let mut view = BoardView::new();
        let route = Route {
            distance_meters: 1000.0,
            duration_seconds: 60.0,
            geometry: vec![],
        };

        view.set_route(route.clone());
        view.set_fuel_stops(vec![FuelStop {
            position: Coordinate {
                latitude: 35.0,
                longitude: -80.0,
            },
            diesel_price: 3.89,
        }]);
        assert_eq!(view.fuel_stops().len(), 1);

        view.set_route(route);
        assert!(view.fuel_stops().is_empty());
        assert!(view.route().is_some());
    }

    #[test]
    fn clear_keeps_generation() {
        let mut view = BoardView::new();
        let generation = view.begin_request();
        view.accept_loads(generation, vec![load("LD-000001")]);

        view.clear();
        assert!(view.loads().is_empty());
        assert!(view.route().is_none());
        assert!(view.is_current(generation));
        assert_eq!(view.begin_request(), generation + 1);
    }
}
