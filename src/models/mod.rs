use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mean Earth radius in statute miles
const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Meters in one statute mile
pub const METERS_PER_MILE: f64 = 1609.344;

/// A resolved location (city/state plus coordinates)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Place {
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub state: String,
}

impl Place {
    pub fn new(city: &str, state: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            city: city.to_string(),
            state: state.to_string(),
        }
    }

    /// Exact city/state match, ignoring coordinates
    pub fn same_city(&self, other: &Place) -> bool {
        self.city == other.city && self.state == other.state
    }

    /// Great-circle distance to `other` in miles (haversine).
    ///
    /// Altitude and road network are ignored; this is a lower bound on the
    /// driving distance.
    pub fn great_circle_miles(&self, other: &Place) -> f64 {
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + (d_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_MILES * c
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city, self.state)
    }
}

/// Point on a route geometry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Result of a routing query between two places
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub geometry: Vec<Coordinate>,
}

impl Route {
    pub fn miles(&self) -> f64 {
        self.distance_meters / METERS_PER_MILE
    }

    pub fn hours(&self) -> f64 {
        self.duration_seconds / 3600.0
    }
}

/// Trailer category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Equipment {
    #[serde(rename = "Dry Van")]
    VanDry,
    Reefer,
    Flatbed,
}

impl Equipment {
    pub const ALL: [Equipment; 3] = [Equipment::VanDry, Equipment::Reefer, Equipment::Flatbed];

    pub fn label(&self) -> &'static str {
        match self {
            Equipment::VanDry => "Dry Van",
            Equipment::Reefer => "Reefer",
            Equipment::Flatbed => "Flatbed",
        }
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Equipment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dry van" | "van" | "vandry" | "dryvan" => Ok(Equipment::VanDry),
            "reefer" => Ok(Equipment::Reefer),
            "flatbed" => Ok(Equipment::Flatbed),
            other => Err(format!("unknown equipment type '{}'", other)),
        }
    }
}

/// A destination paired with its road distance from the origin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lane {
    pub destination: Place,
    pub miles: f64,
}

/// Synthetic freight listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Load {
    pub id: String,
    pub pickup: Place,
    pub delivery: Place,
    pub equipment: Equipment,
    pub miles: u32,
    pub rate_per_mile: f64,
    pub pay: u32,
    pub weight: u32,
    pub commodity: String,
    pub broker: String,
    pub posted_minutes_ago: u32,
    pub pickup_date: NaiveDate,
    pub delivery_date: NaiveDate,
    pub pickup_window: String,
    pub delivery_window: String,
    pub accessorials: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charlotte_to_atlanta_great_circle() {
        let charlotte = Place::new("Charlotte", "NC", 35.2271, -80.8431);
        let atlanta = Place::new("Atlanta", "GA", 33.7490, -84.3880);

        let miles = charlotte.great_circle_miles(&atlanta);
        assert!(miles > 220.0 && miles < 230.0, "got {}", miles);
        assert_eq!(charlotte.great_circle_miles(&charlotte), 0.0);
    }

    #[test]
    fn equipment_parses_display_names() {
        assert_eq!("Dry Van".parse::<Equipment>(), Ok(Equipment::VanDry));
        assert_eq!("van".parse::<Equipment>(), Ok(Equipment::VanDry));
        assert_eq!("REEFER".parse::<Equipment>(), Ok(Equipment::Reefer));
        assert_eq!(" Flatbed ".parse::<Equipment>(), Ok(Equipment::Flatbed));
        assert!("tanker".parse::<Equipment>().is_err());
    }

    #[test]
    fn equipment_serializes_with_display_name() {
        let json = serde_json::to_string(&Equipment::VanDry).unwrap();
        assert_eq!(json, "\"Dry Van\"");
        let back: Equipment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Equipment::VanDry);
    }

    #[test]
    fn route_converts_units() {
        let route = Route {
            distance_meters: 160_934.4,
            duration_seconds: 5400.0,
            geometry: vec![],
        };
        assert!((route.miles() - 100.0).abs() < 1e-9);
        assert!((route.hours() - 1.5).abs() < 1e-9);
    }
}
