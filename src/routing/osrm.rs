use crate::models::{Coordinate, Place, Route, METERS_PER_MILE};
use crate::routing::traits::DistanceLookup;
use crate::routing::types::OsrmParams;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Raw OSRM `route` response
#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    #[serde(default)]
    geometry: Option<OsrmGeometry>,
}

/// GeoJSON line string, coordinates are `[lon, lat]`
#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

/// OSRM routing client
pub struct OsrmRouter {
    client: Client,
    params: OsrmParams,
}

impl OsrmRouter {
    /// Create a router against the public OSRM demo server
    pub fn new() -> Result<Self> {
        Self::with_params(OsrmParams::default())
    }

    /// Create a router with custom connection parameters
    pub fn with_params(params: OsrmParams) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(params.timeout_secs))
            .user_agent(concat!("dispatch-oracle/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, params })
    }

    fn route_url(&self, origin: &Place, destination: &Place, full_geometry: bool) -> String {
        let overview = if full_geometry {
            "overview=full&geometries=geojson"
        } else {
            "overview=false"
        };
        format!(
            "{}/route/v1/{}/{},{};{},{}?{}",
            self.params.base_url.trim_end_matches('/'),
            self.params.profile,
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude,
            overview
        )
    }

    async fn fetch(&self, url: &str) -> Result<Route> {
        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to reach routing service")?;

        if !response.status().is_success() {
            warn!("OSRM returned status: {}", response.status());
            anyhow::bail!("Routing request failed: {}", response.status());
        }

        let body = response.text().await.context("Failed to read response body")?;
        parse_route(&body)
    }

    /// Driving route with full geometry between two places
    pub async fn route(&self, origin: &Place, destination: &Place) -> Result<Route> {
        let url = self.route_url(origin, destination, true);
        self.fetch(&url)
            .await
            .with_context(|| format!("No route from {} to {}", origin, destination))
    }
}

/// Parse an OSRM `route` response body into the first route it contains
fn parse_route(body: &str) -> Result<Route> {
    let response: OsrmResponse =
        serde_json::from_str(body).context("Failed to parse OSRM response")?;

    if response.code != "Ok" {
        anyhow::bail!(
            "OSRM error {}: {}",
            response.code,
            response.message.unwrap_or_default()
        );
    }

    let route = response
        .routes
        .into_iter()
        .next()
        .context("OSRM returned no routes")?;

    let geometry = route
        .geometry
        .map(|g| {
            g.coordinates
                .into_iter()
                .map(|[lon, lat]| Coordinate {
                    latitude: lat,
                    longitude: lon,
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(Route {
        distance_meters: route.distance,
        duration_seconds: route.duration,
        geometry,
    })
}

#[async_trait]
impl DistanceLookup for OsrmRouter {
    async fn miles(&self, origin: &Place, destination: &Place) -> Result<f64> {
        let url = self.route_url(origin, destination, false);
        let route = self.fetch(&url).await?;
        Ok(route.distance_meters / METERS_PER_MILE)
    }

    fn source_name(&self) -> &'static str {
        "OSRM"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_route_and_swaps_coordinates() {
        let body = r#"{
            "code": "Ok",
            "routes": [{
                "distance": 394500.2,
                "duration": 14820.5,
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[-80.8431, 35.2271], [-82.0, 34.9], [-84.388, 33.749]]
                }
            }],
            "waypoints": []
        }"#;

        let route = parse_route(body).unwrap();
        assert_eq!(route.distance_meters, 394500.2);
        assert_eq!(route.duration_seconds, 14820.5);
        assert_eq!(route.geometry.len(), 3);
        assert_eq!(route.geometry[0].latitude, 35.2271);
        assert_eq!(route.geometry[0].longitude, -80.8431);
        assert!((route.miles() - 245.13).abs() < 0.01);
    }

    #[test]
    fn parses_route_without_geometry() {
        let body = r#"{"code":"Ok","routes":[{"distance":1000.0,"duration":60.0}]}"#;
        let route = parse_route(body).unwrap();
        assert!(route.geometry.is_empty());
    }

    #[test]
    fn rejects_error_code() {
        let body = r#"{"code":"NoRoute","message":"Impossible route between points","routes":[]}"#;
        let err = parse_route(body).unwrap_err();
        assert!(err.to_string().contains("NoRoute"));
    }

    #[test]
    fn rejects_empty_routes() {
        let body = r#"{"code":"Ok","routes":[]}"#;
        assert!(parse_route(body).is_err());
    }

    #[test]
    fn builds_lon_lat_urls() {
        let router = OsrmRouter::with_params(OsrmParams {
            base_url: "http://localhost:5000/".to_string(),
            ..OsrmParams::default()
        })
        .unwrap();
        let a = Place::new("Charlotte", "NC", 35.2271, -80.8431);
        let b = Place::new("Atlanta", "GA", 33.749, -84.388);

        assert_eq!(
            router.route_url(&a, &b, false),
            "http://localhost:5000/route/v1/driving/-80.8431,35.2271;-84.388,33.749?overview=false"
        );
        assert!(router
            .route_url(&a, &b, true)
            .ends_with("?overview=full&geometries=geojson"));
    }
}
