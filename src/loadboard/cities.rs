use crate::models::Place;
use rand::seq::SliceRandom;
use rand::Rng;

/// Reference freight markets: (city, state, latitude, longitude)
const REFERENCE_CITIES: &[(&str, &str, f64, f64)] = &[
    ("Dallas", "TX", 32.7767, -96.7970),
    ("Atlanta", "GA", 33.7490, -84.3880),
    ("Chicago", "IL", 41.8781, -87.6298),
    ("Charlotte", "NC", 35.2271, -80.8431),
    ("Phoenix", "AZ", 33.4484, -112.0740),
    ("Salt Lake City", "UT", 40.7608, -111.8910),
    ("Nashville", "TN", 36.1627, -86.7816),
    ("Denver", "CO", 39.7392, -104.9903),
    ("Detroit", "MI", 42.3314, -83.0458),
    ("Columbus", "OH", 39.9612, -82.9988),
    ("Memphis", "TN", 35.1495, -90.0490),
    ("Indianapolis", "IN", 39.7684, -86.1581),
    ("Jacksonville", "FL", 30.3322, -81.6557),
    ("Kansas City", "MO", 39.0997, -94.5786),
    ("Houston", "TX", 29.7604, -95.3698),
    ("Los Angeles", "CA", 34.0522, -118.2437),
];

/// The built-in candidate destination list
pub fn reference_cities() -> Vec<Place> {
    REFERENCE_CITIES
        .iter()
        .map(|&(city, state, lat, lon)| Place::new(city, state, lat, lon))
        .collect()
}

/// Resolve `"City, ST"` (case-insensitive) against the reference list
pub fn find_city(query: &str) -> Option<Place> {
    let (city, state) = query.split_once(',')?;
    let (city, state) = (city.trim(), state.trim());

    REFERENCE_CITIES
        .iter()
        .find(|(c, s, _, _)| c.eq_ignore_ascii_case(city) && s.eq_ignore_ascii_case(state))
        .map(|&(c, s, lat, lon)| Place::new(c, s, lat, lon))
}

/// Candidates whose great-circle distance from `center` is at most `radius_miles`
pub fn within_radius(center: &Place, candidates: &[Place], radius_miles: f64) -> Vec<Place> {
    candidates
        .iter()
        .filter(|place| center.great_circle_miles(place) <= radius_miles)
        .cloned()
        .collect()
}

/// Sample up to `count` destinations without replacement.
///
/// The origin city/state is excluded and duplicate city/state entries are
/// collapsed before a uniform shuffle.
pub fn select_destinations<R: Rng + ?Sized>(
    origin: &Place,
    candidates: &[Place],
    count: usize,
    rng: &mut R,
) -> Vec<Place> {
    let mut pool: Vec<Place> = Vec::with_capacity(candidates.len());
    for place in candidates {
        if place.same_city(origin) || pool.iter().any(|p| p.same_city(place)) {
            continue;
        }
        pool.push(place.clone());
    }

    pool.shuffle(rng);
    pool.truncate(count);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    #[test]
    fn finds_reference_city() {
        let place = find_city("charlotte, nc").unwrap();
        assert_eq!(place.city, "Charlotte");
        assert_eq!(place.state, "NC");

        assert!(find_city("Charlotte").is_none());
        assert!(find_city("Springfield, IL").is_none());
    }

    #[test]
    fn never_selects_origin_or_repeats() {
        let origin = find_city("Charlotte, NC").unwrap();
        let mut candidates = reference_cities();
        candidates.push(find_city("Dallas, TX").unwrap());

        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let picked = select_destinations(&origin, &candidates, 6, &mut rng);

            assert_eq!(picked.len(), 6);
            assert!(picked.iter().all(|p| !p.same_city(&origin)));
            for (i, a) in picked.iter().enumerate() {
                assert!(picked[i + 1..].iter().all(|b| !a.same_city(b)));
            }
        }
    }

    #[test]
    fn count_larger_than_pool_returns_everything_else() {
        let origin = find_city("Denver, CO").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let picked = select_destinations(&origin, &reference_cities(), 100, &mut rng);
        assert_eq!(picked.len(), REFERENCE_CITIES.len() - 1);
    }

    #[test]
    fn origin_match_is_exact_city_and_state() {
        let origin = Place::new("Columbus", "GA", 32.46, -84.98);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let picked = select_destinations(&origin, &reference_cities(), 100, &mut rng);
        assert!(picked.iter().any(|p| p.city == "Columbus" && p.state == "OH"));
    }

    #[test]
    fn radius_keeps_only_nearby_cities() {
        let charlotte = find_city("Charlotte, NC").unwrap();

        let nearby = within_radius(&charlotte, &reference_cities(), 300.0);
        let names: Vec<&str> = nearby.iter().map(|p| p.city.as_str()).collect();

        // Atlanta ~226 mi; Nashville, Columbus, Jacksonville are all past 300
        assert!(names.contains(&"Charlotte"));
        assert!(names.contains(&"Atlanta"));
        assert!(!names.contains(&"Nashville"));
        assert!(!names.contains(&"Dallas"));
        assert!(nearby
            .iter()
            .all(|p| charlotte.great_circle_miles(p) <= 300.0));
    }

    #[test]
    fn first_position_is_roughly_uniform() {
        let origin = find_city("Charlotte, NC").unwrap();
        let candidates = reference_cities();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut firsts: HashMap<String, u32> = HashMap::new();

        let trials = 15_000;
        for _ in 0..trials {
            let picked = select_destinations(&origin, &candidates, 1, &mut rng);
            *firsts.entry(picked[0].city.clone()).or_default() += 1;
        }

        // 15 eligible cities, ~1000 hits each
        assert_eq!(firsts.len(), 15);
        assert!(firsts.values().all(|&n| n > 800 && n < 1200), "{:?}", firsts);
    }
}
