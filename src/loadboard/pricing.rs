//! # Lane pricing
//!
//! Distance-tiered rate-per-mile with an equipment multiplier, plus the
//! equipment-specific weight/commodity tables used to fill out a load.
//!
//! The tiers and multipliers are display heuristics (short lanes pay more per
//! mile), not a market model. They live in [`PricingTable`] so they can be
//! tuned without touching the generator.

use crate::error::GenerateError;
use crate::models::{Equipment, Lane, Load, Place};
use chrono::{Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const BROKERS: &[&str] = &[
    "TQL",
    "C.H. Robinson",
    "Coyote Logistics",
    "Echo Global Logistics",
    "RXO",
    "Arrive Logistics",
];

pub const PICKUP_WINDOW: &str = "08:00-12:00";
pub const DELIVERY_WINDOW: &str = "06:00-14:00";
pub const ACCESSORIALS: &str = "Detention $50/hr after 2 hrs free; Layover $250/day";

/// Rate band for lanes shorter than `below_miles` (`None` = open-ended)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateTier {
    pub below_miles: Option<f64>,
    pub min_rate: f64,
    pub max_rate: f64,
}

/// Pricing constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingTable {
    /// Ordered by `below_miles`, last tier open-ended
    pub tiers: Vec<RateTier>,
    pub van_multiplier: f64,
    pub reefer_multiplier: f64,
    pub flatbed_multiplier: f64,
    pub min_rate: f64,
    pub max_rate: f64,
    /// Average miles driven per day for the transit estimate
    pub miles_per_day: f64,
}

impl Default for PricingTable {
    fn default() -> Self {
        Self {
            tiers: vec![
                RateTier {
                    below_miles: Some(250.0),
                    min_rate: 2.25,
                    max_rate: 5.00,
                },
                RateTier {
                    below_miles: Some(800.0),
                    min_rate: 1.50,
                    max_rate: 3.50,
                },
                RateTier {
                    below_miles: None,
                    min_rate: 1.00,
                    max_rate: 2.50,
                },
            ],
            van_multiplier: 1.00,
            reefer_multiplier: 1.15,
            flatbed_multiplier: 1.10,
            min_rate: 0.5,
            max_rate: 5.0,
            miles_per_day: 500.0,
        }
    }
}

impl PricingTable {
    /// Reject tables that would make sampling or clamping panic
    pub fn validate(&self) -> Result<(), GenerateError> {
        let invalid = |msg: String| Err(GenerateError::InvalidInput(msg));

        if !(self.min_rate.is_finite() && self.max_rate.is_finite())
            || self.min_rate > self.max_rate
        {
            return invalid(format!(
                "rate clamp [{}, {}] must be finite and ordered",
                self.min_rate, self.max_rate
            ));
        }

        let mut previous_limit = 0.0;
        for (i, tier) in self.tiers.iter().enumerate() {
            if !(tier.min_rate.is_finite() && tier.max_rate.is_finite())
                || tier.min_rate > tier.max_rate
            {
                return invalid(format!(
                    "tier {} rates [{}, {}] must be finite and ordered",
                    i, tier.min_rate, tier.max_rate
                ));
            }
            match tier.below_miles {
                Some(limit) if !limit.is_finite() || limit <= previous_limit => {
                    return invalid(format!(
                        "tier {} limit {} must be finite and above {}",
                        i, limit, previous_limit
                    ));
                }
                Some(limit) => previous_limit = limit,
                None if i + 1 != self.tiers.len() => {
                    return invalid(format!("open-ended tier {} must be last", i));
                }
                None => {}
            }
        }

        for (name, multiplier) in [
            ("van", self.van_multiplier),
            ("reefer", self.reefer_multiplier),
            ("flatbed", self.flatbed_multiplier),
        ] {
            if !(multiplier.is_finite() && multiplier > 0.0) {
                return invalid(format!("{} multiplier {} must be positive", name, multiplier));
            }
        }

        if !(self.miles_per_day.is_finite() && self.miles_per_day > 0.0) {
            return invalid(format!(
                "miles per day {} must be positive",
                self.miles_per_day
            ));
        }

        Ok(())
    }

    /// Rate band for a lane of `miles`
    pub fn tier(&self, miles: f64) -> Option<&RateTier> {
        self.tiers
            .iter()
            .find(|t| t.below_miles.map_or(true, |limit| miles < limit))
            .or_else(|| self.tiers.last())
    }

    pub fn multiplier(&self, equipment: Equipment) -> f64 {
        match equipment {
            Equipment::VanDry => self.van_multiplier,
            Equipment::Reefer => self.reefer_multiplier,
            Equipment::Flatbed => self.flatbed_multiplier,
        }
    }

    /// Random base rate from the lane's tier
    pub fn base_rate<R: Rng + ?Sized>(&self, miles: f64, rng: &mut R) -> f64 {
        let (low, high) = self
            .tier(miles)
            .map_or((self.min_rate, self.max_rate), |t| (t.min_rate, t.max_rate));
        rng.gen_range(low..=high)
    }

    /// Apply the equipment multiplier, clamp, round to cents
    pub fn rate_per_mile(&self, base_rate: f64, equipment: Equipment) -> f64 {
        let rate = (base_rate * self.multiplier(equipment)).clamp(self.min_rate, self.max_rate);
        (rate * 100.0).round() / 100.0
    }

    /// Transit days: `max(1, round(miles / miles_per_day))`
    pub fn transit_days(&self, miles: u32) -> i64 {
        ((miles as f64 / self.miles_per_day).round() as i64).max(1)
    }
}

/// Legal/practical payload range per trailer type, in pounds
pub fn weight_range(equipment: Equipment) -> RangeInclusive<u32> {
    match equipment {
        Equipment::VanDry => 20_000..=45_000,
        Equipment::Reefer => 28_000..=44_000,
        Equipment::Flatbed => 30_000..=48_000,
    }
}

pub fn commodities(equipment: Equipment) -> &'static [&'static str] {
    match equipment {
        Equipment::VanDry => &[
            "General Merchandise",
            "Paper Products",
            "Beverages",
            "Consumer Electronics",
            "Packaged Foods",
        ],
        Equipment::Reefer => &[
            "Produce",
            "Frozen Foods",
            "Dairy",
            "Fresh Meat",
            "Pharmaceuticals",
        ],
        Equipment::Flatbed => &[
            "Steel Coils",
            "Lumber",
            "Building Materials",
            "Machinery",
            "Steel Pipe",
        ],
    }
}

/// Price one (lane, equipment) pair into a load.
///
/// Returns `None` when the lane distance rounds to zero miles or is not a
/// finite number. Random draws happen in a fixed order: base rate, weight,
/// commodity, broker, posted minutes, id.
pub fn price_load<R: Rng + ?Sized>(
    table: &PricingTable,
    origin: &Place,
    lane: &Lane,
    equipment: Equipment,
    pickup_date: NaiveDate,
    rng: &mut R,
) -> Option<Load> {
    if !lane.miles.is_finite() {
        return None;
    }
    let miles = lane.miles.round();
    if miles < 1.0 || miles > u32::MAX as f64 {
        return None;
    }
    let miles = miles as u32;

    let base = table.base_rate(miles as f64, rng);
    let rate_per_mile = table.rate_per_mile(base, equipment);
    let pay = (rate_per_mile * miles as f64).round() as u32;

    let weight = rng.gen_range(weight_range(equipment));
    let commodity = commodities(equipment)
        .choose(rng)
        .copied()
        .unwrap_or_default();
    let broker = BROKERS.choose(rng).copied().unwrap_or_default();
    let posted_minutes_ago = rng.gen_range(1..=120);
    let id = format!("LD-{:06}", rng.gen_range(0..1_000_000u32));

    Some(Load {
        id,
        pickup: origin.clone(),
        delivery: lane.destination.clone(),
        equipment,
        miles,
        rate_per_mile,
        pay,
        weight,
        commodity: commodity.to_string(),
        broker: broker.to_string(),
        posted_minutes_ago,
        pickup_date,
        delivery_date: pickup_date + Duration::days(table.transit_days(miles)),
        pickup_window: PICKUP_WINDOW.to_string(),
        delivery_window: DELIVERY_WINDOW.to_string(),
        accessorials: ACCESSORIALS.to_string(),
    })
}
