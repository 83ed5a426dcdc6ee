use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dispatch_oracle::loadboard::{find_city, BoardView, LoadGenerator, LoadRequest};
use dispatch_oracle::models::{Equipment, Place};
use dispatch_oracle::routing::{fuel_stops_along, DistanceLookup, OsrmRouter, StraightLineLookup};
use dispatch_oracle::Config;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dispatch-oracle", about = "Synthetic freight load board")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate loads out of an origin city
    Loads {
        /// Origin as "City, ST"
        #[arg(long)]
        origin: String,
        /// Equipment type, repeatable ("Dry Van", "Reefer", "Flatbed")
        #[arg(long = "equipment", default_value = "Dry Van")]
        equipment: Vec<Equipment>,
        /// Number of destinations to sample
        #[arg(long)]
        count: Option<usize>,
        /// Only pick destinations within this many miles of the origin
        #[arg(long)]
        radius: Option<f64>,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        /// Estimate distances without calling the routing service
        #[arg(long)]
        offline: bool,
        /// JSON output path
        #[arg(long)]
        output: Option<String>,
    },
    /// Build a driving route between two cities
    Route {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Also place fuel stops along the route
        #[arg(long)]
        fuel: bool,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn resolve(query: &str) -> Result<Place> {
    find_city(query).with_context(|| format!("Unknown city '{}', expected \"City, ST\"", query))
}

fn rng_for(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::try_from_env().context("Failed to load configuration")?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    let mut view = BoardView::new();

    match Cli::parse().command {
        Command::Loads {
            origin,
            equipment,
            count,
            radius,
            seed,
            offline,
            output,
        } => {
            let origin = resolve(&origin)?;
            let lookup: Arc<dyn DistanceLookup> = if offline {
                Arc::new(StraightLineLookup::new())
            } else {
                Arc::new(OsrmRouter::with_params(config.osrm_params())?)
            };

            info!("🚚 Dispatch Oracle - load board");
            info!("Origin: {} (distances via {})", origin, lookup.source_name());

            let generator = LoadGenerator::new(lookup).with_lookup_timeout(config.lookup_timeout());
            let mut request = LoadRequest::new(origin, equipment)
                .with_count(count.unwrap_or(config.destination_count));
            if let Some(radius) = radius {
                request = request.with_radius(radius);
            }

            let generation = view.begin_request();
            let mut rng = rng_for(seed);
            let loads = generator.generate(&request, &mut rng).await?;
            view.accept_loads(generation, loads);

            if view.loads().is_empty() {
                match request.radius_miles {
                    Some(radius) => info!(
                        "No loads found within {} miles of {}",
                        radius, request.origin
                    ),
                    None => info!("No loads found from {}", request.origin),
                }
                return Ok(());
            }

            for (i, load) in view.loads().iter().enumerate() {
                println!(
                    "{}. {} → {} ({} mi) {}",
                    i + 1,
                    load.pickup,
                    load.delivery,
                    load.miles,
                    load.id
                );
                println!(
                    "   ${} • ${:.2}/mi • {} • {} lbs {}",
                    load.pay, load.rate_per_mile, load.equipment, load.weight, load.commodity
                );
                println!(
                    "   Pickup {} {} • Deliver {} {}",
                    load.pickup_date, load.pickup_window, load.delivery_date, load.delivery_window
                );
                println!(
                    "   {} • posted {} min ago • {}",
                    load.broker, load.posted_minutes_ago, load.accessorials
                );
                println!();
            }

            let path = output.unwrap_or_else(|| config.output_path.clone());
            let json = serde_json::to_string_pretty(view.loads())?;
            tokio::fs::write(&path, json)
                .await
                .with_context(|| format!("Failed to write {}", path))?;
            info!("💾 Saved {} loads to {}", view.loads().len(), path);
        }
        Command::Route {
            from,
            to,
            fuel,
            seed,
        } => {
            let from = resolve(&from)?;
            let to = resolve(&to)?;
            let router = OsrmRouter::with_params(config.osrm_params())?;

            let route = router.route(&from, &to).await?;
            println!(
                "{} → {}: {:.0} mi, {:.1} h",
                from,
                to,
                route.miles(),
                route.hours()
            );
            view.set_route(route);

            if fuel {
                let geometry = view.route().map(|r| r.geometry.clone()).unwrap_or_default();
                let stops = fuel_stops_along(&geometry, &mut rng_for(seed));
                view.set_fuel_stops(stops);
                for stop in view.fuel_stops() {
                    println!(
                        "   ⛽ {:.4}, {:.4}  diesel ${:.2}/gal",
                        stop.position.latitude, stop.position.longitude, stop.diesel_price
                    );
                }
            }
        }
    }

    Ok(())
}
