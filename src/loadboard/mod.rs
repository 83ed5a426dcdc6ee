pub mod cities;
pub mod generator;
pub mod pricing;
pub mod view;

pub use cities::{find_city, reference_cities, select_destinations, within_radius};
pub use generator::{build_loads, LoadGenerator, LoadRequest};
pub use pricing::PricingTable;
pub use view::BoardView;
