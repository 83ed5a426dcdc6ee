pub mod fuel;
pub mod osrm;
pub mod straight_line;
pub mod table;
pub mod traits;
pub mod types;

pub use fuel::{fuel_stops_along, FuelStop};
pub use osrm::OsrmRouter;
pub use straight_line::StraightLineLookup;
pub use table::DistanceTable;
pub use traits::DistanceLookup;
pub use types::OsrmParams;
