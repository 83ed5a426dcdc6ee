pub mod config;
pub mod error;
pub mod loadboard;
pub mod models;
pub mod routing;

pub use config::Config;
pub use error::GenerateError;
