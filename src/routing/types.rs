use serde::{Deserialize, Serialize};

/// Connection parameters for an OSRM routing service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsrmParams {
    /// Base URL of the OSRM server, without trailing slash
    pub base_url: String,
    /// OSRM routing profile
    pub profile: String,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OsrmParams {
    fn default() -> Self {
        Self {
            base_url: "https://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 30,
        }
    }
}
