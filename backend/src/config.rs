//! Importer configuration loaded via OrthoConfig.
//!
//! Values come from `CAMPUS_COFFEE_*` environment variables and configuration
//! files. Numeric settings carry declared defaults; accessors supply the
//! defaults for the optional text settings.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::osm_api::{
    DEFAULT_OSM_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT,
};
use crate::outbound::persistence::DEFAULT_CONNECTION_TIMEOUT;

/// Settings for the OSM import pipeline and its storage.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CAMPUS_COFFEE")]
pub struct ImportSettings {
    /// Node endpoint of the OSM API; the node id is appended.
    pub osm_api_base_url: Option<String>,
    /// Whole-request timeout for OSM API calls, in seconds.
    #[ortho_config(default = 10)]
    pub request_timeout_secs: u64,
    /// User agent sent to the OSM API.
    pub user_agent: Option<String>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    #[ortho_config(default = 4)]
    pub pool_max_size: u32,
    /// Seconds to wait for a pooled database connection.
    #[ortho_config(default = 10)]
    pub pool_connection_timeout_secs: u64,
}

impl ImportSettings {
    /// Return the configured OSM API base URL, falling back to the public API.
    ///
    /// # Errors
    ///
    /// Returns a parse error when the configured value is not a URL.
    pub fn osm_api_base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(
            self.osm_api_base_url
                .as_deref()
                .unwrap_or(DEFAULT_OSM_API_BASE_URL),
        )
    }

    /// Return the request timeout; zero is treated as unset.
    pub fn request_timeout(&self) -> Duration {
        match self.request_timeout_secs {
            0 => DEFAULT_REQUEST_TIMEOUT,
            secs => Duration::from_secs(secs),
        }
    }

    /// Return the configured user agent, falling back to the default.
    pub fn user_agent(&self) -> &str {
        self.user_agent
            .as_deref()
            .filter(|agent| !agent.trim().is_empty())
            .unwrap_or(DEFAULT_USER_AGENT)
    }

    /// Return the configured database URL, if any non-blank value was set.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .filter(|value| !value.trim().is_empty())
    }

    /// Return the configured pool size.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size
    }

    /// Return the pool checkout timeout; zero is treated as unset.
    pub fn pool_connection_timeout(&self) -> Duration {
        match self.pool_connection_timeout_secs {
            0 => DEFAULT_CONNECTION_TIMEOUT,
            secs => Duration::from_secs(secs),
        }
    }
}
