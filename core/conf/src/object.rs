//! Data object storing VenueGuard's configuration.
use serde::Deserialize;
use serde::Serialize;

use super::LoggingConf;
use super::RuntimeConf;

/// Global configuration for the VenueGuard process.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Conf {
    /// Identity provider to read caller claims from.
    pub claims: BackendConf,

    /// Process logging configuration.
    #[serde(default)]
    pub logging: LoggingConf,

    /// Process runtime configuration.
    #[serde(default)]
    pub runtime: RuntimeConf,
}

/// Unstructured configuration for runtime selected service backends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackendConf {
    /// ID of the backend selected to provide the service.
    pub backend: String,

    /// Backend specific configuration options.
    #[serde(default, flatten)]
    pub options: serde_json::Value,
}
