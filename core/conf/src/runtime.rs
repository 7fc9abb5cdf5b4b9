//! Container for the process async runtime configuration.
use serde::Deserialize;
use serde::Serialize;

/// Container for the process async runtime configuration.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConf {
    /// Number of tokio worker threads, defaults to the number of CPU cores.
    #[serde(default)]
    pub worker_threads: Option<usize>,
}
