//! Configuration for the HTTP(S) claims provider.
use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::Result;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use reqwest::Url;
use serde::Deserialize;
use serde::Serialize;

/// The HTTP claims provider configuration is not valid.
#[derive(Debug, thiserror::Error)]
pub enum ConfError {
    /// The identity service address is not a valid HTTP(S) base URL.
    #[error("the identity service address '{0}' is not a valid HTTP(S) base URL")]
    // (address,)
    Address(String),

    /// The HTTP claims provider configuration could not be decoded.
    #[error("the HTTP claims provider configuration is not valid")]
    Decode,

    /// A static header is not a valid HTTP header.
    #[error("the static header '{0}' is not a valid HTTP header")]
    // (name,)
    Header(String),
}

/// HTTP(S) specific configuration for the claims provider.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Conf {
    /// Base URL of the identity service API.
    pub address: String,

    /// Static headers to attach to every request (for example API keys).
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Timeout, in seconds, for claims requests.
    #[serde(default = "Conf::default_timeout")]
    pub timeout_sec: u64,

    /// Timeout, in seconds, for new connections to the identity service.
    #[serde(default = "Conf::default_timeout_connect")]
    pub timeout_connect_sec: u64,
}

impl Conf {
    /// Parse the identity service address, with trailing slash.
    pub fn base_url(&self) -> Result<Url> {
        let mut address = self.address.clone();
        if !address.ends_with('/') {
            address.push('/');
        }
        let url = Url::parse(&address).map_err(|_| ConfError::Address(self.address.clone()))?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            anyhow::bail!(ConfError::Address(self.address.clone()));
        }
        Ok(url)
    }

    /// Convert the static headers into a [`HeaderMap`].
    pub fn header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let header = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ConfError::Header(name.clone()))?;
            let value = HeaderValue::from_str(value).map_err(|_| ConfError::Header(name.clone()))?;
            headers.insert(header, value);
        }
        Ok(headers)
    }

    /// Timeout for claims requests.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_sec)
    }

    /// Timeout for new connections.
    pub fn timeout_connect(&self) -> Duration {
        Duration::from_secs(self.timeout_connect_sec)
    }

    fn default_timeout() -> u64 {
        30
    }

    fn default_timeout_connect() -> u64 {
        1
    }
}
