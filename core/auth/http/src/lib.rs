//! Claims provider reading caller claims from an identity service over HTTP(S).
//!
//! Claims are requested with `GET {address}users/{caller_id}/claims` and the service
//! is expected to respond with a JSON object such as:
//!
//! ```json
//! {"role": "venueAdmin", "venueId": "venue-A"}
//! ```
//!
//! Unknown callers are reported by the service with a `404 Not Found` response.
use anyhow::Context as AnyContext;
use anyhow::Result;
use reqwest::Client as ReqwestClient;
use reqwest::Url;
use serde_json::Value as Json;

use venueguard_auth::claims::CallerClaims;
use venueguard_auth::claims::Claims;
use venueguard_auth::claims::ClaimsProvider;
use venueguard_auth::claims::ClaimsProviderFactory;
use venueguard_auth::claims::ClaimsProviderFactoryArgs;
use venueguard_auth::LookupError;
use venueguard_context::Context;

mod conf;
mod telemetry;

pub mod error;

pub use self::conf::Conf;
pub use self::conf::ConfError;

/// String to set as the user agent in HTTP request.
static CLIENT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Claims provider for identity services exposing claims over HTTP(S).
pub struct HttpClaims {
    /// Base URL of the identity service API, with trailing slash.
    base: Url,

    /// Low-level [`Client`](reqwest::Client) to perform HTTP requests with.
    client: ReqwestClient,
}

impl HttpClaims {
    /// Initialise a provider from its configuration.
    pub fn with(conf: &Conf) -> Result<HttpClaims> {
        let base = conf.base_url()?;
        let client = ReqwestClient::builder()
            .connect_timeout(conf.timeout_connect())
            .timeout(conf.timeout())
            .default_headers(conf.header_map()?)
            .user_agent(CLIENT_USER_AGENT)
            .build()?;
        Ok(HttpClaims { base, client })
    }

    /// URL to request the claims of the given caller from.
    ///
    /// Dot segments would be normalised away and address another resource,
    /// so callers with such IDs can never be found.
    pub fn claims_url(&self, caller_id: &str) -> Result<Url> {
        if matches!(caller_id, "." | "..") {
            anyhow::bail!(LookupError::not_found(caller_id));
        }
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ConfError::Address(self.base.to_string()))?
            .pop_if_empty()
            .extend(["users", caller_id, "claims"]);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl ClaimsProvider for HttpClaims {
    async fn lookup(&self, context: &Context, caller_id: &str) -> Result<CallerClaims> {
        let url = self.claims_url(caller_id)?;
        slog::debug!(context.logger, "Requesting caller claims"; "url" => url.as_str());

        let timer = telemetry::REQUEST_DURATION.start_timer();
        let result = match self.client.get(url).send().await {
            Ok(response) => crate::error::inspect::<CallerClaims>(response).await,
            Err(error) => Err(anyhow::anyhow!(error)),
        };
        timer.observe_duration();
        claims_from(caller_id, result)
    }
}

/// Map the outcome of a claims request onto the [`ClaimsProvider`] contract.
fn claims_from(caller_id: &str, result: Result<Option<CallerClaims>>) -> Result<CallerClaims> {
    match result {
        Ok(claims) => Ok(claims.unwrap_or_default()),
        Err(error) if error.is::<crate::error::ResourceNotFound>() => {
            anyhow::bail!(LookupError::not_found(caller_id))
        }
        Err(error) => {
            telemetry::REQUEST_ERR.inc();
            Err(error)
        }
    }
}

/// Initialise [`HttpClaims`] providers.
pub struct HttpFactory;

#[async_trait::async_trait]
impl ClaimsProviderFactory for HttpFactory {
    fn conf_check(&self, _: &Context, conf: &Json) -> Result<()> {
        let conf = decode(conf)?;
        conf.base_url()?;
        conf.header_map()?;
        Ok(())
    }

    fn register_metrics(&self, registry: &prometheus::Registry) -> Result<()> {
        telemetry::register_metrics(registry)
    }

    async fn claims<'a>(&self, args: ClaimsProviderFactoryArgs<'a>) -> Result<Claims> {
        let conf = decode(args.conf)?;
        let claims = HttpClaims::with(&conf)?;
        slog::debug!(
            args.context.logger,
            "Initialised HTTP claims provider";
            "address" => claims.base.as_str(),
        );
        Ok(Claims::from(claims))
    }
}

fn decode(conf: &Json) -> Result<Conf> {
    let conf = serde_json::from_value(conf.clone()).context(ConfError::Decode)?;
    Ok(conf)
}
