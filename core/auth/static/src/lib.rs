//! Claims provider serving caller claims declared in the process configuration.
//!
//! This backend is intended for development cycles, demo instances and tests
//! where no identity provider is available.
//!
//! ```yaml
//! claims:
//!   backend: static
//!   callers:
//!     admin-uid:
//!       role: siteAdmin
//!     manager-uid:
//!       role: venueAdmin
//!       venueId: venue-A
//! ```
use std::collections::HashMap;

use anyhow::Context as AnyContext;
use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value as Json;

use venueguard_auth::claims::CallerClaims;
use venueguard_auth::claims::Claims;
use venueguard_auth::claims::ClaimsProvider;
use venueguard_auth::claims::ClaimsProviderFactory;
use venueguard_auth::claims::ClaimsProviderFactoryArgs;
use venueguard_auth::LookupError;
use venueguard_context::Context;

/// Configuration of the static claims provider.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Conf {
    /// Claims of known callers, by caller ID.
    #[serde(default)]
    pub callers: HashMap<String, CallerClaims>,
}

/// The static claims provider configuration is not valid.
#[derive(Debug, thiserror::Error)]
#[error("the static claims provider configuration is not valid")]
pub struct ConfError;

/// Serve claims of callers listed in the configuration.
pub struct StaticClaims {
    callers: HashMap<String, CallerClaims>,
}

impl StaticClaims {
    /// Serve claims of the callers in the given configuration.
    pub fn new(conf: Conf) -> Self {
        StaticClaims {
            callers: conf.callers,
        }
    }
}

#[async_trait::async_trait]
impl ClaimsProvider for StaticClaims {
    async fn lookup(&self, _: &Context, caller_id: &str) -> Result<CallerClaims> {
        match self.callers.get(caller_id) {
            Some(claims) => Ok(claims.clone()),
            None => anyhow::bail!(LookupError::not_found(caller_id)),
        }
    }
}

/// Initialise [`StaticClaims`] providers.
pub struct StaticFactory;

#[async_trait::async_trait]
impl ClaimsProviderFactory for StaticFactory {
    fn conf_check(&self, context: &Context, conf: &Json) -> Result<()> {
        let conf = decode(conf)?;
        if conf.callers.is_empty() {
            slog::warn!(
                context.logger,
                "Static claims provider configured without callers, all lookups will fail"
            );
        }
        Ok(())
    }

    fn register_metrics(&self, _: &prometheus::Registry) -> Result<()> {
        Ok(())
    }

    async fn claims<'a>(&self, args: ClaimsProviderFactoryArgs<'a>) -> Result<Claims> {
        let conf = decode(args.conf)?;
        slog::debug!(
            args.context.logger,
            "Initialising static claims provider";
            "callers" => conf.callers.len(),
        );
        Ok(Claims::from(StaticClaims::new(conf)))
    }
}

fn decode(conf: &Json) -> Result<Conf> {
    let conf = serde_json::from_value(conf.clone()).context(ConfError)?;
    Ok(conf)
}
