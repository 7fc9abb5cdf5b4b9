//! Caller claims and the interface to the identity providers that own them.
use std::sync::Arc;

use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value as Json;

use venueguard_context::Context;

use crate::Rank;
use crate::Role;

#[cfg(any(test, feature = "test-fixture"))]
mod fixture;
#[cfg(any(test, feature = "test-fixture"))]
pub use self::fixture::{ClaimsFixture, FixtureFailure};

/// Attributes the identity provider attaches to an authenticated caller.
///
/// Claims are owned by the identity provider: they are read for each check and never modified.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallerClaims {
    /// Role assigned to the caller, as recorded by the identity provider.
    ///
    /// The raw name is kept so roles unknown to this process are still reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Venue the caller administers, for venue scoped roles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_id: Option<String>,
}

impl CallerClaims {
    /// Claims for a caller assigned the given role and no venue.
    pub fn with_role<S: Into<String>>(role: S) -> Self {
        CallerClaims {
            role: Some(role.into()),
            venue_id: None,
        }
    }

    /// Scope the claims to the given venue.
    pub fn venue<S: Into<String>>(mut self, venue_id: S) -> Self {
        self.venue_id = Some(venue_id.into());
        self
    }

    /// Rank of the assigned role, if a role is assigned at all.
    pub fn rank(&self) -> Option<Rank> {
        self.role.as_deref().map(Rank::of)
    }

    /// The assigned role, if one is assigned and known.
    pub fn known_role(&self) -> Option<Role> {
        self.role.as_deref().and_then(|role| role.parse().ok())
    }
}

/// Operations implemented by identity providers to expose caller claims.
#[async_trait::async_trait]
pub trait ClaimsProvider: Send + Sync {
    /// Fetch the current [`CallerClaims`] for the given caller.
    ///
    /// [`ClaimsProvider`] implementations must respect the following expectations:
    ///
    /// - Claims are fetched from the provider on every call, never cached.
    /// - Callers unknown to the provider are reported with a [`LookupError`](crate::LookupError).
    /// - Known callers without claims return an empty [`CallerClaims`].
    /// - Any other failure is returned as is.
    async fn lookup(&self, context: &Context, caller_id: &str) -> Result<CallerClaims>;
}

/// Initialisation logic for [`ClaimsProvider`] implementations.
#[async_trait::async_trait]
pub trait ClaimsProviderFactory: Send + Sync {
    /// Validate the user provided configuration for the backend.
    fn conf_check(&self, context: &Context, conf: &Json) -> Result<()>;

    /// Register backend specific metrics.
    fn register_metrics(&self, registry: &prometheus::Registry) -> Result<()>;

    /// Initialise a [`Claims`] object.
    async fn claims<'a>(&self, args: ClaimsProviderFactoryArgs<'a>) -> Result<Claims>;
}

/// Arguments passed to the [`ClaimsProviderFactory`] initialisation method.
pub struct ClaimsProviderFactoryArgs<'a> {
    /// The configuration block for the backend to initialise.
    pub conf: &'a Json,

    /// Container for operation scoped values.
    pub context: &'a Context,
}

/// Read [`CallerClaims`] from the configured identity provider.
#[derive(Clone)]
pub struct Claims {
    /// Identity provider backend to read claims from.
    inner: Arc<dyn ClaimsProvider>,
}

impl Claims {
    /// Fetch the current [`CallerClaims`] for the given caller.
    ///
    /// For details see [`ClaimsProvider::lookup`].
    pub async fn lookup(&self, context: &Context, caller_id: &str) -> Result<CallerClaims> {
        self.inner.lookup(context, caller_id).await
    }
}

impl<T> From<T> for Claims
where
    T: ClaimsProvider + 'static,
{
    fn from(value: T) -> Self {
        let inner = Arc::new(value);
        Claims { inner }
    }
}
