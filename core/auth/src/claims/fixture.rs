//! In-memory implementation of [`ClaimsProvider`] for unit tests.
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use anyhow::Result;

use venueguard_context::Context;

use super::CallerClaims;
use super::Claims;
use super::ClaimsProvider;
use crate::LookupError;

/// Failure injected into a [`ClaimsFixture`] to mock provider errors.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct FixtureFailure(pub String);

/// In-memory [`ClaimsProvider`] with introspection for unit tests.
#[derive(Clone, Default)]
pub struct ClaimsFixture {
    /// Shared in-memory state to mock the identity provider with.
    inner: Arc<Mutex<ClaimsFixtureState>>,
}

#[derive(Default)]
struct ClaimsFixtureState {
    callers: HashMap<String, CallerClaims>,
    failure: Option<String>,
    lookups: usize,
}

impl ClaimsFixture {
    /// Make every following lookup fail with the given message.
    pub fn fail_with<S: Into<String>>(&self, message: S) -> &Self {
        self.access().failure = Some(message.into());
        self
    }

    /// Record the claims of a known caller.
    pub fn insert<S: Into<String>>(&self, caller_id: S, claims: CallerClaims) -> &Self {
        self.access().callers.insert(caller_id.into(), claims);
        self
    }

    /// Number of lookups performed against the fixture so far.
    pub fn lookups(&self) -> usize {
        self.access().lookups
    }

    /// Create a [`Claims`] object backed by this fixture.
    pub fn claims(&self) -> Claims {
        Claims::from(self.clone())
    }

    /// Lock and access the shared inner state.
    fn access(&self) -> MutexGuard<ClaimsFixtureState> {
        self.inner
            .lock()
            .expect("ClaimsFixture::inner state lock poisoned")
    }
}

#[async_trait::async_trait]
impl ClaimsProvider for ClaimsFixture {
    async fn lookup(&self, _: &Context, caller_id: &str) -> Result<CallerClaims> {
        let mut state = self.access();
        state.lookups += 1;
        if let Some(message) = &state.failure {
            anyhow::bail!(FixtureFailure(message.clone()));
        }
        match state.callers.get(caller_id) {
            Some(claims) => Ok(claims.clone()),
            None => anyhow::bail!(LookupError::not_found(caller_id)),
        }
    }
}
