//! Claims provider backends registration and lookup.
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use venueguard_auth::claims::ClaimsProviderFactory;

/// Error looking for a specific backend implementation.
#[derive(Debug, thiserror::Error)]
#[error("claims provider backend '{0}' not recognised")]
// (id,)
pub struct BackendNotFound(String);

impl BackendNotFound {
    /// ID of the backend that was requested.
    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Registers of backend factories for implementations supported by the process/build.
#[derive(Clone, Default)]
pub struct Backends {
    /// Supported identity provider backends.
    claims: HashMap<String, Arc<dyn ClaimsProviderFactory>>,
}

impl Backends {
    /// Lookup a [`ClaimsProviderFactory`] by ID.
    pub fn claims(&self, id: &str) -> Result<&dyn ClaimsProviderFactory> {
        let factory = self
            .claims
            .get(id)
            .ok_or_else(|| BackendNotFound(id.to_string()))?;
        Ok(factory.as_ref())
    }

    /// Register a new factory for an identity provider implementation.
    ///
    /// # Panics
    ///
    /// This method panics if the identifier of the new claims provider backend is already in use.
    pub fn register_claims<B, S>(&mut self, id: S, backend: B) -> &mut Self
    where
        B: ClaimsProviderFactory + 'static,
        S: Into<String>,
    {
        match self.claims.entry(id.into()) {
            Entry::Occupied(entry) => {
                panic!(
                    "a ClaimsProvider backend with id '{}' is already registered",
                    entry.key()
                )
            }
            Entry::Vacant(entry) => entry.insert(Arc::new(backend)),
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use venueguard_auth_static::StaticFactory;

    use super::BackendNotFound;
    use super::Backends;

    #[test]
    fn lookup_registered_backend() {
        let mut backends = Backends::default();
        backends.register_claims("static", StaticFactory);
        assert!(backends.claims("static").is_ok());
    }

    #[test]
    fn lookup_unknown_backend() {
        let backends = Backends::default();
        let error = match backends.claims("ldap") {
            Ok(_) => panic!("backend lookup should fail"),
            Err(error) => error,
        };
        let error = error
            .downcast_ref::<BackendNotFound>()
            .expect("error to be BackendNotFound");
        assert_eq!(error.id(), "ldap");
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn register_duplicate_backend() {
        let mut backends = Backends::default();
        backends
            .register_claims("static", StaticFactory)
            .register_claims("static", StaticFactory);
    }
}
