//! Process initialisation builder for aspects to initialise for all commands.
use anyhow::Result;
use prometheus::Encoder;
use prometheus::Registry;
use prometheus::TextEncoder;

use venueguard_auth::claims::ClaimsProviderFactoryArgs;
use venueguard_auth::AuthorizationGate;
use venueguard_conf::Conf;
use venueguard_context::Context;

use super::backends::Backends;

/// Process builder to initialise all VenueGuard commands.
pub struct GenericInit {
    pub backends: Backends,
    pub conf: Conf,
    pub context: Context,
    pub registry: Registry,
}

impl GenericInit {
    /// Prepare process initialisation from the loaded configuration.
    pub fn configure(conf: Conf) -> Self {
        let logger = super::logging::logger(&conf.logging);
        let context = Context::root(logger).build();
        slog::debug!(context.logger, "Process logger initialised");
        GenericInit {
            backends: Default::default(),
            conf,
            context,
            registry: Registry::new(),
        }
    }

    /// Initialise the [`AuthorizationGate`] with the configured claims provider.
    pub async fn gate(&self) -> Result<AuthorizationGate> {
        let args = ClaimsProviderFactoryArgs {
            conf: &self.conf.claims.options,
            context: &self.context,
        };
        let claims = self
            .backends
            .claims(&self.conf.claims.backend)?
            .claims(args)
            .await?;
        slog::debug!(
            self.context.logger,
            "Authorization gate initialised";
            "backend" => &self.conf.claims.backend,
        );
        Ok(AuthorizationGate::from(claims))
    }

    /// Encode all registered metrics in text format to standard error.
    pub fn print_metrics(&self) -> Result<()> {
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        eprint!("{}", String::from_utf8(buffer)?);
        Ok(())
    }

    /// Register all supported backends for all process dependencies.
    ///
    /// Supported dependencies can be tuned at compile time using crate features.
    pub fn register_default_backends(&mut self) -> &mut Self {
        self.backends
            .register_claims("static", venueguard_auth_static::StaticFactory);
        #[cfg(feature = "claims-http")]
        self.backends
            .register_claims("http", venueguard_auth_http::HttpFactory);
        self
    }

    /// Register authorization metrics and metrics for the selected backend.
    pub fn register_metrics(&self) -> Result<&Self> {
        venueguard_auth::register_metrics(&self.registry)?;
        self.backends
            .claims(&self.conf.claims.backend)?
            .register_metrics(&self.registry)?;
        Ok(self)
    }

    /// Validate the loaded configuration objects for the selected backend.
    pub fn validate_backends_conf(&self) -> Result<&Self> {
        self.backends
            .claims(&self.conf.claims.backend)?
            .conf_check(&self.context, &self.conf.claims.options)?;
        Ok(self)
    }
}
