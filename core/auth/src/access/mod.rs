//! Module to deal with the Authorization (what can be done) side of Auth.
use anyhow::Result;

use venueguard_context::Context;

mod audit;
mod decision;

#[cfg(test)]
mod test;

pub use self::audit::Audit;
pub use self::audit::AuditCheck;
pub use self::audit::AuditDecision;
pub use self::decision::check_venue_access;
pub use self::decision::evaluate_minimum_role;
pub use self::decision::evaluate_venue_access;
pub use self::decision::AuthorizationDecision;
pub use self::decision::DenyReason;

use crate::claims::Claims;
use crate::CallerClaims;
use crate::InternalError;
use crate::LookupError;
use crate::Role;

/// Verify callers hold the role, and venue scope, required by an operation.
///
/// Claims are fetched from the identity provider for every check:
/// role changes take effect on the very next request.
#[derive(Clone)]
pub struct AuthorizationGate {
    /// Identity provider to read caller claims from.
    claims: Claims,
}

impl AuthorizationGate {
    /// Fetch the current claims of a caller.
    ///
    /// The returned error is one of:
    ///
    /// - A [`LookupError`] if the caller is not known to the identity provider
    ///   (or the caller ID is empty, in which case the provider is not contacted).
    /// - An [`InternalError`] for any other failure.
    ///   The original error is logged and discarded.
    pub async fn claims(&self, context: &Context, caller_id: &str) -> Result<CallerClaims> {
        if caller_id.is_empty() {
            anyhow::bail!(LookupError::not_found(caller_id));
        }

        match self.claims.lookup(context, caller_id).await {
            Ok(claims) => Ok(claims),
            Err(error) if error.is::<LookupError>() => {
                anyhow::bail!(LookupError::not_found(caller_id))
            }
            Err(error) => {
                crate::telemetry::CLAIMS_LOOKUP_ERR.inc();
                slog::error!(
                    context.logger,
                    "Failed to look up caller claims";
                    "caller" => caller_id,
                    "error" => ?error,
                );
                anyhow::bail!(InternalError)
            }
        }
    }

    /// Verify the caller holds at least the required role.
    ///
    /// When no role is required explicitly the highest ranked role is required.
    ///
    /// Denied requests return an error instead of a denied [`AuthorizationDecision`]:
    ///
    /// - [`PermissionDenied`](crate::PermissionDenied) if the caller has no role
    ///   or their role is ranked below the required one.
    /// - Any of the errors returned by [`AuthorizationGate::claims`].
    pub async fn check_minimum_role(
        &self,
        context: &Context,
        caller_id: &str,
        required: Option<Role>,
    ) -> Result<AuthorizationDecision> {
        let required = required.unwrap_or_default();
        let context = context.derive_with(|builder| {
            builder.log_values(slog::o!(
                "caller" => caller_id.to_string(),
                "required_role" => required.as_str(),
            ))
        });
        let result = self.minimum_role(&context, caller_id, required).await;
        Audit::new(AuditCheck::MinimumRole, caller_id, required, &result).emit(&context);
        result
    }

    /// Verify the caller holds at least the required role and can access the given venue.
    ///
    /// The caller claims are fetched once and used for both checks.
    /// Venue mismatches are reported as [`PermissionDenied`](crate::PermissionDenied) errors.
    pub async fn check_venue_scope(
        &self,
        context: &Context,
        caller_id: &str,
        required: Option<Role>,
        venue_id: &str,
    ) -> Result<AuthorizationDecision> {
        let required = required.unwrap_or_default();
        let context = context.derive_with(|builder| {
            builder.log_values(slog::o!(
                "caller" => caller_id.to_string(),
                "required_role" => required.as_str(),
                "venue" => venue_id.to_string(),
            ))
        });
        let result = self
            .venue_scope(&context, caller_id, required, venue_id)
            .await;
        Audit::new(AuditCheck::VenueScope, caller_id, required, &result)
            .venue(venue_id)
            .emit(&context);
        result
    }
}

impl AuthorizationGate {
    async fn minimum_role(
        &self,
        context: &Context,
        caller_id: &str,
        required: Role,
    ) -> Result<AuthorizationDecision> {
        let claims = self.claims(context, caller_id).await?;
        evaluate_minimum_role(&claims, required).ensure()
    }

    async fn venue_scope(
        &self,
        context: &Context,
        caller_id: &str,
        required: Role,
        venue_id: &str,
    ) -> Result<AuthorizationDecision> {
        let claims = self.claims(context, caller_id).await?;
        evaluate_minimum_role(&claims, required).ensure()?;
        evaluate_venue_access(&claims, venue_id).ensure()
    }
}

impl From<Claims> for AuthorizationGate {
    fn from(claims: Claims) -> Self {
        AuthorizationGate { claims }
    }
}
