//! Information recorded about each authorization check for auditing.
use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;

use venueguard_context::Context;

use super::AuthorizationDecision;
use crate::PermissionDenied;
use crate::Role;

/// Audit record of an authorization check, emitted as a structured log.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Audit {
    /// Identity of the caller the check was performed for.
    pub caller: String,

    /// The check that was performed.
    pub check: AuditCheck,

    /// Result of the authorization process.
    pub decision: AuditDecision,

    /// Minimum role required by the check.
    pub required_role: Role,

    /// Venue the check was scoped to, if any.
    #[serde(default)]
    pub venue: Option<String>,
}

impl Audit {
    /// Compose an audit record from the result of an authorization check.
    pub fn new(
        check: AuditCheck,
        caller: &str,
        required_role: Role,
        result: &Result<AuthorizationDecision>,
    ) -> Audit {
        Audit {
            caller: caller.to_string(),
            check,
            decision: AuditDecision::from(result),
            required_role,
            venue: None,
        }
    }

    /// Record the venue the check was scoped to.
    pub fn venue<S: Into<String>>(mut self, venue: S) -> Audit {
        self.venue = Some(venue.into());
        self
    }

    /// Log the audit record and count the decision.
    pub fn emit(&self, context: &Context) {
        crate::telemetry::CHECKS
            .with_label_values(&[self.check.as_str(), self.decision.as_str()])
            .inc();
        slog::info!(
            context.logger,
            "Authorization check completed";
            "audit" => true,
            "caller" => &self.caller,
            "check" => self.check.as_str(),
            "decision" => self.decision.as_str(),
            "required_role" => self.required_role.as_str(),
            "venue" => self.venue.as_deref(),
        );
    }
}

/// Authorization checks reported in [`Audit`] records.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditCheck {
    /// Minimum role check.
    MinimumRole,

    /// Minimum role check combined with a venue access check.
    VenueScope,
}

impl AuditCheck {
    /// Label used for the check in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditCheck::MinimumRole => "minimum_role",
            AuditCheck::VenueScope => "venue_scope",
        }
    }
}

/// Decision of an authorization request reported in an [`Audit`] record.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum AuditDecision {
    /// The request was authorised.
    Allow,

    /// The request was denied.
    Deny,

    /// There was an error performing the authorisation check (so the request was denied).
    Error,
}

impl AuditDecision {
    /// Label used for the decision in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditDecision::Allow => "allow",
            AuditDecision::Deny => "deny",
            AuditDecision::Error => "error",
        }
    }
}

impl From<&Result<AuthorizationDecision>> for AuditDecision {
    fn from(value: &Result<AuthorizationDecision>) -> Self {
        match value {
            Ok(decision) if decision.is_allowed() => AuditDecision::Allow,
            Ok(_) => AuditDecision::Deny,
            Err(error) if error.is::<PermissionDenied>() => AuditDecision::Deny,
            Err(_) => AuditDecision::Error,
        }
    }
}
