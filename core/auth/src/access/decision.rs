//! Authorization decisions and the predicates that produce them.
use std::fmt::Display;

use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;

use crate::CallerClaims;
use crate::InternalError;
use crate::PermissionDenied;
use crate::Role;

/// Outcome of an authorization check.
///
/// Decisions are only built with [`AuthorizationDecision::allow`] and
/// [`AuthorizationDecision::deny`] so denials always carry a reason.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AuthorizationDecision {
    allowed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    reason: Option<DenyReason>,
}

impl AuthorizationDecision {
    /// The request is allowed.
    pub fn allow() -> Self {
        AuthorizationDecision {
            allowed: true,
            reason: None,
        }
    }

    /// The request is denied for the given reason.
    pub fn deny(reason: DenyReason) -> Self {
        AuthorizationDecision {
            allowed: false,
            reason: Some(reason),
        }
    }

    /// Convert a denied decision into a [`PermissionDenied`] error.
    ///
    /// Allowed decisions are returned unchanged.
    /// A denial without a reason can't be explained and fails with an [`InternalError`].
    pub fn ensure(self) -> Result<Self> {
        if self.allowed {
            return Ok(self);
        }
        match self.reason {
            Some(reason) => anyhow::bail!(PermissionDenied::new(reason)),
            None => anyhow::bail!(InternalError),
        }
    }

    /// Check if the request is allowed.
    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    /// Reason the request was denied, if it was.
    pub fn reason(&self) -> Option<&DenyReason> {
        self.reason.as_ref()
    }
}

/// Reasons a request can be denied for.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum DenyReason {
    /// The caller role is ranked below the role required by the operation.
    InsufficientRole { required: Role },

    /// The caller has no role assigned.
    NoRole,

    /// The caller is scoped to a venue other than the one the operation targets.
    VenueMismatch { venue: String },
}

impl Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DenyReason::InsufficientRole { required } => {
                write!(f, "role '{}' or higher is required", required)
            }
            DenyReason::NoRole => write!(f, "no role assigned"),
            DenyReason::VenueMismatch { venue } => {
                write!(f, "access to venue '{}' is not allowed", venue)
            }
        }
    }
}

/// Decide if the claims grant at least the required role.
///
/// Callers without a role are always denied, callers with unknown roles are
/// [`Rank::UNRANKED`](crate::Rank::UNRANKED) and always insufficient.
pub fn evaluate_minimum_role(claims: &CallerClaims, required: Role) -> AuthorizationDecision {
    let rank = match claims.rank() {
        None => return AuthorizationDecision::deny(DenyReason::NoRole),
        Some(rank) => rank,
    };
    if rank >= required.rank() {
        AuthorizationDecision::allow()
    } else {
        AuthorizationDecision::deny(DenyReason::InsufficientRole { required })
    }
}

/// Decide if the claims grant access to the given venue.
///
/// Site admins can access every venue, venue scoped roles only their own.
pub fn evaluate_venue_access(claims: &CallerClaims, venue_id: &str) -> AuthorizationDecision {
    let allowed = match claims.known_role() {
        Some(Role::SiteAdmin) => true,
        Some(Role::VenueAdmin) | Some(Role::SubAdmin) => {
            claims.venue_id.as_deref() == Some(venue_id)
        }
        None => false,
    };
    if allowed {
        AuthorizationDecision::allow()
    } else {
        AuthorizationDecision::deny(DenyReason::VenueMismatch {
            venue: venue_id.to_string(),
        })
    }
}

/// Check if the claims grant access to the given venue.
///
/// Unlike [`AuthorizationGate`](super::AuthorizationGate) checks this never fails.
pub fn check_venue_access(claims: &CallerClaims, venue_id: &str) -> bool {
    evaluate_venue_access(claims, venue_id).is_allowed()
}
