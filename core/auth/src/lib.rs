//! Role hierarchy authorization for VenueGuard administrative operations.
//!
//! Every administrative mutation (creating venues, deleting payment methods,
//! reading scan history, ...) is gated by the role assigned to the caller:
//!
//! - Authentication is handled by an external identity provider which attaches
//!   [`CallerClaims`] (a role and an optional venue) to each identity.
//! - Authorization is handled here: the [`AuthorizationGate`] reads the caller's claims
//!   and compares their [`Role`] against the minimum role an operation requires.
//!
//! ## Role hierarchy
//!
//! Roles are totally ordered by their [`Rank`]:
//!
//! | Role         | Rank |
//! |--------------|------|
//! | `subAdmin`   | 1    |
//! | `venueAdmin` | 2    |
//! | `siteAdmin`  | 3    |
//!
//! A role grants everything lower ranked roles are granted.
//! Role names not found in the table are [`Rank::UNRANKED`] and never sufficient.
//!
//! ## Venue scope
//!
//! Operations on a specific venue additionally check venue ownership:
//! `siteAdmin`s can act on any venue while `venueAdmin`s and `subAdmin`s
//! can only act on the venue recorded in their claims.
//!
//! ## Failing and non-failing checks
//!
//! [`AuthorizationGate::check_minimum_role`] returns an error for every denial
//! so callers can short-circuit with `?`.
//! [`check_venue_access`] is a plain predicate returning `bool`.
//! Both are implemented on top of [`AuthorizationDecision`] values which can be turned
//! into errors with [`AuthorizationDecision::ensure`].
pub mod access;
pub mod claims;
pub mod errors;
pub mod role;

mod telemetry;

pub use self::access::check_venue_access;
pub use self::access::evaluate_minimum_role;
pub use self::access::evaluate_venue_access;
pub use self::access::AuthorizationDecision;
pub use self::access::AuthorizationGate;
pub use self::access::DenyReason;
pub use self::claims::CallerClaims;
pub use self::errors::InternalError;
pub use self::errors::LookupError;
pub use self::errors::PermissionDenied;
pub use self::errors::Rejection;
pub use self::role::Rank;
pub use self::role::Role;
pub use self::telemetry::register_metrics;
