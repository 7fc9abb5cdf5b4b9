//! Errors returned when authorization checks reject a request.
//!
//! Checks return [`anyhow::Error`]s with one of the types below as their outermost error.
//! Callers test for them with [`anyhow::Error::is`] or classify them with [`Rejection`].
use crate::access::DenyReason;

/// The caller identity is not known to the claims provider.
#[derive(Debug, thiserror::Error)]
#[error("identity '{caller}' not found")]
pub struct LookupError {
    caller: String,
}

impl LookupError {
    /// The caller identity is not known to the claims provider.
    pub fn not_found<S: Into<String>>(caller: S) -> Self {
        Self {
            caller: caller.into(),
        }
    }

    /// Identity of the caller that was looked up.
    pub fn caller(&self) -> &str {
        &self.caller
    }
}

/// The caller is not allowed to perform the requested operation.
#[derive(Debug, thiserror::Error)]
#[error("permission denied: {reason}")]
pub struct PermissionDenied {
    reason: DenyReason,
}

impl PermissionDenied {
    /// Deny a request for the given reason.
    pub fn new(reason: DenyReason) -> Self {
        Self { reason }
    }

    /// Reason the request was denied.
    pub fn reason(&self) -> &DenyReason {
        &self.reason
    }
}

/// Permissions could not be verified because of an unexpected error.
///
/// The underlying error is logged but never attached.
#[derive(Debug, thiserror::Error)]
#[error("failed to verify permissions")]
pub struct InternalError;

/// Categories of rejected requests, as surfaced to end users.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rejection {
    /// The caller was denied access.
    Denied,

    /// Authorization could not be checked.
    Internal,

    /// The caller identity was not found.
    Lookup,
}

impl Rejection {
    /// Classify an error returned by authorization checks.
    ///
    /// Errors that are not part of the authorization taxonomy are [`Rejection::Internal`].
    pub fn classify(error: &anyhow::Error) -> Rejection {
        if error.is::<PermissionDenied>() {
            Rejection::Denied
        } else if error.is::<LookupError>() {
            Rejection::Lookup
        } else {
            Rejection::Internal
        }
    }
}
